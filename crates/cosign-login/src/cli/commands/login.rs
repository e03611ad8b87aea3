//! Login command

use std::io::BufRead;

use anyhow::{bail, Context};
use clap::Args;
use tracing::{debug, info};

use cosign_login_core::Config;
use cosign_login_invoker::{CosignInvoker, LoginRequest, LoginResult, ModuleResponse, Sensitive};

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Log in to a registry
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Registry to log in to (defaults.registry when omitted)
    pub registry: Option<String>,

    /// Username (defaults.username when omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (falls back to the variable named by defaults.password_env)
    #[arg(short, long, conflicts_with = "password_stdin")]
    pub password: Option<Sensitive>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,

    /// Show the command without running cosign
    #[arg(long, visible_alias = "dry-run")]
    pub check: bool,

    /// Path to the cosign binary (overrides cosign.binary)
    #[arg(long)]
    pub cosign: Option<String>,
}

impl LoginCommand {
    /// Execute the login command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(check = self.check, "executing login command");
        self.run(cli, &mut std::io::stdin().lock(), |name| std::env::var(name).ok())
    }

    /// Log in and map the outcome to an exit code
    fn run(
        &self,
        cli: &Cli,
        stdin: &mut dyn BufRead,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<i32> {
        let cwd = std::env::current_dir()?;
        let config = cli.load_config(&cwd)?;

        let request = self.build_request(&config, stdin, env)?;
        let invoker = match &self.cosign {
            Some(path) => CosignInvoker::with_path(path.clone()),
            None => CosignInvoker::from_config(&config.cosign),
        };

        let result = invoker.login(&request, self.check)?;

        match cli.format {
            OutputFormat::Json => {
                let response = ModuleResponse::exit(&result, request.password());
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    self.print_result(&request, &result, cli.verbose);
                }
            }
        }

        if !self.check && !result.succeeded() {
            return Ok(exit_codes::TOOL_FAILED);
        }

        Ok(exit_codes::SUCCESS)
    }

    /// Resolve command-line values against configured defaults
    fn build_request(
        &self,
        config: &Config,
        stdin: &mut dyn BufRead,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<LoginRequest> {
        let Some(registry) = self.registry.clone().or_else(|| config.defaults.registry.clone())
        else {
            bail!("no registry given and defaults.registry is not set");
        };
        let Some(username) = self.username.clone().or_else(|| config.defaults.username.clone())
        else {
            bail!("no username given (use --username or set defaults.username)");
        };

        let password = if self.password_stdin {
            debug!("reading password from stdin");
            let mut line = String::new();
            stdin
                .read_line(&mut line)
                .context("failed to read password from stdin")?;
            Sensitive::new(line.trim_end_matches(&['\n', '\r'][..]))
        } else if let Some(password) = &self.password {
            password.clone()
        } else {
            let name = &config.defaults.password_env;
            match env(name) {
                Some(value) => {
                    debug!(variable = %name, "using password from environment");
                    Sensitive::new(value)
                }
                None => bail!("no password given (use --password, --password-stdin or set {name})"),
            }
        };

        Ok(LoginRequest::new(registry, username, password)?)
    }

    fn print_result(&self, request: &LoginRequest, result: &LoginResult, verbose: bool) {
        let password = request.password();

        if self.check {
            output::info(&format!("Dry run: {}", password.mask(&result.cmd())));
            return;
        }

        if result.succeeded() {
            output::success(&format!("Logged in to {}", request.registry()));
        } else {
            output::warning(&format!(
                "cosign login to {} exited with code {}",
                request.registry(),
                result.exit_code
            ));
        }

        if verbose || !result.succeeded() {
            println!("{}", output::key_value("changed", &result.changed.to_string()));
            if !result.stdout.is_empty() {
                println!("{}", output::block("stdout", &password.mask(&result.stdout)));
            }
            if !result.stderr.is_empty() {
                println!("{}", output::block("stderr", &password.mask(&result.stderr)));
            }
        }
    }
}
