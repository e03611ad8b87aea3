//! Module command - automation host entry point

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use cosign_login_invoker::{run_module, CosignInvoker, ModuleResponse};

use crate::cli::Cli;
use crate::exit_codes;

/// Run as an automation host module.
///
/// Reads the host's JSON arguments and writes exactly one JSON object to
/// stdout, whatever happens.
#[derive(Debug, Args)]
pub struct ModuleCommand {
    /// JSON argument file written by the host (stdin when omitted)
    pub args_file: Option<PathBuf>,
}

impl ModuleCommand {
    /// Execute the module command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(args_file = ?self.args_file, "executing module command");
        self.run(cli, &mut std::io::stdin())
    }

    /// Print the response and map it to an exit code
    fn run(&self, cli: &Cli, stdin: &mut dyn Read) -> anyhow::Result<i32> {
        let response = self.respond(cli, stdin);

        println!("{}", serde_json::to_string(&response)?);

        if response.is_failed() {
            return Ok(exit_codes::ERROR);
        }
        Ok(exit_codes::SUCCESS)
    }

    /// Produce the response, turning every error into a failure object
    fn respond(&self, cli: &Cli, stdin: &mut dyn Read) -> ModuleResponse {
        let input = match self.read_input(stdin) {
            Ok(input) => input,
            Err(e) => return fail(format!("failed to read module arguments: {e}")),
        };

        let config = match std::env::current_dir()
            .map_err(anyhow::Error::from)
            .and_then(|cwd| cli.load_config(&cwd))
        {
            Ok(config) => config,
            Err(e) => return fail(format!("{e:#}")),
        };

        run_module(&CosignInvoker::from_config(&config.cosign), &input)
    }

    fn read_input(&self, stdin: &mut dyn Read) -> std::io::Result<String> {
        match &self.args_file {
            Some(path) => std::fs::read_to_string(path),
            None => {
                let mut input = String::new();
                stdin.read_to_string(&mut input)?;
                Ok(input)
            }
        }
    }
}

fn fail(msg: String) -> ModuleResponse {
    warn!(%msg, "module failed before running cosign");
    ModuleResponse::fail(msg)
}
