//! Doctor command - check that cosign can be found and started

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use cosign_login_core::config::{find_config, load_config, Config};
use cosign_login_invoker::CosignInvoker;

use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Check that cosign is installed
#[derive(Debug, Default, Args)]
pub struct DoctorCommand {
    /// Path to the cosign binary (overrides cosign.binary)
    #[arg(long)]
    pub cosign: Option<String>,
}

/// Result of a single check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: Option<String>,
    pub fix_suggestion: Option<String>,
}

/// Status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: Some(message.into()),
            fix_suggestion: None,
        }
    }

    fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix_suggestion = Some(fix.into());
        self
    }
}

impl DoctorCommand {
    /// Execute the doctor command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!("executing doctor command");
        let cwd = std::env::current_dir()?;

        let (config_check, config) = self.check_config(cli, &cwd);
        let binary = self
            .cosign
            .clone()
            .unwrap_or_else(|| config.cosign.binary.clone());

        let mut checks = vec![config_check];
        checks.extend(self.check_cosign(&binary));

        let fail_count = checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .count();

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&checks)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_results(&checks);
                }
            }
        }

        if fail_count > 0 {
            anyhow::bail!("{} check(s) failed", fail_count);
        }

        Ok(exit_codes::SUCCESS)
    }

    fn check_config(&self, cli: &Cli, cwd: &std::path::Path) -> (CheckResult, Config) {
        let path: Option<PathBuf> = cli.config.clone().or_else(|| find_config(cwd));
        let Some(path) = path else {
            return (
                CheckResult::new("config", CheckStatus::Ok, "no config file, using defaults"),
                Config::default(),
            );
        };

        match load_config(&path) {
            Ok(config) => (
                CheckResult::new("config", CheckStatus::Ok, path.display().to_string()),
                config,
            ),
            Err(e) => (
                CheckResult::new("config", CheckStatus::Fail, e.to_string())
                    .with_fix(format!("Fix or remove {}", path.display())),
                Config::default(),
            ),
        }
    }

    fn check_cosign(&self, binary: &str) -> Vec<CheckResult> {
        let resolved = match which::which(binary) {
            Ok(path) => path,
            Err(_) => {
                return vec![CheckResult::new(
                    "cosign",
                    CheckStatus::Fail,
                    format!("{binary} not found"),
                )
                .with_fix(
                    "Install cosign (https://docs.sigstore.dev/cosign/system_config/installation/) or set cosign.binary",
                )];
            }
        };

        let mut checks = vec![CheckResult::new(
            "cosign",
            CheckStatus::Ok,
            resolved.display().to_string(),
        )];

        let invoker = CosignInvoker::with_path(resolved.to_string_lossy());
        checks.push(match invoker.version() {
            Ok(Some(version)) => CheckResult::new("cosign version", CheckStatus::Ok, version),
            Ok(None) => CheckResult::new(
                "cosign version",
                CheckStatus::Warn,
                "`cosign version` exited nonzero",
            ),
            Err(e) => CheckResult::new("cosign version", CheckStatus::Fail, e.to_string())
                .with_fix("Check that the binary is executable"),
        });

        checks
    }
}

fn status_icon(status: CheckStatus) -> console::StyledObject<&'static str> {
    match status {
        CheckStatus::Ok => style("✓").green(),
        CheckStatus::Warn => style("!").yellow(),
        CheckStatus::Fail => style("✗").red(),
    }
}

fn print_results(checks: &[CheckResult]) {
    for check in checks {
        println!(
            "  {} {}: {}",
            status_icon(check.status),
            style(&check.name).bold(),
            check.message.as_deref().unwrap_or("")
        );
        if let Some(fix) = &check.fix_suggestion {
            println!("      {}", style(fix).dim());
        }
    }
}
