//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cosign_login_core::{load_config, load_config_or_default, Config};

use commands::{DoctorCommand, LoginCommand, ModuleCommand};

/// cosign-login - log in to container registries with cosign
#[derive(Debug, Parser)]
#[command(name = "cosign-login")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    /// Configuration file (skips the upward search)
    #[arg(long, global = true, env = "COSIGN_LOGIN_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in to a registry
    Login(LoginCommand),

    /// Run as an automation host module reading a JSON argument file
    Module(ModuleCommand),

    /// Check that cosign is installed
    Doctor(DoctorCommand),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(self) -> anyhow::Result<i32> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("cannot change to {}", dir.display()))?;
        }

        match self.command {
            Commands::Login(ref cmd) => cmd.execute(&self),
            Commands::Module(ref cmd) => cmd.execute(&self),
            Commands::Doctor(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the explicit config file, or search upward from `dir`
    pub fn load_config(&self, dir: &Path) -> anyhow::Result<Config> {
        if let Some(path) = &self.config {
            return Ok(load_config(path)?);
        }
        let (config, _) = load_config_or_default(dir)?;
        Ok(config)
    }
}
