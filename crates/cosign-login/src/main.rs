//! cosign-login - log in to container registries with cosign

mod cli;
mod exit_codes;
#[cfg(test)]
mod testing;

use clap::Parser;
use cosign_login_core::CoreError;
use cosign_login_invoker::LoginError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};

fn main() {
    // the guard must drop before process::exit so the file log is flushed
    let code = {
        let _guard = init_tracing();

        let cli = Cli::parse();
        match cli.execute() {
            Ok(code) => code,
            Err(err) => {
                output::error(&format!("{err:#}"));
                exit_code_for(&err)
            }
        }
    };

    std::process::exit(code);
}

/// Map an error to the documented process exit code
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(login) = err.downcast_ref::<LoginError>() {
        if login.is_launch_error() {
            return exit_codes::LAUNCH_ERROR;
        }
    }
    if err.downcast_ref::<CoreError>().is_some() {
        return exit_codes::CONFIG_ERROR;
    }
    exit_codes::ERROR
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG (default: warn)
/// - File: always debug-level JSON to ~/.cosign-login/logs/
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // console output goes to stderr so module-mode stdout stays a single JSON object
    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "cosign-login.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".cosign-login").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
