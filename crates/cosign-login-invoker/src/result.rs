//! Login result record

use std::process::Output;

use serde::{Serialize, Serializer};

use crate::command::CommandLine;

/// Exit code reported when cosign was not run
pub const NOT_RUN_EXIT_CODE: i32 = 1;

/// Exit code reported when the child terminated without one (killed by a signal)
pub const NO_EXIT_CODE: i32 = -1;

/// Outcome of one login invocation.
///
/// Serializes to the host result shape `{changed, cmd, rc, stdout, stderr}`.
/// `cmd` carries the preview in cleartext; callers that publish the record
/// should mask it first (see [`crate::host`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    /// True iff cosign ran and exited 0
    pub changed: bool,

    /// Argument vector, populated in dry-run mode only
    #[serde(rename = "cmd", serialize_with = "serialize_preview")]
    pub command: Option<CommandLine>,

    /// Child exit code, [`NOT_RUN_EXIT_CODE`] if nothing ran
    #[serde(rename = "rc")]
    pub exit_code: i32,

    /// Raw captured standard output
    pub stdout: String,

    /// Raw captured standard error
    pub stderr: String,
}

impl Default for LoginResult {
    fn default() -> Self {
        Self {
            changed: false,
            command: None,
            exit_code: NOT_RUN_EXIT_CODE,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

impl LoginResult {
    /// Result of a dry run: nothing executed, command recorded for preview
    pub fn dry_run(command: CommandLine) -> Self {
        Self {
            command: Some(command),
            ..Self::default()
        }
    }

    /// Result of a completed child process
    pub fn from_output(output: &Output) -> Self {
        let exit_code = output.status.code().unwrap_or(NO_EXIT_CODE);
        Self {
            changed: exit_code == 0,
            command: None,
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Space-joined command preview, empty when nothing was previewed
    pub fn cmd(&self) -> String {
        self.command
            .as_ref()
            .map(CommandLine::preview)
            .unwrap_or_default()
    }

    /// Whether cosign ran and exited 0
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

fn serialize_preview<S: Serializer>(
    command: &Option<CommandLine>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match command {
        Some(command) => serializer.serialize_str(&command.preview()),
        None => serializer.serialize_str(""),
    }
}
