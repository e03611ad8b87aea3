//! cosign login invoker

use std::process::Stdio;

use cosign_login_core::config::{CosignConfig, DEFAULT_COSIGN_BINARY};
use tracing::{debug, info, instrument, warn};

use crate::command::{login_command, CommandLine};
use crate::error::{LoginError, Result};
use crate::request::LoginRequest;
use crate::result::LoginResult;

/// Runs `cosign login` as a blocking child process
#[derive(Debug, Clone)]
pub struct CosignInvoker {
    /// Path to cosign binary
    cosign_path: String,
}

impl CosignInvoker {
    /// Create an invoker that looks up `cosign` on PATH
    pub fn new() -> Self {
        Self {
            cosign_path: DEFAULT_COSIGN_BINARY.to_string(),
        }
    }

    /// Create with custom cosign path
    pub fn with_path(cosign_path: impl Into<String>) -> Self {
        Self {
            cosign_path: cosign_path.into(),
        }
    }

    /// Create from the `cosign` section of the configuration
    pub fn from_config(config: &CosignConfig) -> Self {
        Self::with_path(config.binary.clone())
    }

    /// The program that will be executed
    pub fn tool(&self) -> &str {
        &self.cosign_path
    }

    /// The argument vector a login with `request` would run
    pub fn command_for(&self, request: &LoginRequest) -> CommandLine {
        login_command(&self.cosign_path, request)
    }

    /// Report the `GitVersion` line of `cosign version`, if it exits 0
    pub fn version(&self) -> Result<Option<String>> {
        let output = std::process::Command::new(&self.cosign_path)
            .arg("version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| LoginError::launch(&self.cosign_path, e))?;

        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout
            .lines()
            .find_map(|line| line.trim().strip_prefix("GitVersion:"))
            .map(|v| v.trim().to_string())
            .or_else(|| {
                stdout
                    .lines()
                    .map(str::trim)
                    .find(|l| !l.is_empty())
                    .map(String::from)
            });
        Ok(version)
    }

    /// Log in to `request.registry()`.
    ///
    /// In dry-run mode nothing is spawned and the result carries the command
    /// preview. Otherwise cosign runs to completion and its exit code and
    /// output are returned; only a failure to start the process is an error.
    #[instrument(
        skip(self, request),
        fields(tool = %self.cosign_path, registry = %request.registry(), username = %request.username())
    )]
    pub fn login(&self, request: &LoginRequest, dry_run: bool) -> Result<LoginResult> {
        let command = self.command_for(request);

        if dry_run {
            info!(command = %command, "Dry run: would run cosign login");
            return Ok(LoginResult::dry_run(command));
        }

        debug!(command = %command, "Running cosign login");
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                warn!(error = %e, "Failed to launch cosign");
                LoginError::launch(&self.cosign_path, e)
            })?;

        let result = LoginResult::from_output(&output);
        if output.status.code().is_none() {
            warn!("cosign terminated without an exit code");
        }
        info!(
            exit_code = result.exit_code,
            changed = result.changed,
            "cosign login finished"
        );
        Ok(result)
    }
}

impl Default for CosignInvoker {
    fn default() -> Self {
        Self::new()
    }
}

/// Log in with the `cosign` found on PATH
pub fn login(request: &LoginRequest, dry_run: bool) -> Result<LoginResult> {
    CosignInvoker::new().login(request, dry_run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CapturedLogs;

    fn request() -> LoginRequest {
        LoginRequest::new("registry.example.com", "alice", "changeme").unwrap()
    }

    #[test]
    fn test_invoker_defaults_to_cosign() {
        assert_eq!(CosignInvoker::new().tool(), "cosign");
        assert_eq!(CosignInvoker::default().tool(), "cosign");
    }

    #[test]
    fn test_from_config() {
        let config = CosignConfig {
            binary: "/opt/bin/cosign".to_string(),
        };
        assert_eq!(CosignInvoker::from_config(&config).tool(), "/opt/bin/cosign");
    }

    #[test]
    fn test_dry_run_preview() {
        let result = CosignInvoker::new().login(&request(), true).unwrap();

        assert!(!result.changed);
        assert_eq!(result.exit_code, 1);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.is_empty());
        assert_eq!(
            result.cmd(),
            "cosign login registry.example.com -u alice -p changeme"
        );
    }

    #[test]
    fn test_dry_run_with_missing_binary_succeeds() {
        let invoker = CosignInvoker::with_path("/nonexistent/path/to/cosign");
        let result = invoker.login(&request(), true).unwrap();
        assert!(!result.changed);
        assert_eq!(
            result.cmd(),
            "/nonexistent/path/to/cosign login registry.example.com -u alice -p changeme"
        );
    }

    #[test]
    fn test_missing_binary_is_launch_error() {
        let _guard = crate::testing::spawn_guard();
        let invoker = CosignInvoker::with_path("/nonexistent/path/to/cosign");

        let err = invoker.login(&request(), false).unwrap_err();
        assert!(err.is_launch_error());
        assert!(matches!(err, LoginError::ToolNotFound { .. }));
        assert!(!err.to_string().contains("changeme"));
    }

    #[test]
    fn test_dry_run_logs_do_not_contain_password() {
        let logs = CapturedLogs::default();
        let invoker = CosignInvoker::new();
        let request = LoginRequest::new("r.example", "bob", "pa55-dry-run").unwrap();

        logs.capture(|| invoker.login(&request, true)).unwrap();

        let contents = logs.contents();
        assert!(contents.contains("Dry run"));
        assert!(contents.contains("r.example"));
        assert!(!contents.contains("pa55-dry-run"));
    }

    #[cfg(unix)]
    mod live {
        use super::*;
        use crate::testing::{spawn_guard, write_stub};
        use tempfile::TempDir;

        #[test]
        fn test_stub_success() {
            let _guard = spawn_guard();
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), "printf ok\nexit 0");
            let request = LoginRequest::new("r", "u", "p").unwrap();

            let result = CosignInvoker::with_path(stub.to_string_lossy())
                .login(&request, false)
                .unwrap();

            assert!(result.changed);
            assert_eq!(result.exit_code, 0);
            assert_eq!(result.stdout, "ok");
            assert_eq!(result.stderr, "");
            assert_eq!(result.cmd(), "");
        }

        #[test]
        fn test_stub_failure_is_reported_as_data() {
            let _guard = spawn_guard();
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), "printf 'UNAUTHORIZED: bad credentials\\n' >&2\nexit 3");

            let result = CosignInvoker::with_path(stub.to_string_lossy())
                .login(&request(), false)
                .unwrap();

            assert!(!result.changed);
            assert_eq!(result.exit_code, 3);
            assert_eq!(result.stdout, "");
            assert_eq!(result.stderr, "UNAUTHORIZED: bad credentials\n");
        }

        #[test]
        fn test_output_is_not_trimmed() {
            let _guard = spawn_guard();
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), "printf '  padded  \\n\\n'");

            let result = CosignInvoker::with_path(stub.to_string_lossy())
                .login(&request(), false)
                .unwrap();

            assert_eq!(result.stdout, "  padded  \n\n");
        }

        #[test]
        fn test_arguments_are_discrete_tokens() {
            let _guard = spawn_guard();
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), "for a in \"$@\"; do printf '[%s]\\n' \"$a\"; done");
            let request =
                LoginRequest::new("my registry", "bob smith", "a b;$(echo pwned)").unwrap();

            let result = CosignInvoker::with_path(stub.to_string_lossy())
                .login(&request, false)
                .unwrap();

            assert_eq!(
                result.stdout,
                "[login]\n[my registry]\n[-u]\n[bob smith]\n[-p]\n[a b;$(echo pwned)]\n"
            );
        }

        #[test]
        fn test_dry_run_does_not_spawn() {
            let _guard = spawn_guard();
            let temp = TempDir::new().unwrap();
            let marker = temp.path().join("ran");
            let stub = write_stub(temp.path(), &format!("touch '{}'", marker.display()));

            let result = CosignInvoker::with_path(stub.to_string_lossy())
                .login(&request(), true)
                .unwrap();

            assert!(!result.changed);
            assert!(!marker.exists());
        }

        #[test]
        fn test_non_executable_is_launch_error() {
            use std::os::unix::fs::PermissionsExt;

            let _guard = spawn_guard();
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), "exit 0");
            std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o644)).unwrap();

            let err = CosignInvoker::with_path(stub.to_string_lossy())
                .login(&request(), false)
                .unwrap_err();

            assert!(err.is_launch_error());
        }

        #[test]
        fn test_live_logs_do_not_contain_password() {
            let _guard = spawn_guard();
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), "echo \"$@\"\nexit 0");
            let request = LoginRequest::new("r.example", "bob", "pa55-live-run").unwrap();
            let invoker = CosignInvoker::with_path(stub.to_string_lossy());
            let logs = CapturedLogs::default();

            let result = logs.capture(|| invoker.login(&request, false)).unwrap();

            let contents = logs.contents();
            assert!(contents.contains("cosign login finished"));
            assert!(!contents.contains("pa55-live-run"));
            // the child still received it
            assert!(result.stdout.contains("pa55-live-run"));
        }

        #[test]
        fn test_version_parses_git_version() {
            let _guard = spawn_guard();
            let temp = TempDir::new().unwrap();
            let stub = write_stub(
                temp.path(),
                "printf '  ______\\nGitVersion:    v2.4.1\\nGitCommit:     abc\\n'",
            );

            let version = CosignInvoker::with_path(stub.to_string_lossy())
                .version()
                .unwrap();
            assert_eq!(version.as_deref(), Some("v2.4.1"));
        }
    }
}
