//! Error types for login operations

use thiserror::Error;

/// Result type alias for login operations
pub type Result<T> = std::result::Result<T, LoginError>;

/// Login-related errors.
///
/// A nonzero exit from cosign is not represented here; it is reported through
/// [`crate::LoginResult`].
#[derive(Debug, Error)]
pub enum LoginError {
    /// A required request field was empty
    #[error("Missing required argument: {0}")]
    MissingField(&'static str),

    /// The external tool could not be found
    #[error("Login tool not found: {tool}. {hint}")]
    ToolNotFound { tool: String, hint: String },

    /// The external tool exists but could not be started
    #[error("Failed to launch {tool}: {source}")]
    LaunchFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Host module arguments did not match the argument spec
    #[error("{0}")]
    InvalidArguments(String),

    /// Host module argument file could not be parsed
    #[error("Failed to parse module arguments: {0}")]
    MalformedArguments(String),
}

impl LoginError {
    /// Build a launch error from the spawn failure of `tool`
    pub(crate) fn launch(tool: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::ToolNotFound {
                tool: tool.to_string(),
                hint: "Install cosign from https://docs.sigstore.dev/cosign/system_config/installation/ or set cosign.binary".to_string(),
            }
        } else {
            Self::LaunchFailed {
                tool: tool.to_string(),
                source,
            }
        }
    }

    /// Whether the child process could not be started at all
    pub fn is_launch_error(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. } | Self::LaunchFailed { .. })
    }
}
