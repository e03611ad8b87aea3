//! Configuration types

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_COSIGN_BINARY, DEFAULT_PASSWORD_ENV};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the external cosign executable
    pub cosign: CosignConfig,

    /// Fallback values for login arguments
    pub defaults: DefaultsConfig,
}

/// Settings for the external cosign executable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosignConfig {
    /// Executable name (looked up on PATH) or path to the binary
    pub binary: String,
}

impl Default for CosignConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_COSIGN_BINARY.to_string(),
        }
    }
}

/// Fallback values for login arguments.
///
/// Passwords are never read from configuration files, only from the command
/// line, stdin or the variable named by `password_env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Registry used when none is given on the command line
    pub registry: Option<String>,

    /// Username used when none is given on the command line
    pub username: Option<String>,

    /// Environment variable holding the password
    pub password_env: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            registry: None,
            username: None,
            password_env: DEFAULT_PASSWORD_ENV.to_string(),
        }
    }
}
