//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "cosign-login.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "cosign-login.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".cosign-login.yaml";

/// Executable invoked when no binary is configured
pub const DEFAULT_COSIGN_BINARY: &str = "cosign";

/// Environment variable consulted for the password when none is given
pub const DEFAULT_PASSWORD_ENV: &str = "COSIGN_PASSWORD";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".cosign-login.toml",
    ]
}
