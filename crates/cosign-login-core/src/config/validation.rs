//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_cosign(config)?;
    validate_defaults(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_cosign(config: &Config) -> Result<()> {
    if config.cosign.binary.trim().is_empty() {
        return Err(ConfigError::invalid("cosign.binary", "binary cannot be empty").into());
    }
    Ok(())
}

fn validate_defaults(config: &Config) -> Result<()> {
    if config.defaults.registry.as_deref() == Some("") {
        return Err(ConfigError::invalid(
            "defaults.registry",
            "registry cannot be empty when set",
        )
        .into());
    }

    if config.defaults.username.as_deref() == Some("") {
        return Err(ConfigError::invalid(
            "defaults.username",
            "username cannot be empty when set",
        )
        .into());
    }

    if config.defaults.password_env.is_empty() {
        return Err(
            ConfigError::invalid("defaults.password_env", "variable name cannot be empty").into(),
        );
    }

    Ok(())
}
