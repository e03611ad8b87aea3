//! cosign-login Core - shared configuration and error handling
//!
//! This crate provides the configuration layer (file discovery, parsing and
//! validation) used by the cosign-login invoker and CLI.

pub mod config;
pub mod error;

pub use config::{load_config, load_config_or_default, Config, CosignConfig, DefaultsConfig};
pub use error::{ConfigError, CoreError, Result};
