//! Service settings for timewardend
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Periodic check interval and data directory
//! - Browser-class package recognition list
//! - Optional block command run when a block fires
//!
//! The blocklist itself is not configured here; it lives in the persistent
//! store and is edited by the settings UI. This crate only carries the
//! built-in defaults seeded on first run.

mod defaults;
mod schema;
mod settings;

pub use defaults::*;
pub use schema::*;
pub use settings::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate settings from a TOML file
pub fn load_settings(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parse and validate settings from a TOML string
pub fn parse_settings(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    Settings::from_raw(raw)
}
