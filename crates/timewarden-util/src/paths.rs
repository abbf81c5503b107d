//! Default paths for timewarden components
//!
//! Paths are user-writable by default (no root required):
//! - Config: `$XDG_CONFIG_HOME/timewarden/config.toml` or `~/.config/timewarden/config.toml`
//! - Data: `$XDG_DATA_HOME/timewarden` or `~/.local/share/timewarden`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const TIMEWARDEN_DATA_DIR_ENV: &str = "TIMEWARDEN_DATA_DIR";

/// Application subdirectory name
const APP_DIR: &str = "timewarden";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/timewarden/config.toml` (if XDG_CONFIG_HOME is set)
/// 2. `~/.config/timewarden/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join("config.toml");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join("config.toml");
    }

    PathBuf::from("/tmp").join(APP_DIR).join("config.toml")
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$TIMEWARDEN_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/timewarden` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/timewarden` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(TIMEWARDEN_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking TIMEWARDEN_DATA_DIR env var.
/// Used for default values in configs where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}
