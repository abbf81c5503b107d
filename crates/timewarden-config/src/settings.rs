//! Validated settings ready for use by the service

use crate::{ConfigError, ConfigResult, RawConfig};
use std::path::PathBuf;
use std::time::Duration;
use timewarden_util::data_dir_without_env;

/// Validated service settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Data directory for the store
    pub data_dir: PathBuf,

    /// Fixed delay between periodic usage checks
    pub check_interval: Duration,

    /// Command spawned when a block fires (argv), if any
    pub block_command: Option<Vec<String>>,

    /// Package-name substrings recognized as browsers
    pub browsers: Vec<String>,

    /// Allowance in minutes applied to a group with no stored limit
    pub default_group_limit_minutes: u64,
}

impl Settings {
    /// Convert from raw config, applying defaults and validating
    pub fn from_raw(raw: RawConfig) -> ConfigResult<Self> {
        let check_interval_secs = raw.service.check_interval_secs.unwrap_or(30);
        if check_interval_secs == 0 {
            return Err(ConfigError::InvalidSetting(
                "check_interval_secs must be at least 1".into(),
            ));
        }

        if let Some(cmd) = &raw.service.block_command {
            if cmd.is_empty() {
                return Err(ConfigError::InvalidSetting(
                    "block_command must not be an empty list".into(),
                ));
            }
        }

        let browsers = match raw.service.browsers {
            Some(list) if list.is_empty() => {
                return Err(ConfigError::InvalidSetting(
                    "browsers must not be an empty list".into(),
                ));
            }
            Some(list) => list,
            None => default_browsers(),
        };

        Ok(Self {
            data_dir: raw.service.data_dir.unwrap_or_else(data_dir_without_env),
            check_interval: Duration::from_secs(check_interval_secs),
            block_command: raw.service.block_command,
            browsers,
            default_group_limit_minutes: raw.service.default_group_limit_minutes.unwrap_or(60),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: data_dir_without_env(),
            check_interval: Duration::from_secs(30),
            block_command: None,
            browsers: default_browsers(),
            default_group_limit_minutes: 60,
        }
    }
}

/// Package-name substrings that mark an application as a browser, used by
/// the website matching rule.
pub fn default_browsers() -> Vec<String> {
    [
        "chrome",
        "firefox",
        "opera",
        "duckduckgo",
        "brave",
        "edge",
        "samsung.android.browser",
        "webview",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_settings;

    #[test]
    fn default_settings_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.check_interval, Duration::from_secs(30));
        assert_eq!(settings.default_group_limit_minutes, 60);
        assert!(settings.browsers.iter().any(|b| b == "firefox"));
    }

    #[test]
    fn empty_browsers_rejected() {
        let config = r#"
            config_version = 1

            [service]
            browsers = []
        "#;

        assert!(parse_settings(config).is_err());
    }

    #[test]
    fn empty_block_command_rejected() {
        let config = r#"
            config_version = 1

            [service]
            block_command = []
        "#;

        assert!(parse_settings(config).is_err());
    }
}
