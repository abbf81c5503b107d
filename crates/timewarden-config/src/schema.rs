//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Service-level settings
    #[serde(default)]
    pub service: RawServiceConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Data directory for the store
    pub data_dir: Option<PathBuf>,

    /// Periodic usage check interval in seconds (default 30)
    pub check_interval_secs: Option<u64>,

    /// Command spawned when a block fires, argv-style. The blocked item's
    /// label and identifier are appended as the last two arguments.
    pub block_command: Option<Vec<String>>,

    /// Package-name substrings recognized as browsers (overrides defaults)
    pub browsers: Option<Vec<String>>,

    /// Allowance in minutes applied to a group with no stored limit
    pub default_group_limit_minutes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_service_table() {
        let toml_str = r#"
            config_version = 1

            [service]
            check_interval_secs = 15
            browsers = ["chrome"]
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service.check_interval_secs, Some(15));
        assert_eq!(config.service.browsers, Some(vec!["chrome".to_string()]));
    }

    #[test]
    fn service_table_is_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.service.data_dir.is_none());
        assert!(config.service.block_command.is_none());
    }
}
