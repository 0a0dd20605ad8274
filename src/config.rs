use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Environment variable naming an optional YAML config file
pub const CONFIG_ENV: &str = "HTML_ANALYZER_CONFIG";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for fetching documents.
///
/// ```yaml
/// timeout_secs: 5
/// user_agent: my-crawler/1.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Connect and read timeout for http(s) sources
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("html-analyzer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AnalyzerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse a YAML document. Missing keys fall back to defaults.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: AnalyzerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from the file named by `HTML_ANALYZER_CONFIG`, or defaults when unset.
    pub fn load() -> ConfigResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user_agent".to_string(),
                reason: "must be a non-empty string".to_string(),
            });
        }
        Ok(())
    }
}
