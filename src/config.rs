//! Agent configuration loaded from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::eval::EvalWeights;
use crate::rules::SwapRule;
use crate::search::SearchConfig;

/// Agent configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub search: SearchConfig,
    pub weights: EvalWeights,
    pub swap_rule: SwapRule,
    /// Seed for the opening draw; entropy when absent
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AgentConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth == 0 {
            return Err(ConfigError::Validation("search.depth must be >= 1".into()));
        }
        if self.search.threads == 0 {
            return Err(ConfigError::Validation("search.threads must be >= 1".into()));
        }
        if !self.weights.is_normalized() {
            return Err(ConfigError::Validation(format!(
                "weights must be finite, non-negative and sum to 1 (got sum {})",
                self.weights.sum()
            )));
        }
        Ok(())
    }

    /// The default configuration as TOML text.
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AgentConfig::default())?)
    }
}
