use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::controller::ControllerConfig;
use crate::domain::constants::DEFAULT_POLL_INTERVAL_SECS;
use crate::domain::model::order::AccountContext;

/// Top-level configuration structure containing all config sections
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Order API connection settings. The token is read from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub host: Option<String>,
}

/// Defaults applied to every new order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountConfig {
    pub account: Option<String>,
    pub exec_broker: Option<String>,
    pub entity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_enabled() -> bool {
    true
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            enabled: default_enabled(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config_str = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&config_str)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        info!("Loaded configuration from {}", path.display());
        debug!("Polling every {}s (enabled: {})", config.polling.interval_secs, config.polling.enabled);

        Ok(config)
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(config_str)?;
        if config.polling.interval_secs == 0 {
            return Err(anyhow!("polling.interval_secs must be greater than zero"));
        }
        Ok(config)
    }

    /// Controller settings derived from this file
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            host: self.api.host.clone(),
            context: AccountContext {
                account: self.account.account.clone(),
                exec_broker: self.account.exec_broker.clone(),
                entity: self.account.entity.clone(),
            },
            poll_interval: Duration::from_secs(self.polling.interval_secs),
            polling_enabled: self.polling.enabled,
        }
    }
}
