use crate::api::dexscreener::{API_BASE_URL, DEFAULT_CHAIN};
use crate::error::Result;
use crate::poller::{PollerConfig, ResponseOrdering};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PAIR_ADDRESS: &str = "1943";
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_CONNECT_DELAY_MS: u64 = 2_000;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dexscreener: DexScreenerConfig,
    pub poller: PollerSettings,
    pub wallet: WalletConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DexScreenerConfig {
    pub base_url: String,
    pub chain: String,
    /// Leave unset to use the HTTP client's own default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            chain: DEFAULT_CHAIN.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PollerSettings {
    pub pair_address: String,
    pub refresh_interval_ms: u64,
    pub ordering: ResponseOrdering,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            pair_address: DEFAULT_PAIR_ADDRESS.to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            ordering: ResponseOrdering::default(),
        }
    }
}

impl PollerSettings {
    pub fn to_poller_config(&self) -> PollerConfig {
        PollerConfig {
            pair_address: self.pair_address.clone(),
            refresh_interval: Duration::from_millis(self.refresh_interval_ms),
            ordering: self.ordering,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WalletConfig {
    pub provider_available: bool,
    pub connect_delay_ms: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            provider_available: true,
            connect_delay_ms: DEFAULT_CONNECT_DELAY_MS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// When set, log lines go to this file instead of stderr.
    pub log_file: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.poller.to_poller_config().validate()?;
        if self.dexscreener.base_url.trim().is_empty() {
            return Err(crate::Error::ConfigError("dexscreener.base_url is empty".into()));
        }
        if self.dexscreener.chain.trim().is_empty() {
            return Err(crate::Error::ConfigError("dexscreener.chain is empty".into()));
        }
        Ok(())
    }
}
