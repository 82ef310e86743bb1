use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub const SIMULATED_ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f4b2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: String,
    pub network: String,
    pub balance: Balance,
}

impl WalletAccount {
    /// `0x742d...4b2` style abbreviation for display.
    pub fn short_address(&self) -> String {
        let chars: Vec<char> = self.address.chars().collect();
        if chars.len() <= 9 {
            return self.address.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

/// Whatever a wallet extension exposes to us.
#[async_trait]
pub trait WalletHandle: Send + Sync {
    async fn account(&self) -> Result<WalletAccount>;
}

/// Stands in for a browser wallet: always returns the same demo account.
#[derive(Debug, Clone, Default)]
pub struct SimulatedWallet;

#[async_trait]
impl WalletHandle for SimulatedWallet {
    async fn account(&self) -> Result<WalletAccount> {
        Ok(WalletAccount {
            address: SIMULATED_ADDRESS.to_string(),
            network: "Ethereum".to_string(),
            balance: Balance {
                asset: "ETH".to_string(),
                total: 3.2,
            },
        })
    }
}

/// Capability handed to the connector instead of probing for a global
/// wallet object.
#[derive(Clone)]
pub enum WalletProvider {
    Available(Arc<dyn WalletHandle>),
    Unavailable,
}

impl WalletProvider {
    pub fn simulated() -> Self {
        WalletProvider::Available(Arc::new(SimulatedWallet))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, WalletProvider::Available(_))
    }
}

impl std::fmt::Debug for WalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletProvider::Available(_) => f.write_str("Available"),
            WalletProvider::Unavailable => f.write_str("Unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WalletStatus {
    Disconnected,
    Connecting,
    Connected(WalletAccount),
}

impl WalletStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletStatus::Connected(_))
    }
}

#[derive(Debug, Clone)]
pub struct WalletConnector {
    provider: WalletProvider,
    connect_delay: Duration,
    status: Arc<RwLock<WalletStatus>>,
}

impl WalletConnector {
    pub fn new(provider: WalletProvider, connect_delay: Duration) -> Self {
        Self {
            provider,
            connect_delay,
            status: Arc::new(RwLock::new(WalletStatus::Disconnected)),
        }
    }

    pub async fn status(&self) -> WalletStatus {
        self.status.read().await.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.status.read().await.is_connected()
    }

    /// Connects through the injected provider after the simulated delay.
    /// Already connected, or a connect already underway, returns the
    /// current status unchanged.
    pub async fn connect(&self) -> Result<WalletStatus> {
        let handle = match &self.provider {
            WalletProvider::Available(handle) => handle.clone(),
            WalletProvider::Unavailable => {
                warn!("Wallet connect requested but no provider is available");
                return Err(Error::WalletUnavailable);
            }
        };

        {
            let mut status = self.status.write().await;
            if *status != WalletStatus::Disconnected {
                return Ok(status.clone());
            }
            *status = WalletStatus::Connecting;
        }

        info!("Connecting wallet...");
        tokio::time::sleep(self.connect_delay).await;

        let result = handle.account().await;
        let mut status = self.status.write().await;
        match result {
            Ok(account) => {
                info!("Wallet connected: {} on {}", account.short_address(), account.network);
                *status = WalletStatus::Connected(account);
                Ok(status.clone())
            }
            Err(e) => {
                warn!("Wallet connection failed: {}", e);
                *status = WalletStatus::Disconnected;
                Err(e)
            }
        }
    }

    pub async fn disconnect(&self) {
        let mut status = self.status.write().await;
        if status.is_connected() {
            info!("Wallet disconnected");
        }
        *status = WalletStatus::Disconnected;
    }
}
