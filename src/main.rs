use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use cryptoflow::api::DexScreenerClient;
use cryptoflow::cli::Cli;
use cryptoflow::config::Config;
use cryptoflow::dashboard::Dashboard;
use cryptoflow::logging;
use cryptoflow::poller::{LivePricePoller, LivePriceState, PollerPhase};
use cryptoflow::wallet::{WalletConnector, WalletProvider, WalletStatus};

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.debug { LevelFilter::Debug } else { LevelFilter::Info };

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    if let Some(pair) = &cli.pair {
        config.poller.pair_address = pair.clone();
    }
    if let Some(ms) = cli.interval_ms {
        config.poller.refresh_interval_ms = ms;
    }
    config.validate().context("Invalid configuration")?;

    match &config.logging.log_file {
        Some(path) => logging::init_file(path, level)
            .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path, e))?,
        None => logging::init_stderr(level),
    }
    info!("Configuration loaded from {:?}", config_path);

    let client = Arc::new(DexScreenerClient::from_config(&config.dexscreener)?);

    if cli.once {
        return run_once(&client, &config.poller.pair_address).await;
    }

    let provider = if config.wallet.provider_available {
        WalletProvider::simulated()
    } else {
        WalletProvider::Unavailable
    };
    let wallet = WalletConnector::new(provider, Duration::from_millis(config.wallet.connect_delay_ms));

    let poller = LivePricePoller::new(client, config.poller.to_poller_config())?;
    poller.start()?;
    info!(
        "Polling pair {} every {} ms",
        config.poller.pair_address, config.poller.refresh_interval_ms
    );

    let (wallet_tx, wallet_rx) = mpsc::channel(1);
    if cli.connect_wallet {
        let wallet = wallet.clone();
        tokio::spawn(async move {
            let _ = wallet_tx.send(wallet.connect().await).await;
        });
    }

    let session = Session {
        poller: &poller,
        wallet: &wallet,
        dashboard: Dashboard::default(),
    };
    session
        .run(wallet_rx, cli.connect_wallet, tokio::signal::ctrl_c())
        .await;
    Ok(())
}

/// The long-running half of the binary: redraws on every snapshot until the
/// poller stops or `shutdown` resolves.
struct Session<'a> {
    poller: &'a LivePricePoller,
    wallet: &'a WalletConnector,
    dashboard: Dashboard,
}

impl Session<'_> {
    async fn run<F>(
        &self,
        mut wallet_rx: mpsc::Receiver<cryptoflow::Result<WalletStatus>>,
        mut wallet_pending: bool,
        shutdown: F,
    ) where
        F: Future,
    {
        let mut updates = self.poller.subscribe();
        // Pinned once so a signal between iterations is not lost.
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = updates.borrow_and_update().clone();
                    print_dashboard(&self.dashboard, &state, &self.wallet.status().await);
                    if state.phase == PollerPhase::Stopped {
                        break;
                    }
                }
                Some(connected) = wallet_rx.recv(), if wallet_pending => {
                    wallet_pending = false;
                    match connected {
                        Ok(status) => print_dashboard(&self.dashboard, &self.poller.state(), &status),
                        Err(e) => warn!("Wallet not connected: {}", e),
                    }
                }
                _ = &mut shutdown => {
                    info!("Shutting down...");
                    self.poller.stop();
                    break;
                }
            }
        }
    }
}

async fn run_once(client: &DexScreenerClient, pair_address: &str) -> Result<()> {
    let pair = client
        .get_pair(pair_address)
        .await
        .with_context(|| format!("Failed to fetch pair {}", pair_address))?;
    let state = LivePriceState {
        data: Some(pair),
        phase: PollerPhase::Ready,
        sequence: 1,
        last_updated: Some(chrono::Utc::now()),
        ..LivePriceState::default()
    };
    print_dashboard(&Dashboard::default(), &state, &WalletStatus::Disconnected);
    Ok(())
}

fn print_dashboard(dashboard: &Dashboard, state: &LivePriceState, wallet: &WalletStatus) {
    println!("{}", dashboard.render(state, wallet));
}
