use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless DexScreener price dashboard", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)] // default handled in main.rs
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Pair address to follow, overrides the config file
    #[arg(short, long)]
    pub pair: Option<String>,

    /// Refresh interval in milliseconds, overrides the config file
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Fetch once, print the result and exit
    #[arg(long)]
    pub once: bool,

    /// Connect the wallet on startup
    #[arg(long)]
    pub connect_wallet: bool,
}
