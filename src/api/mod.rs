use crate::error::FetchError;
use async_trait::async_trait;
use log::error;

pub mod dexscreener;
pub mod types;

pub use dexscreener::DexScreenerClient;
pub use types::{DexScreenerResponse, Liquidity, TokenInfo, TokenPair, TxnCount, Txns, Window, WindowStats};

/// Anything that can answer "what does this pair look like right now".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PairSource: Send + Sync {
    async fn fetch_pair(&self, pair_address: &str) -> Result<TokenPair, FetchError>;

    async fn fetch_pairs(&self, addresses: &[String]) -> Result<Vec<TokenPair>, FetchError>;
}

/// Fetches one pair, logging and swallowing any failure.
///
/// "No such pair", "network down" and "malformed response" all come back as
/// `None`; call [`PairSource::fetch_pair`] directly to tell them apart.
pub async fn fetch_token_pair_data<S>(source: &S, pair_address: &str) -> Option<TokenPair>
where
    S: PairSource + ?Sized,
{
    match source.fetch_pair(pair_address).await {
        Ok(pair) => Some(pair),
        Err(e) => {
            error!("Error fetching token pair data for {}: {}", pair_address, e);
            None
        }
    }
}

/// Fetches several pairs, logging any failure and returning an empty list.
pub async fn fetch_multiple_token_pairs<S>(source: &S, addresses: &[String]) -> Vec<TokenPair>
where
    S: PairSource + ?Sized,
{
    match source.fetch_pairs(addresses).await {
        Ok(pairs) => pairs,
        Err(e) => {
            error!("Error fetching multiple token pairs: {}", e);
            Vec::new()
        }
    }
}
