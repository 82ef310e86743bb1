use crate::api::types::{DexScreenerResponse, TokenPair};
use crate::api::PairSource;
use crate::config::DexScreenerConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

pub const API_BASE_URL: &str = "https://api.dexscreener.com/latest/dex";
pub const DEFAULT_CHAIN: &str = "osmosis";

/// Thin client over DexScreener's `/pairs/{chain}/{address}` endpoint.
///
/// One request per call: no retry, no caching, no cancellation.
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
    chain: String,
}

impl Default for DexScreenerClient {
    fn default() -> Self {
        Self::new(API_BASE_URL, DEFAULT_CHAIN)
    }
}

impl DexScreenerClient {
    pub fn new(base_url: impl Into<String>, chain: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, chain)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, chain: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chain: chain.into(),
        }
    }

    pub fn from_config(config: &DexScreenerConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, &config.base_url, &config.chain))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn pairs_url(&self, addresses: &str) -> String {
        format!("{}/pairs/{}/{}", self.base_url, self.chain, addresses)
    }

    async fn request(&self, addresses: &str) -> Result<Vec<TokenPair>, FetchError> {
        let url = self.pairs_url(addresses);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_pairs_body(&body)
    }

    /// Fetches a single pair; zero matches is an [`EmptyResult`](crate::error::FetchErrorKind::EmptyResult).
    pub async fn get_pair(&self, pair_address: &str) -> Result<TokenPair, FetchError> {
        self.request(pair_address)
            .await?
            .into_iter()
            .next()
            .ok_or_else(FetchError::empty_result)
    }

    /// Fetches several pairs in one request; the addresses are comma-joined
    /// into a single path segment.
    pub async fn get_pairs(&self, addresses: &[String]) -> Result<Vec<TokenPair>, FetchError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }
        self.request(&addresses.join(",")).await
    }
}

/// Decodes a `/pairs` response body into its list of pairs.
pub fn parse_pairs_body(body: &str) -> Result<Vec<TokenPair>, FetchError> {
    let envelope: DexScreenerResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::parse(format!("Failed to parse response: {}", e)))?;
    Ok(envelope.into_pairs())
}

#[async_trait]
impl PairSource for DexScreenerClient {
    async fn fetch_pair(&self, pair_address: &str) -> Result<TokenPair, FetchError> {
        self.get_pair(pair_address).await
    }

    async fn fetch_pairs(&self, addresses: &[String]) -> Result<Vec<TokenPair>, FetchError> {
        self.get_pairs(addresses).await
    }
}
