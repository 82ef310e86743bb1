use serde::{Deserialize, Serialize};

/// Lookback windows DexScreener buckets its statistics by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Window {
    M5,
    H1,
    H6,
    H24,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnCount {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
}

impl TxnCount {
    pub fn total(&self) -> u64 {
        self.buys + self.sells
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Txns {
    pub m5: TxnCount,
    pub h1: TxnCount,
    pub h6: TxnCount,
    pub h24: TxnCount,
}

impl Txns {
    pub fn get(&self, window: Window) -> TxnCount {
        match window {
            Window::M5 => self.m5,
            Window::H1 => self.h1,
            Window::H6 => self.h6,
            Window::H24 => self.h24,
        }
    }
}

/// A per-window numeric figure: USD volume or percent price change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowStats {
    pub m5: f64,
    pub h1: f64,
    pub h6: f64,
    pub h24: f64,
}

impl WindowStats {
    pub fn get(&self, window: Window) -> f64 {
        match window {
            Window::M5 => self.m5,
            Window::H1 => self.h1,
            Window::H6 => self.h6,
            Window::H24 => self.h24,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Liquidity {
    pub usd: f64,
    pub base: f64,
    pub quote: f64,
}

/// One trading pair as DexScreener reports it.
///
/// Prices stay as the decimal strings the API sends; use
/// [`TokenPair::price_usd_value`] when a number is needed for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub chain_id: String,
    pub dex_id: String,
    #[serde(default)]
    pub url: Option<String>,
    pub pair_address: String,
    pub base_token: TokenInfo,
    pub quote_token: TokenInfo,
    pub price_native: String,
    pub price_usd: String,
    #[serde(default)]
    pub txns: Txns,
    #[serde(default)]
    pub volume: WindowStats,
    #[serde(default)]
    pub price_change: WindowStats,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub fdv: f64,
    #[serde(default)]
    pub market_cap: f64,
}

impl TokenPair {
    pub fn price_usd_value(&self) -> Option<f64> {
        self.price_usd.trim().parse::<f64>().ok().filter(|p| p.is_finite())
    }

    pub fn price_native_value(&self) -> Option<f64> {
        self.price_native.trim().parse::<f64>().ok().filter(|p| p.is_finite())
    }

    /// `BASE/QUOTE`, e.g. `BTC/USDT`.
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.base_token.symbol, self.quote_token.symbol)
    }
}

/// The envelope every `/pairs` endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexScreenerResponse {
    pub schema_version: String,
    // DexScreener sends `"pairs": null` when nothing matches.
    #[serde(default)]
    pub pairs: Option<Vec<TokenPair>>,
}

impl DexScreenerResponse {
    pub fn into_pairs(self) -> Vec<TokenPair> {
        self.pairs.unwrap_or_default()
    }
}
