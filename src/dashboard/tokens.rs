use crate::api::TokenPair;
use crate::dashboard::format::format_volume;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopToken {
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
    /// Pre-formatted 24h volume, e.g. `1.2B`.
    pub volume: String,
    /// True once the row has been overwritten from a live pair snapshot.
    pub live: bool,
}

impl TopToken {
    fn fixture(symbol: &str, price: f64, change_24h: f64, volume: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
            change_24h,
            volume: volume.to_string(),
            live: false,
        }
    }

    pub fn is_gain(&self) -> bool {
        self.change_24h >= 0.0
    }
}

/// The static "Top Tokens" table.
pub fn top_tokens() -> Vec<TopToken> {
    vec![
        TopToken::fixture("ETH/USDT", 2456.78, 5.2, "1.2B"),
        TopToken::fixture("BTC/USDT", 43210.45, -2.1, "890M"),
        TopToken::fixture("UNI/USDT", 12.34, 8.7, "156M"),
        TopToken::fixture("LINK/USDT", 18.92, 3.4, "98M"),
        TopToken::fixture("AAVE/USDT", 156.78, -1.2, "67M"),
    ]
}

/// Overlays the live pair onto the row with the same symbol. Rows with no
/// match are left alone, as is the whole table when the price is unparseable.
pub fn with_live_pair(mut tokens: Vec<TopToken>, pair: &TokenPair) -> Vec<TopToken> {
    let Some(price) = pair.price_usd_value() else {
        return tokens;
    };
    let symbol = pair.symbol();
    for token in tokens.iter_mut().filter(|t| t.symbol.eq_ignore_ascii_case(&symbol)) {
        token.price = price;
        token.change_24h = pair.price_change.h24;
        token.volume = format_volume(pair.volume.h24);
        token.live = true;
    }
    tokens
}

/// Case-insensitive substring filter on the symbol. A blank query keeps
/// every row.
pub fn search<'a>(tokens: &'a [TopToken], query: &str) -> Vec<&'a TopToken> {
    let needle = query.trim().to_lowercase();
    tokens
        .iter()
        .filter(|t| needle.is_empty() || t.symbol.to_lowercase().contains(&needle))
        .collect()
}
