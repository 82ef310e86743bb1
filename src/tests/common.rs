use crate::api::{PairSource, TokenInfo, TokenPair, TxnCount, Txns, WindowStats};
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub const BTC_PAIR: &str = "1943";

// Helper to create a BTC/USDT pair snapshot at the given price
pub fn create_test_pair(pair_address: &str, price_usd: &str) -> TokenPair {
    TokenPair {
        chain_id: "osmosis".to_string(),
        dex_id: "osmosis".to_string(),
        url: Some(format!("https://dexscreener.com/osmosis/{}", pair_address)),
        pair_address: pair_address.to_string(),
        base_token: TokenInfo {
            address: "ibc/D1542AA8762DB13087D8364F3EA6509FD6F009A34F00426AF9E4F9FA85CBBF1F".to_string(),
            name: "Wrapped Bitcoin".to_string(),
            symbol: "BTC".to_string(),
        },
        quote_token: TokenInfo {
            address: "ibc/4ABBEF4C8926DDDB320AE5188CFD63267ABBCEFC0583E4AE05D6E5AA2401DDAB".to_string(),
            name: "Tether USD".to_string(),
            symbol: "USDT".to_string(),
        },
        price_native: price_usd.to_string(),
        price_usd: price_usd.to_string(),
        txns: Txns {
            m5: TxnCount { buys: 2, sells: 1 },
            h1: TxnCount { buys: 20, sells: 18 },
            h6: TxnCount { buys: 110, sells: 97 },
            h24: TxnCount { buys: 402, sells: 388 },
        },
        volume: WindowStats {
            m5: 1_200_000.0,
            h1: 35_000_000.0,
            h6: 210_000_000.0,
            h24: 890_000_000.0,
        },
        price_change: WindowStats {
            m5: 0.05,
            h1: -0.3,
            h6: -1.1,
            h24: -2.1,
        },
        liquidity: None,
        fdv: 850_000_000_000.0,
        market_cap: 845_000_000_000.0,
    }
}

/// One scripted answer: wait `delay`, then return `result`.
pub struct Step {
    pub delay: Duration,
    pub result: Result<TokenPair, FetchError>,
}

impl Step {
    pub fn ok(price_usd: &str) -> Self {
        Self::ok_after(Duration::ZERO, price_usd)
    }

    pub fn ok_after(delay: Duration, price_usd: &str) -> Self {
        Self {
            delay,
            result: Ok(create_test_pair(BTC_PAIR, price_usd)),
        }
    }

    pub fn err(error: FetchError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }
}

/// A `PairSource` that replays scripted steps in call order and records
/// every address it was asked for. Once the script runs dry it answers
/// instantly with the requested pair at 43210.45.
#[derive(Default)]
pub struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, pair_address: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.as_str() == pair_address)
            .count()
    }
}

#[async_trait]
impl PairSource for ScriptedSource {
    async fn fetch_pair(&self, pair_address: &str) -> Result<TokenPair, FetchError> {
        self.calls.lock().unwrap().push(pair_address.to_string());
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                if !step.delay.is_zero() {
                    tokio::time::sleep(step.delay).await;
                }
                step.result
            }
            None => Ok(create_test_pair(pair_address, "43210.45")),
        }
    }

    async fn fetch_pairs(&self, addresses: &[String]) -> Result<Vec<TokenPair>, FetchError> {
        let mut pairs = Vec::with_capacity(addresses.len());
        for address in addresses {
            pairs.push(self.fetch_pair(address).await?);
        }
        Ok(pairs)
    }
}
