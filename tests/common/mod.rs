#![allow(dead_code)]

use cryptoflow::api::DexScreenerClient;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PAIR_PATH: &str = "/latest/dex/pairs/osmosis/1943";

/// Starts a mock DexScreener answering `GET route` with `status` and `body`.
pub async fn dex_server(route: &str, status: u16, body: impl Into<String>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.into(), "application/json"))
        .mount(&server)
        .await;
    server
}

/// Base URL shaped like DexScreener's `/latest/dex` root.
pub fn base_url(server: &MockServer) -> String {
    format!("{}/latest/dex", server.uri())
}

/// Client pointed at a local server; system proxies are bypassed.
pub fn local_client(base_url: impl Into<String>) -> DexScreenerClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    DexScreenerClient::with_client(http, base_url, "osmosis")
}

/// Paths of every request the mock server has seen, in order.
pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

/// A base URL nothing is listening on.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/latest/dex", addr)
}

pub fn pair_json(pair_address: &str, base: &str, price_usd: &str) -> String {
    format!(
        r#"{{
            "chainId": "osmosis",
            "dexId": "osmosis",
            "url": "https://dexscreener.com/osmosis/{addr}",
            "pairAddress": "{addr}",
            "baseToken": {{ "address": "ibc/{base}", "name": "{base}", "symbol": "{base}" }},
            "quoteToken": {{ "address": "ibc/USDT", "name": "Tether USD", "symbol": "USDT" }},
            "priceNative": "{price}",
            "priceUsd": "{price}",
            "txns": {{
                "m5": {{ "buys": 2, "sells": 1 }},
                "h1": {{ "buys": 20, "sells": 18 }},
                "h6": {{ "buys": 110, "sells": 97 }},
                "h24": {{ "buys": 402, "sells": 388 }}
            }},
            "volume": {{ "m5": 1200000, "h1": 35000000, "h6": 210000000, "h24": 890000000 }},
            "priceChange": {{ "m5": 0.05, "h1": -0.3, "h6": -1.1, "h24": -2.1 }},
            "liquidity": {{ "usd": 54000000.5, "base": 620.2, "quote": 27000000 }},
            "fdv": 850000000000,
            "marketCap": 845000000000
        }}"#,
        addr = pair_address,
        base = base,
        price = price_usd
    )
}

pub fn pairs_body(pairs: &[String]) -> String {
    format!(r#"{{ "schemaVersion": "1.0.0", "pairs": [{}] }}"#, pairs.join(","))
}
