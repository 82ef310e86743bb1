//! Installs the crate's file logger globally, so it lives in its own test
//! binary with a single test.

mod common;

use common::{base_url, dex_server, local_client, PAIR_PATH};
use cryptoflow::api::fetch_token_pair_data;
use cryptoflow::logging;
use log::LevelFilter;
use std::path::Path;

fn error_lines(log_path: &Path) -> Vec<String> {
    log::logger().flush();
    std::fs::read_to_string(log_path)
        .unwrap()
        .lines()
        .filter(|l| l.contains("[ERROR]"))
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_failed_fetch_is_absent_and_logged_once() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("cryptoflow.log");
    logging::init_file(log_path.to_str().unwrap(), LevelFilter::Error).unwrap();

    let server = dex_server(PAIR_PATH, 500, r#"{"error":"boom"}"#).await;
    let client = local_client(base_url(&server));
    assert!(fetch_token_pair_data(&client, "1943").await.is_none());

    let errors = error_lines(&log_path);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(errors[0].ends_with(
        "[ERROR] cryptoflow::api: Error fetching token pair data for 1943: HTTP error! status: 500"
    ));

    let server = dex_server(PAIR_PATH, 200, "<html>rate limited</html>").await;
    let client = local_client(base_url(&server));
    assert!(fetch_token_pair_data(&client, "1943").await.is_none());

    let errors = error_lines(&log_path);
    assert_eq!(errors.len(), 2, "{:?}", errors);
    assert!(errors[1].contains("cryptoflow::api: Error fetching token pair data for 1943: Failed to parse response"));
}
