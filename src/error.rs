use std::io;
use std::result::Result as StdResult;
use thiserror::Error;

/// Why a DexScreener fetch failed.
///
/// Every failure the fetcher can see falls into one of these buckets, so
/// callers can branch on the cause instead of parsing a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Network unreachable, DNS failure, connection refused or timeout.
    Transport,
    /// The server answered with a non-2xx status.
    HttpStatus(u16),
    /// A well-formed response that contained no pairs.
    EmptyResult,
    /// The body was not the expected JSON envelope.
    Parse,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Transport, message)
    }

    pub fn http_status(status: u16) -> Self {
        Self::new(
            FetchErrorKind::HttpStatus(status),
            format!("HTTP error! status: {}", status),
        )
    }

    pub fn empty_result() -> Self {
        Self::new(FetchErrorKind::EmptyResult, "No data found for this pair")
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Parse, message)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::http_status(status.as_u16())
        } else {
            FetchError::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Poller has been stopped")]
    PollerStopped,
    #[error("Wallet provider unavailable")]
    WalletUnavailable,
    #[error("Wallet error: {0}")]
    WalletError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

pub type Result<T> = StdResult<T, Error>;
