use crate::api::TokenPair;
use crate::error::FetchErrorKind;
use chrono::{DateTime, Utc};

/// Where a poller is in its fetch lifecycle.
///
/// `Idle -> Fetching -> {Ready, Errored}`, with `Ready` and `Errored` going
/// back to `Fetching` on the next tick or manual refetch. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerPhase {
    Idle,
    Fetching,
    Ready,
    Errored,
    Stopped,
}

impl PollerPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollerPhase::Stopped)
    }
}

/// The value bundle a poller publishes to its consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct LivePriceState {
    /// Most recent applied snapshot. Kept across failed fetches.
    pub data: Option<TokenPair>,
    /// True from activation until the first fetch of the current pair resolves.
    pub loading: bool,
    pub error: Option<String>,
    pub error_kind: Option<FetchErrorKind>,
    pub phase: PollerPhase,
    /// Sequence number of the fetch cycle whose result is currently applied;
    /// 0 until a cycle resolves.
    pub sequence: u64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for LivePriceState {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            error_kind: None,
            phase: PollerPhase::Idle,
            sequence: 0,
            last_updated: None,
        }
    }
}

impl LivePriceState {
    pub fn price_usd(&self) -> Option<f64> {
        self.data.as_ref().and_then(|d| d.price_usd_value())
    }

    pub fn is_stale(&self) -> bool {
        self.data.is_some() && self.error.is_some()
    }
}
