use crate::api::{PairSource, TokenPair};
use crate::error::{Error, FetchError, Result};
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub mod state;

pub use state::{LivePriceState, PollerPhase};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(30_000);

/// Which result wins when fetch cycles resolve out of order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Results older than the last applied one are dropped.
    #[default]
    LatestRequest,
    /// Whatever resolves last is applied, even if it was requested earlier.
    LatestResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    pub pair_address: String,
    pub refresh_interval: Duration,
    pub ordering: ResponseOrdering,
}

impl PollerConfig {
    pub fn new(pair_address: impl Into<String>) -> Self {
        Self {
            pair_address: pair_address.into(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            ordering: ResponseOrdering::default(),
        }
    }

    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pair_address.trim().is_empty() {
            return Err(Error::InvalidInput("pair address is empty".into()));
        }
        if self.refresh_interval.is_zero() {
            return Err(Error::InvalidInput("refresh interval must be positive".into()));
        }
        Ok(())
    }
}

struct Shared {
    source: Arc<dyn PairSource>,
    state_tx: watch::Sender<LivePriceState>,
    config: Mutex<PollerConfig>,
    timer: Mutex<Option<JoinHandle<()>>>,
    next_sequence: AtomicU64,
    // Bumped on reconfigure/stop; cycles from an older generation are ignored.
    generation: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Shared {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Marks the start of a cycle. Returns false when the cycle is obsolete
    /// and should not hit the network at all.
    fn begin_cycle(&self, generation: u64) -> bool {
        self.state_tx.send_if_modified(|state| {
            if state.phase.is_terminal() || !self.is_current(generation) {
                return false;
            }
            state.error = None;
            state.error_kind = None;
            state.phase = PollerPhase::Fetching;
            true
        })
    }

    fn apply(
        &self,
        sequence: u64,
        generation: u64,
        ordering: ResponseOrdering,
        pair_address: &str,
        result: std::result::Result<TokenPair, FetchError>,
    ) -> bool {
        self.state_tx.send_if_modified(|state| {
            if state.phase.is_terminal() || !self.is_current(generation) {
                debug!("Discarding result of cycle {} for {}: poller moved on", sequence, pair_address);
                return false;
            }
            if ordering == ResponseOrdering::LatestRequest && sequence < state.sequence {
                debug!(
                    "Discarding stale result of cycle {} for {} (applied {})",
                    sequence, pair_address, state.sequence
                );
                return false;
            }

            match result {
                Ok(pair) => {
                    info!("Live price updated for {}: {}", pair_address, pair.price_usd);
                    state.data = Some(pair);
                    state.error = None;
                    state.error_kind = None;
                    state.phase = PollerPhase::Ready;
                    state.last_updated = Some(Utc::now());
                }
                Err(e) => {
                    warn!("Error fetching live price data for {}: {}", pair_address, e);
                    state.error = Some(e.message);
                    state.error_kind = Some(e.kind);
                    state.phase = PollerPhase::Errored;
                }
            }
            state.sequence = sequence;
            state.loading = false;
            true
        })
    }
}

async fn run_cycle(shared: Arc<Shared>, generation: u64) {
    let (pair_address, ordering) = {
        let config = lock(&shared.config);
        (config.pair_address.clone(), config.ordering)
    };
    let sequence = shared.next_sequence.fetch_add(1, Ordering::SeqCst);

    if !shared.begin_cycle(generation) {
        return;
    }

    debug!("Fetch cycle {} for {}", sequence, pair_address);
    let result = shared.source.fetch_pair(&pair_address).await;
    shared.apply(sequence, generation, ordering, &pair_address, result);
}

fn spawn_timer(shared: Arc<Shared>, refresh_interval: Duration, generation: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // The first tick completes immediately.
            ticker.tick().await;
            if !shared.is_current(generation) {
                break;
            }
            // Cycles run independently; a slow request never delays the next tick.
            tokio::spawn(run_cycle(shared.clone(), generation));
        }
    })
}

/// Keeps the latest snapshot of one pair fresh on a fixed interval.
///
/// Must be driven from inside a Tokio runtime: [`start`](Self::start),
/// [`refetch`](Self::refetch) and [`reconfigure`](Self::reconfigure) spawn tasks.
pub struct LivePricePoller {
    shared: Arc<Shared>,
}

impl LivePricePoller {
    pub fn new(source: Arc<dyn PairSource>, config: PollerConfig) -> Result<Self> {
        config.validate()?;
        let (state_tx, _) = watch::channel(LivePriceState::default());
        Ok(Self {
            shared: Arc::new(Shared {
                source,
                state_tx,
                config: Mutex::new(config),
                timer: Mutex::new(None),
                next_sequence: AtomicU64::new(1),
                generation: AtomicU64::new(0),
            }),
        })
    }

    pub fn config(&self) -> PollerConfig {
        lock(&self.shared.config).clone()
    }

    pub fn state(&self) -> LivePriceState {
        self.shared.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LivePriceState> {
        self.shared.state_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared.timer).is_some()
    }

    /// Fetches immediately, then once per refresh interval. A second call
    /// while running does nothing.
    pub fn start(&self) -> Result<()> {
        let mut timer = lock(&self.shared.timer);
        if self.shared.state_tx.borrow().phase.is_terminal() {
            return Err(Error::PollerStopped);
        }
        if timer.is_some() {
            return Ok(());
        }

        let config = self.config();
        info!(
            "Starting live price poller for {} every {}ms",
            config.pair_address,
            config.refresh_interval.as_millis()
        );
        self.shared.state_tx.send_modify(|state| state.loading = true);
        let generation = self.shared.generation.load(Ordering::SeqCst);
        *timer = Some(spawn_timer(self.shared.clone(), config.refresh_interval, generation));
        Ok(())
    }

    /// Runs one fetch cycle now, outside the timer schedule. The timer is
    /// left alone.
    pub fn refetch(&self) -> JoinHandle<()> {
        let generation = self.shared.generation.load(Ordering::SeqCst);
        tokio::spawn(run_cycle(self.shared.clone(), generation))
    }

    /// Switches pair and/or interval. A running poller cancels its timer and
    /// starts over with an immediate fetch; results still in flight for the
    /// old settings are dropped.
    pub fn reconfigure(&self, pair_address: impl Into<String>, refresh_interval: Duration) -> Result<()> {
        let mut timer = lock(&self.shared.timer);
        if self.shared.state_tx.borrow().phase.is_terminal() {
            return Err(Error::PollerStopped);
        }

        let next = {
            let current = lock(&self.shared.config);
            PollerConfig {
                pair_address: pair_address.into(),
                refresh_interval,
                ordering: current.ordering,
            }
        };
        next.validate()?;
        if next == *lock(&self.shared.config) {
            debug!("Reconfigure for {} changes nothing; keeping the current timer", next.pair_address);
            return Ok(());
        }

        let was_running = match timer.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        };
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let pair_changed = {
            let mut current = lock(&self.shared.config);
            let changed = current.pair_address != next.pair_address;
            *current = next.clone();
            changed
        };

        self.shared.state_tx.send_modify(|state| {
            if pair_changed {
                state.data = None;
                state.error = None;
                state.error_kind = None;
                state.last_updated = None;
                state.phase = PollerPhase::Idle;
            }
            if was_running && (pair_changed || state.data.is_none()) {
                state.loading = true;
            }
        });

        if was_running {
            info!(
                "Restarting live price poller for {} every {}ms",
                next.pair_address,
                next.refresh_interval.as_millis()
            );
            *timer = Some(spawn_timer(self.shared.clone(), next.refresh_interval, generation));
        }
        Ok(())
    }

    /// Cancels the timer and freezes the state. Requests already in flight
    /// finish on their own; their results are dropped.
    pub fn stop(&self) {
        let mut timer = lock(&self.shared.timer);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        self.shared.state_tx.send_if_modified(|state| {
            if state.phase.is_terminal() {
                return false;
            }
            state.phase = PollerPhase::Stopped;
            state.loading = false;
            true
        });
    }
}

impl Drop for LivePricePoller {
    fn drop(&mut self) {
        self.stop();
    }
}
