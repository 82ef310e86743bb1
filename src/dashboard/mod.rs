//! Plain-text presentation of the live price snapshot and the static panels
//! around it. Nothing here fetches; it only reads a [`LivePriceState`].

use crate::poller::{LivePriceState, PollerPhase};
use crate::wallet::WalletStatus;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Write;

pub mod alerts;
pub mod chart;
pub mod format;
pub mod market;
pub mod portfolio;
pub mod tokens;

pub use alerts::{Alert, AlertKind, AlertsPanel, Severity};
pub use chart::{ChartKind, ChartPoint, Timeframe};
pub use market::MarketStat;
pub use portfolio::{Holding, PortfolioSummary};
pub use tokens::TopToken;

use chart::{generate_series, summarize, DEFAULT_SEED_PRICE};
use format::{format_change, format_price, format_value};

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 48;

/// View settings plus the one piece of interactive state (the alerts toggle).
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub timeframe: Timeframe,
    pub chart_kind: ChartKind,
    pub search: String,
    pub alerts: AlertsPanel,
}

impl Dashboard {
    pub fn new(timeframe: Timeframe, chart_kind: ChartKind) -> Self {
        Self {
            timeframe,
            chart_kind,
            ..Self::default()
        }
    }

    pub fn render(&self, state: &LivePriceState, wallet: &WalletStatus) -> String {
        self.render_at(state, wallet, Utc::now())
    }

    /// Renders with an explicit clock so output is reproducible.
    pub fn render_at(&self, state: &LivePriceState, wallet: &WalletStatus, now: DateTime<Utc>) -> String {
        let mut out = String::new();
        self.write_header(&mut out, wallet);
        self.write_live(&mut out, state);
        self.write_market(&mut out);
        self.write_chart(&mut out, state, now);
        self.write_tokens(&mut out, state);
        self.write_alerts(&mut out);
        if let WalletStatus::Connected(_) = wallet {
            self.write_portfolio(&mut out);
        }
        out
    }

    fn write_header(&self, out: &mut String, wallet: &WalletStatus) {
        let wallet_label = match wallet {
            WalletStatus::Disconnected => "Connect Wallet".to_string(),
            WalletStatus::Connecting => "Connecting...".to_string(),
            WalletStatus::Connected(account) => format!(
                "{} ({} {:.1} {})",
                account.short_address(),
                account.network,
                account.balance.total,
                account.balance.asset
            ),
        };
        let _ = writeln!(out, "CryptoFlow  [{}]", wallet_label);
        let _ = writeln!(out);
    }

    fn write_live(&self, out: &mut String, state: &LivePriceState) {
        let _ = writeln!(out, "== Live Price ==");
        match (&state.data, state.loading) {
            (None, true) => {
                let _ = writeln!(out, "Loading...");
            }
            (None, false) => {
                let _ = writeln!(out, "No data");
            }
            (Some(pair), _) => {
                let price = pair
                    .price_usd_value()
                    .map(format_price)
                    .unwrap_or_else(|| pair.price_usd.clone());
                let _ = writeln!(
                    out,
                    "{}  {}  {} (24h)  vol {}",
                    pair.symbol(),
                    price,
                    format_change(pair.price_change.h24),
                    format::format_volume(pair.volume.h24)
                );
                if let Some(updated) = state.last_updated {
                    let _ = writeln!(out, "updated {} (#{})", updated.format("%H:%M:%S"), state.sequence);
                }
            }
        }
        if let Some(err) = &state.error {
            let prefix = if state.is_stale() { "stale: " } else { "" };
            let _ = writeln!(out, "{}Error: {}", prefix, err);
        }
        if state.phase == PollerPhase::Stopped {
            let _ = writeln!(out, "(polling stopped)");
        }
        let _ = writeln!(out);
    }

    fn write_market(&self, out: &mut String) {
        let _ = writeln!(out, "== Market Overview ==");
        for stat in market::market_overview() {
            let _ = writeln!(out, "{:<20} {:>10} {:>8}", stat.title, stat.value, stat.change);
        }
        let _ = writeln!(out);
    }

    fn write_chart(&self, out: &mut String, state: &LivePriceState, now: DateTime<Utc>) {
        let seed = state.price_usd().unwrap_or(DEFAULT_SEED_PRICE);
        // Reseeding from the sequence keeps the chart stable between snapshots.
        let mut rng = StdRng::seed_from_u64(state.sequence);
        let series = generate_series(self.timeframe, seed, now, &mut rng);

        let _ = writeln!(out, "== {} Chart ({}) ==", self.chart_kind.label(), self.timeframe);
        let values: Vec<f64> = series.iter().map(|p| p.value(self.chart_kind)).collect();
        let _ = writeln!(out, "{}", sparkline(&values, SPARK_WIDTH));
        if let Some(summary) = summarize(&series, self.chart_kind) {
            let _ = writeln!(
                out,
                "low {}  high {}  last {}",
                format_value(self.chart_kind, summary.min),
                format_value(self.chart_kind, summary.max),
                format_value(self.chart_kind, summary.last)
            );
        }
        let _ = writeln!(out);
    }

    fn write_tokens(&self, out: &mut String, state: &LivePriceState) {
        let mut rows = tokens::top_tokens();
        if let Some(pair) = &state.data {
            rows = tokens::with_live_pair(rows, pair);
        }
        let _ = writeln!(out, "== Top Tokens ==");
        let matches = tokens::search(&rows, &self.search);
        if matches.is_empty() {
            let _ = writeln!(out, "No tokens match \"{}\"", self.search);
        }
        for token in matches {
            let _ = writeln!(
                out,
                "{:<10} {:>12} {:>7} {:>6}{}",
                token.symbol,
                format_price(token.price),
                format_change(token.change_24h),
                token.volume,
                if token.live { "  LIVE" } else { "" }
            );
        }
        let _ = writeln!(out);
    }

    fn write_alerts(&self, out: &mut String) {
        let _ = writeln!(out, "== Alerts ==");
        for alert in self.alerts.visible() {
            let _ = writeln!(
                out,
                "[{}] {}: {} ({})",
                alert.severity,
                alert.token,
                alert.message,
                alert.time_label()
            );
        }
        if let Some(label) = self.alerts.toggle_label() {
            let _ = writeln!(out, "{}", label);
        }
        let _ = writeln!(out);
    }

    fn write_portfolio(&self, out: &mut String) {
        let portfolio = portfolio::sample_portfolio();
        let _ = writeln!(out, "== Portfolio ==");
        let _ = writeln!(
            out,
            "Total {}  {} (24h)",
            format_price(portfolio.total_value()),
            format_change(portfolio.change_24h)
        );
        for h in &portfolio.holdings {
            let _ = writeln!(
                out,
                "{:<5} {:>3.0}%  {:>7} {}",
                h.token,
                h.allocation,
                h.amount,
                format_price(h.value_usd)
            );
        }
    }
}

/// Squeezes `values` into at most `width` bars.
fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let chunk = values.len().div_ceil(width);
    let buckets: Vec<f64> = values
        .chunks(chunk)
        .map(|c| c.iter().sum::<f64>() / c.len() as f64)
        .collect();
    let lo = buckets.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = buckets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;
    buckets
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                SPARK[SPARK.len() / 2]
            } else {
                let idx = ((v - lo) / span * (SPARK.len() - 1) as f64).round() as usize;
                SPARK[idx.min(SPARK.len() - 1)]
            }
        })
        .collect()
}
