use crate::error::Error;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seed used when no live price has arrived yet.
pub const DEFAULT_SEED_PRICE: f64 = 2400.0;

// Walk parameters, relative to the seed: ±25 per step and a floor of 1000
// for a 2400 seed.
const STEP_FRACTION: f64 = 50.0 / DEFAULT_SEED_PRICE;
const FLOOR_FRACTION: f64 = 1000.0 / DEFAULT_SEED_PRICE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    OneHour,
    #[default]
    OneDay,
    SevenDays,
    ThirtyDays,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::OneHour,
        Timeframe::OneDay,
        Timeframe::SevenDays,
        Timeframe::ThirtyDays,
    ];

    /// Number of hourly points the chart shows.
    pub fn hours(&self) -> usize {
        match self {
            Timeframe::OneHour => 1,
            Timeframe::OneDay => 24,
            Timeframe::SevenDays => 7 * 24,
            Timeframe::ThirtyDays => 30 * 24,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1H",
            Timeframe::OneDay => "1D",
            Timeframe::SevenDays => "7D",
            Timeframe::ThirtyDays => "30D",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("unknown timeframe: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Price,
    Volume,
    Liquidity,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Price => "Price",
            ChartKind::Volume => "Volume",
            ChartKind::Liquidity => "Liquidity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
    pub liquidity: f64,
}

impl ChartPoint {
    pub fn value(&self, kind: ChartKind) -> f64 {
        match kind {
            ChartKind::Price => self.price,
            ChartKind::Volume => self.volume,
            ChartKind::Liquidity => self.liquidity,
        }
    }
}

/// Fabricates an hourly random-walk series ending at `now`.
///
/// This is decoration, not history: the only real input is `seed_price`,
/// which should be the latest live price when one is known.
pub fn generate_series<R: Rng + ?Sized>(
    timeframe: Timeframe,
    seed_price: f64,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ChartPoint> {
    let seed = if seed_price.is_finite() && seed_price > 0.0 {
        seed_price
    } else {
        DEFAULT_SEED_PRICE
    };
    let step = seed * STEP_FRACTION;
    let floor = seed * FLOOR_FRACTION;

    let points = timeframe.hours();
    let mut price = seed;
    let mut series = Vec::with_capacity(points);
    for i in 0..points {
        price += (rng.gen::<f64>() - 0.5) * step;
        // Only the plotted point is floored; the walk itself keeps going.
        series.push(ChartPoint {
            time: now - Duration::hours((points - i) as i64),
            price: price.max(floor),
            volume: rng.gen::<f64>() * 1_000_000.0,
            liquidity: rng.gen::<f64>() * 10_000_000.0 + 50_000_000.0,
        });
    }
    series
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub min: f64,
    pub max: f64,
    pub last: f64,
}

pub fn summarize(series: &[ChartPoint], kind: ChartKind) -> Option<SeriesSummary> {
    let last = series.last()?.value(kind);
    let (min, max) = series.iter().map(|p| p.value(kind)).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), v| (lo.min(v), hi.max(v)),
    );
    Some(SeriesSummary { min, max, last })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::VecDeque;

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("7d".parse::<Timeframe>().unwrap(), Timeframe::SevenDays);
        assert_eq!("30D".parse::<Timeframe>().unwrap(), Timeframe::ThirtyDays);
        assert!("2W".parse::<Timeframe>().is_err());
        assert_eq!(Timeframe::OneHour.to_string(), "1H");
    }

    #[test]
    fn test_series_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let series = generate_series(Timeframe::OneDay, 43210.45, now, &mut rng);

        assert_eq!(series.len(), 24);
        assert_eq!(series[0].time, now - Duration::hours(24));
        assert_eq!(series[23].time, now - Duration::hours(1));
        assert!(series.windows(2).all(|w| w[0].time < w[1].time));

        let floor = 43210.45 * FLOOR_FRACTION;
        for point in &series {
            assert!(point.price >= floor);
            assert!((0.0..1_000_000.0).contains(&point.volume));
            assert!((50_000_000.0..60_000_000.0).contains(&point.liquidity));
        }
        // 24 steps of at most ±450 each.
        let max_drift = 24.0 * 43210.45 * STEP_FRACTION / 2.0;
        assert!((series[23].price - 43210.45).abs() <= max_drift);
    }

    /// Replays scripted `next_u64` values, then zeros.
    struct ScriptedRng(VecDeque<u64>);

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0.pop_front().unwrap_or(0)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_floor_applies_to_points_not_the_walk() {
        // 100 steps down, then 68 steps up; each point draws price, volume, liquidity.
        let draws: VecDeque<u64> = (0..168)
            .flat_map(|i| [if i < 100 { 0 } else { u64::MAX }, 0, 0])
            .collect();
        let series = generate_series(Timeframe::SevenDays, 100.0, Utc::now(), &mut ScriptedRng(draws));

        let floor = 100.0 * FLOOR_FRACTION;
        assert!(series.iter().all(|p| p.price >= floor));
        assert_eq!(series[99].price, floor);
        // A walk clamped at the floor would climb back to about 112.5.
        let last = series[167].price;
        assert!(last > 60.0 && last < 70.0, "last = {}", last);
    }

    #[test]
    fn test_series_is_deterministic_for_a_seeded_rng() {
        let now = Utc::now();
        let a = generate_series(Timeframe::SevenDays, 100.0, now, &mut StdRng::seed_from_u64(1));
        let b = generate_series(Timeframe::SevenDays, 100.0, now, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
        assert_eq!(a.len(), 168);
    }

    #[test]
    fn test_invalid_seed_falls_back() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = generate_series(Timeframe::OneHour, f64::NAN, Utc::now(), &mut rng);
        assert_eq!(series.len(), 1);
        assert!((series[0].price - DEFAULT_SEED_PRICE).abs() <= 25.0);
    }

    #[test]
    fn test_summarize() {
        let mut rng = StdRng::seed_from_u64(11);
        let series = generate_series(Timeframe::OneDay, DEFAULT_SEED_PRICE, Utc::now(), &mut rng);
        let summary = summarize(&series, ChartKind::Price).unwrap();
        assert!(summary.min <= summary.last && summary.last <= summary.max);
        assert!(summarize(&[], ChartKind::Volume).is_none());
    }
}
