//! Summary statistics derived from the cached dataset.
//!
//! Derivation stays separate from formatting (`report::format`) so the math
//! is testable without string comparisons and output changes stay localized.

use crate::domain::{DataPoint, MarketStats, WindowSummary};

pub mod format;

/// How many points back the headline percent change looks.
pub const CHANGE_LOOKBACK: usize = 30;

/// Headline stats from the full dataset: latest values plus the trailing
/// percent change. `None` on an empty dataset — the caller leaves the
/// displayed statistics untouched rather than rendering an invalid value.
pub fn derive_stats(points: &[DataPoint]) -> Option<MarketStats> {
    let latest = points.last()?;

    // "30 points back", clamped to the first point for short datasets.
    let reference = &points[points.len().saturating_sub(CHANGE_LOOKBACK + 1)];

    // A zero reference would divide to a non-finite value; report the change
    // as unavailable instead of propagating it.
    let percent_change_30 = if reference.price_metric > 0.0 {
        Some((latest.price_metric - reference.price_metric) / reference.price_metric * 100.0)
    } else {
        None
    };

    Some(MarketStats {
        latest_count: latest.active_count,
        latest_price: latest.price_metric,
        latest_date: latest.date,
        percent_change_30,
    })
}

/// Aggregates over a displayed window: average listings, price range, and
/// start-to-end change. `None` on an empty window.
pub fn summarize(points: &[DataPoint]) -> Option<WindowSummary> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let avg_count = points.iter().map(|p| p.active_count as f64).sum::<f64>() / n;
    let avg_price = points.iter().map(|p| p.price_metric).sum::<f64>() / n;

    let min_price = points
        .iter()
        .map(|p| p.price_metric)
        .fold(f64::INFINITY, f64::min);
    let max_price = points
        .iter()
        .map(|p| p.price_metric)
        .fold(f64::NEG_INFINITY, f64::max);

    let first = points[0].price_metric;
    let last = points[points.len() - 1].price_metric;
    let change_percent = if first > 0.0 {
        Some((last - first) / first * 100.0)
    } else {
        None
    };

    Some(WindowSummary {
        n_points: points.len(),
        avg_count,
        avg_price,
        min_price,
        max_price,
        change_percent,
    })
}
