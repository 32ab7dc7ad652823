//! Synthetic fallback dataset, used whenever the remote feed is unreachable.
//!
//! The shape mimics a slow inventory cycle with a gently rising price trend:
//! deterministic sine/drift components plus a small uniform jitter. Tests
//! assert the trend exactly and only tolerate the jitter band.

use chrono::Duration;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::{DataOrigin, DataPoint};

/// Default span of the generated history, in days back from today.
pub const DEFAULT_DAYS_BACK: u32 = 90;

/// Offsets greater than this are labeled `historical`, the rest `scraped`.
/// A fabricated provenance split, not a data-quality claim.
const SCRAPED_BOUNDARY: u32 = 30;

/// Generate `days_back + 1` points, one per calendar day, ending today.
pub fn generate(days_back: u32) -> Vec<DataPoint> {
    generate_with(days_back, &mut StdRng::from_entropy())
}

/// Rng-parameterised core so tests can pin the jitter.
pub fn generate_with<R: Rng>(days_back: u32, rng: &mut R) -> Vec<DataPoint> {
    let today = chrono::Local::now().date_naive();
    let mut points = Vec::with_capacity(days_back as usize + 1);

    for i in (0..=days_back).rev() {
        let date = today - Duration::days(i as i64);

        let count = count_trend(i) + rng.gen_range(-1.5..=1.5);
        let active_count = count.round().max(0.0) as u32;

        let price = price_trend(days_back, i) + rng.gen_range(-2.5..=2.5);
        let price_metric = ((price * 100.0).round() / 100.0).max(0.0);

        let origin = if i > SCRAPED_BOUNDARY {
            DataOrigin::Historical
        } else {
            DataOrigin::Scraped
        };

        points.push(DataPoint {
            date,
            active_count,
            price_metric,
            origin,
        });
    }

    points
}

/// Deterministic listing-count trend at offset `i` (days before today).
fn count_trend(i: u32) -> f64 {
    45.0 + 5.0 * (i as f64 / 15.0).sin()
}

/// Deterministic price trend at offset `i`: linear drift plus a slow cycle.
fn price_trend(days_back: u32, i: u32) -> f64 {
    450.0 + 0.5 * (days_back - i) as f64 + 10.0 * (i as f64 / 10.0).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn generates_one_point_per_day_ending_today() {
        let points = generate_with(90, &mut seeded());
        assert_eq!(points.len(), 91);

        let today = chrono::Local::now().date_naive();
        assert_eq!(points.last().unwrap().date, today);
        for w in points.windows(2) {
            assert_eq!(
                w[1].date - w[0].date,
                Duration::days(1),
                "dates must increase by exactly one day"
            );
        }
    }

    #[test]
    fn origin_splits_at_offset_30() {
        let points = generate_with(90, &mut seeded());
        // Offsets 90..=31 (first 60 points) are historical, 30..=0 scraped.
        for (idx, p) in points.iter().enumerate() {
            let expected = if idx < 60 {
                DataOrigin::Historical
            } else {
                DataOrigin::Scraped
            };
            assert_eq!(p.origin, expected, "origin mismatch at index {idx}");
        }
    }

    #[test]
    fn values_stay_within_the_jitter_band() {
        let days_back = 90u32;
        let points = generate_with(days_back, &mut seeded());

        for (idx, p) in points.iter().enumerate() {
            let i = days_back - idx as u32;

            // Count jitter is ±1.5, plus up to 0.5 from rounding.
            let diff = (p.active_count as f64 - count_trend(i)).abs();
            assert!(diff <= 2.0, "count off trend by {diff} at offset {i}");

            // Price jitter is ±2.5, plus rounding to two decimals.
            let diff = (p.price_metric - price_trend(days_back, i)).abs();
            assert!(diff <= 2.51, "price off trend by {diff} at offset {i}");

            // Two-decimal precision expected downstream.
            let scaled = p.price_metric * 100.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-6,
                "price {} not rounded to cents",
                p.price_metric
            );
        }
    }

    #[test]
    fn short_span_is_all_scraped() {
        let points = generate_with(10, &mut seeded());
        assert_eq!(points.len(), 11);
        assert!(points.iter().all(|p| p.origin == DataOrigin::Scraped));
    }
}
