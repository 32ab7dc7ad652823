//! Timeframe filtering: a contiguous suffix of the dataset.

use crate::domain::{DataPoint, Window};

/// Return the last `window` points of `points`, or the whole slice for
/// `Window::All`. Never reorders, never pads: a 30-point window over a
/// 10-point dataset is those 10 points. The result borrows `points`, so the
/// cached dataset is never copied or mutated on this path.
pub fn filter(points: &[DataPoint], window: Window) -> &[DataPoint] {
    match window.points() {
        None => points,
        Some(n) => {
            let start = points.len().saturating_sub(n);
            &points[start..]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataOrigin;
    use chrono::{Duration, NaiveDate};

    fn dataset(n: usize) -> Vec<DataPoint> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        (0..n)
            .map(|i| DataPoint {
                date: start + Duration::days(i as i64),
                active_count: i as u32,
                price_metric: 400.0 + i as f64,
                origin: DataOrigin::Historical,
            })
            .collect()
    }

    #[test]
    fn numeric_window_takes_the_suffix() {
        let points = dataset(100);
        let filtered = filter(&points, Window::W7);

        assert_eq!(filtered.len(), 7);
        assert_eq!(filtered[0].active_count, 93);
        assert_eq!(filtered[6].active_count, 99);
        // Original order preserved, source untouched.
        assert!(filtered.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(points.len(), 100);
    }

    #[test]
    fn all_returns_everything() {
        let points = dataset(100);
        let filtered = filter(&points, Window::All);
        assert_eq!(filtered.len(), 100);
        assert_eq!(filtered[0].active_count, 0);
    }

    #[test]
    fn short_dataset_is_not_padded() {
        let points = dataset(10);
        assert_eq!(filter(&points, Window::W30).len(), 10);
        assert_eq!(filter(&[], Window::W7).len(), 0);
    }
}
