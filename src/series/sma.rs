//! Simple moving average with a length-preserving output.

/// Trailing `period`-point mean of `values`.
///
/// The output always has the same length as the input: indices with fewer
/// than `period` values of history are `None` (the warm-up prefix), so the
/// overlay stays index-aligned with the base series. A period longer than
/// the input yields all `None`, which callers treat as "overlay not
/// renderable" rather than drawing an empty line.
///
/// `period == 0` is a caller-contract violation; the composer never asks for
/// it. It is answered with all `None` instead of a panic.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < period {
            out.push(None);
        } else {
            let sum: f64 = values[i + 1 - period..=i].iter().sum();
            out.push(Some(sum / period as f64));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_period_sma_matches_hand_computation() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        let out = sma(&values, 3);

        let expected = [
            None,
            None,
            Some(20.0),
            Some(30.0),
            Some(40.0),
            Some(50.0),
            Some(60.0),
            Some(70.0),
            Some(80.0),
            Some(90.0),
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn output_length_equals_input_length() {
        for n in 0..40usize {
            let values: Vec<f64> = (0..n).map(|i| i as f64 * 1.5).collect();
            for period in 1..12usize {
                let out = sma(&values, period);
                assert_eq!(out.len(), n, "length mismatch for n={n}, period={period}");

                let warmup = period.saturating_sub(1).min(n);
                assert!(
                    out.iter().take(warmup).all(Option::is_none),
                    "warm-up prefix must be None for n={n}, period={period}"
                );
                assert!(
                    out.iter().skip(warmup).all(Option::is_some),
                    "post-warm-up values must be Some for n={n}, period={period}"
                );
            }
        }
    }

    #[test]
    fn each_value_is_the_trailing_mean() {
        let values: Vec<f64> = vec![3.5, -1.0, 4.25, 9.0, 0.5, 2.0, 7.75];
        let period = 4;
        let out = sma(&values, period);

        for (i, v) in out.iter().enumerate() {
            if i + 1 < period {
                assert_eq!(*v, None);
            } else {
                let mean: f64 =
                    values[i + 1 - period..=i].iter().sum::<f64>() / period as f64;
                let got = v.expect("value past warm-up");
                assert!((got - mean).abs() < 1e-12, "index {i}: {got} != {mean}");
            }
        }
    }

    #[test]
    fn period_longer_than_input_is_all_none() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(sma(&values, 7), vec![None, None, None]);
    }

    #[test]
    fn zero_period_is_all_none() {
        let values = [1.0, 2.0];
        assert_eq!(sma(&values, 0), vec![None, None]);
    }
}
