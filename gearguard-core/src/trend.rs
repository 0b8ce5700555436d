//! Linear Trend Extrapolation to Predict Time-to-Threshold
//!
//! Fits an ordinary least-squares line through a component's historical RMS
//! values and extrapolates forward to estimate how many more history entries
//! will accumulate before a threshold is crossed.
//!
//! The x axis is the entry index (0..n-1), not wall-clock time, so the
//! returned unit is one history-entry interval - one flush period. A caller
//! that wants wall-clock time multiplies by its own flush cadence.
//!
//! A flat or improving trend (slope ≤ 0) never crosses the threshold under a
//! linear model, and fewer than [`MIN_TREND_SAMPLES`] values cannot support
//! a fit; both cases yield `None` rather than a misleading number.

/// Values required before a trend fit is attempted
pub const MIN_TREND_SAMPLES: usize = 5;

/// Predict how many batches until `threshold` is crossed.
///
/// Returns `None` when fewer than [`MIN_TREND_SAMPLES`] values exist or the
/// fitted slope is not positive. Otherwise the prediction is
/// `(threshold - most_recent) / slope`, clamped to `0.0` when the most
/// recent value already sits at or over the threshold, and rounded to one
/// decimal place. Deterministic: no randomness, index-based x axis.
pub fn batches_to_threshold(values: &[f32], threshold: f32) -> Option<f32> {
    let n = values.len();
    if n < MIN_TREND_SAMPLES {
        return None;
    }

    // Least-squares fit y = slope*x + intercept over x = 0..n-1
    let n_f = n as f64;
    let sum_x: f64 = (0..n).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().map(|&v| v as f64).sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(i, &y)| i as f64 * y as f64)
        .sum();
    let sum_x2: f64 = (0..n).map(|i| (i as f64) * (i as f64)).sum();

    let denom = n_f * sum_x2 - sum_x * sum_x;
    if denom.abs() < 1e-12 {
        return None;
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
    if slope <= 0.0 {
        return None;
    }

    let most_recent = values[n - 1] as f64;
    let batches = (threshold as f64 - most_recent) / slope;
    if batches <= 0.0 {
        return Some(0.0);
    }

    Some((libm::round(batches * 10.0) / 10.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_trend_predicts_crossing() {
        // Slope exactly 1 per batch, latest value 5: one batch to reach 6
        let history = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(batches_to_threshold(&history, 6.0), Some(1.0));
    }

    #[test]
    fn falling_trend_never_crosses() {
        let history = [5.0, 4.0, 3.0, 2.0, 1.0, 0.0];
        assert_eq!(batches_to_threshold(&history, 6.0), None);
    }

    #[test]
    fn flat_trend_never_crosses() {
        let history = [2.0; 8];
        assert_eq!(batches_to_threshold(&history, 6.0), None);
    }

    #[test]
    fn too_little_history() {
        assert_eq!(batches_to_threshold(&[0.0, 1.0, 2.0, 3.0], 6.0), None);
        assert_eq!(batches_to_threshold(&[], 6.0), None);
    }

    #[test]
    fn already_over_threshold_clamps_to_zero() {
        let history = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
        assert_eq!(batches_to_threshold(&history, 7.0), Some(0.0));
    }

    #[test]
    fn prediction_is_rounded_to_one_decimal() {
        // Slope 3 per batch, latest 12, threshold 13: 1/3 batch -> 0.3
        let history = [0.0, 3.0, 6.0, 9.0, 12.0];
        assert_eq!(batches_to_threshold(&history, 13.0), Some(0.3));
    }

    #[test]
    fn prediction_is_positive_and_finite() {
        let history = [0.1, 0.22, 0.29, 0.41, 0.52, 0.58];
        let batches = batches_to_threshold(&history, 2.0).unwrap();
        assert!(batches > 0.0);
        assert!(batches.is_finite());
    }
}
