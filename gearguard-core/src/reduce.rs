//! RMS Reduction of Filtered Windows
//!
//! Collapses a filtered sample window into a single root-mean-square energy
//! value, the scalar every downstream decision (classification, thresholds,
//! trending) is made on. RMS is the standard severity measure for machinery
//! vibration because it tracks the energy content of the signal rather than
//! isolated peaks.
//!
//! Pure function, no hidden state: the same window always reduces to the
//! same value. Accumulation happens in f64 so long windows do not lose
//! precision, and non-finite samples are rejected up front so a NaN can
//! never escape into the history.

use crate::errors::{TickError, TickResult};

/// Reduce a window to its root-mean-square value.
///
/// Returns [`TickError::EmptyWindow`] for an empty slice and
/// [`TickError::InvalidValue`] if any sample is NaN or infinite. For
/// well-formed input the result is finite and non-negative.
pub fn rms(window: &[f32]) -> TickResult<f32> {
    if window.is_empty() {
        return Err(TickError::EmptyWindow);
    }

    let mut sum_sq = 0.0_f64;
    for &sample in window {
        if !sample.is_finite() {
            return Err(TickError::InvalidValue);
        }
        let sample = sample as f64;
        sum_sq += sample * sample;
    }

    Ok(libm::sqrt(sum_sq / window.len() as f64) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_value() {
        // RMS of [3, 4] is sqrt((9 + 16) / 2)
        let value = rms(&[3.0, 4.0]).unwrap();
        assert!((value - 12.5_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn constant_window_is_its_magnitude() {
        let value = rms(&[-2.0; 16]).unwrap();
        assert!((value - 2.0).abs() < 1e-6);
    }

    #[test]
    fn never_negative() {
        let value = rms(&[-1.0, -0.5, -3.0, 0.0]).unwrap();
        assert!(value >= 0.0);
    }

    #[test]
    fn empty_window_is_rejected() {
        assert_eq!(rms(&[]), Err(TickError::EmptyWindow));
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        assert_eq!(rms(&[1.0, f32::NAN]), Err(TickError::InvalidValue));
        assert_eq!(rms(&[f32::INFINITY]), Err(TickError::InvalidValue));
    }

    #[test]
    fn zero_window_reduces_to_zero() {
        assert_eq!(rms(&[0.0; 8]).unwrap(), 0.0);
    }
}
