//! Adaptive Alarm Thresholds from Historical RMS Values
//!
//! ## The σ-Rule
//!
//! Every machine vibrates differently, so fixed alarm levels either miss real
//! degradation or cry wolf. Instead the limits are learned from each
//! component's own retained history: assuming that history represents the
//! component's *healthy* operating regime,
//!
//! - `limit    = μ + 2σ` (readings this far out are unusual)
//! - `critical = μ + 3σ` (readings this far out are almost certainly a fault)
//!
//! with μ and σ taken over the **full** retained history - never a per-tick
//! window, because σ of a short window collapses toward zero and would make
//! the alarm hypersensitive.
//!
//! Until a component has accumulated [`MIN_BASELINE_SAMPLES`] readings there
//! is no statistical baseline, and fixed defaults apply.
//!
//! Thresholds are recomputed from history at every evaluation and never
//! stored; identical history always yields identical thresholds.

/// Readings required before the statistical baseline replaces the defaults
pub const MIN_BASELINE_SAMPLES: usize = 5;

/// Default warning limit used before a baseline exists
pub const DEFAULT_LIMIT: f32 = 0.6;

/// Default critical limit used before a baseline exists
pub const DEFAULT_CRITICAL: f32 = 0.8;

/// Sigma multiplier for the warning limit
const LIMIT_SIGMA: f64 = 2.0;

/// Sigma multiplier for the critical limit
const CRITICAL_SIGMA: f64 = 3.0;

/// Alarm thresholds for one component, derived from its history
///
/// Invariant: `limit <= critical` (both multipliers are non-negative and
/// share the same μ and σ).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Warning boundary - readings at or above are [`Status::Warning`]
    pub limit: f32,
    /// Critical boundary - readings at or above are [`Status::Critical`]
    pub critical: f32,
}

/// Classification of one RMS reading against its thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Below the warning limit
    Normal,
    /// At or above the warning limit, below the critical limit
    Warning,
    /// At or above the critical limit
    Critical,
}

impl Thresholds {
    /// Derive thresholds from a component's historical RMS values.
    ///
    /// Fewer than [`MIN_BASELINE_SAMPLES`] values returns the fixed defaults
    /// `(0.6, 0.8)`. Otherwise μ and the population standard deviation σ are
    /// computed over all values and the σ-rule boundaries returned.
    pub fn estimate(values: &[f32]) -> Self {
        if values.len() < MIN_BASELINE_SAMPLES {
            return Self {
                limit: DEFAULT_LIMIT,
                critical: DEFAULT_CRITICAL,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = values
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let sigma = libm::sqrt(variance);

        Self {
            limit: (mean + LIMIT_SIGMA * sigma) as f32,
            critical: (mean + CRITICAL_SIGMA * sigma) as f32,
        }
    }

    /// Classify one RMS reading.
    ///
    /// Boundaries are inclusive on the severe side: a reading exactly at
    /// `limit` is [`Status::Warning`], exactly at `critical` is
    /// [`Status::Critical`].
    pub fn classify(&self, rms: f32) -> Status {
        if rms >= self.critical {
            Status::Critical
        } else if rms >= self.limit {
            Status::Warning
        } else {
            Status::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_below_baseline() {
        // Values are irrelevant until 5 readings exist
        let thresholds = Thresholds::estimate(&[900.0, 950.0, 1000.0, 990.0]);
        assert_eq!(thresholds.limit, DEFAULT_LIMIT);
        assert_eq!(thresholds.critical, DEFAULT_CRITICAL);

        let empty = Thresholds::estimate(&[]);
        assert_eq!(empty.limit, DEFAULT_LIMIT);
        assert_eq!(empty.critical, DEFAULT_CRITICAL);
    }

    #[test]
    fn zero_sigma_collapses_to_mean() {
        // Five identical values: σ = 0, so limit = critical = mean
        let thresholds = Thresholds::estimate(&[1.0; 5]);
        assert!((thresholds.limit - 1.0).abs() < 1e-6);
        assert!((thresholds.critical - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sigma_rule_boundaries() {
        // μ = 3, population σ = sqrt(2) for [1..5]
        let thresholds = Thresholds::estimate(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let sigma = 2.0_f32.sqrt();
        assert!((thresholds.limit - (3.0 + 2.0 * sigma)).abs() < 1e-5);
        assert!((thresholds.critical - (3.0 + 3.0 * sigma)).abs() < 1e-5);
        assert!(thresholds.limit <= thresholds.critical);
    }

    #[test]
    fn classification_boundaries_are_inclusive_upward() {
        let thresholds = Thresholds {
            limit: 0.6,
            critical: 0.8,
        };
        assert_eq!(thresholds.classify(0.59), Status::Normal);
        assert_eq!(thresholds.classify(0.6), Status::Warning);
        assert_eq!(thresholds.classify(0.79), Status::Warning);
        assert_eq!(thresholds.classify(0.8), Status::Critical);
        assert_eq!(thresholds.classify(5.0), Status::Critical);
    }

    #[test]
    fn identical_history_identical_thresholds() {
        let history = [0.4, 0.45, 0.42, 0.48, 0.41, 0.44];
        assert_eq!(
            Thresholds::estimate(&history),
            Thresholds::estimate(&history)
        );
    }
}
