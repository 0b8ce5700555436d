//! Butterworth Low-Pass Filtering of Raw Sample Windows
//!
//! ## Overview
//!
//! Vibration sensors pick up broadband noise well above the structural
//! frequencies that matter for condition monitoring. Before a window is
//! reduced to an RMS energy value it is passed through a Butterworth low-pass
//! filter, which has a maximally flat passband - it attenuates the noise band
//! without coloring the retained band.
//!
//! ## Design Method
//!
//! The classic digital IIR recipe, realized as cascaded biquad sections for
//! numerical stability:
//!
//! 1. Place the analog prototype poles on the left half of the s-plane unit
//!    circle at angles `π·(2k + N + 1) / 2N`.
//! 2. Pre-warp the cutoff so the bilinear transform lands the -3 dB point at
//!    the requested digital frequency: `ωc = 2·fs·tan(π·fc/fs)`.
//! 3. Map each conjugate pole pair (and the lone real pole of odd orders)
//!    through the bilinear transform `s = 2·fs·(z-1)/(z+1)` into one biquad.
//!
//! Poles always come in conjugate pairs, so the whole design works in real
//! arithmetic from the real part of one pole per pair - no complex number
//! type is needed. `libm` supplies `tan`/`cos` so the module stays
//! `no_std`-capable.
//!
//! ## Determinism
//!
//! Section state is zeroed on every [`LowPassFilter::apply`] call. Identical
//! windows through the same design always produce identical output,
//! regardless of what was filtered before.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::f64::consts::PI;

use crate::errors::{ConfigError, TickError};

/// A single biquad (second-order section).
///
/// Transfer function: H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)
///
/// Processed in Direct Form II Transposed for better numerical properties.
#[derive(Debug, Clone, Copy)]
struct Biquad {
    /// Numerator coefficients [b0, b1, b2]
    b: [f64; 3],
    /// Denominator coefficients [a1, a2] (a0 is normalized to 1)
    a: [f64; 2],
}

impl Biquad {
    /// Process one sample through this section with caller-owned state.
    fn process(&self, state: &mut [f64; 2], input: f64) -> f64 {
        let output = self.b[0] * input + state[0];
        state[0] = self.b[1] * input - self.a[0] * output + state[1];
        state[1] = self.b[2] * input - self.a[1] * output;
        output
    }
}

/// Butterworth low-pass filter as a cascade of biquad sections
///
/// The design is computed once (typically at engine startup, where parameter
/// errors are fatal); [`apply`](Self::apply) then filters any number of
/// windows without further parameter checks.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    /// Cascaded second-order (and at most one first-order) sections
    sections: Vec<Biquad>,
    /// Filter order the cascade realizes
    order: usize,
    /// -3 dB cutoff frequency in Hz
    cutoff_hz: f64,
    /// Sampling rate of incoming windows in Hz
    sample_rate_hz: f64,
}

impl LowPassFilter {
    /// Check a Butterworth design without building it.
    ///
    /// Shared between the filter constructor and engine configuration
    /// validation so both reject exactly the same parameter space:
    /// non-positive or non-finite rates and cutoffs, a zero order, and any
    /// cutoff at or above the Nyquist frequency.
    pub fn validate_design(
        order: usize,
        cutoff_hz: f64,
        sample_rate_hz: f64,
    ) -> Result<(), ConfigError> {
        if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
            return Err(ConfigError::InvalidSampleRate { rate_hz: sample_rate_hz });
        }
        if !(cutoff_hz.is_finite() && cutoff_hz > 0.0) {
            return Err(ConfigError::InvalidCutoff { cutoff_hz });
        }
        let nyquist_hz = sample_rate_hz / 2.0;
        if cutoff_hz >= nyquist_hz {
            return Err(ConfigError::CutoffAboveNyquist { cutoff_hz, nyquist_hz });
        }
        if order == 0 {
            return Err(ConfigError::ZeroFilterOrder);
        }
        Ok(())
    }

    /// Design an order-`order` Butterworth low-pass filter.
    ///
    /// `cutoff_hz` is the -3 dB point; it must lie strictly below the Nyquist
    /// frequency `sample_rate_hz / 2`. Parameter violations are configuration
    /// errors raised here, never at filtering time.
    pub fn butterworth(
        order: usize,
        cutoff_hz: f64,
        sample_rate_hz: f64,
    ) -> Result<Self, ConfigError> {
        Self::validate_design(order, cutoff_hz, sample_rate_hz)?;

        // Pre-warp so the bilinear transform preserves the cutoff
        let wc = 2.0 * sample_rate_hz * libm::tan(PI * cutoff_hz / sample_rate_hz);
        let k = 2.0 * sample_rate_hz;

        let mut sections = Vec::with_capacity(order / 2 + 1);

        // One biquad per conjugate pole pair. Pole k sits at angle
        // θ = π(2k + N + 1)/2N on the s-plane circle of radius ωc; its
        // conjugate is pole N-1-k, so only the upper half is enumerated.
        for pair in 0..order / 2 {
            let theta = PI * (2 * pair + order + 1) as f64 / (2 * order) as f64;
            let pole_re = wc * libm::cos(theta);
            sections.push(lowpass_pair(pole_re, wc, k));
        }

        // Odd orders leave one real pole at -ωc
        if order % 2 == 1 {
            sections.push(lowpass_real(wc, k));
        }

        Ok(Self {
            sections,
            order,
            cutoff_hz,
            sample_rate_hz,
        })
    }

    /// Filter a raw sample window, producing a window of the same length.
    ///
    /// Windows shorter than `order + 1` samples cannot meaningfully excite an
    /// order-N filter and are rejected with
    /// [`TickError::InsufficientSamples`] rather than passed through.
    pub fn apply(&self, window: &[f32]) -> Result<Vec<f32>, TickError> {
        let required = self.order + 1;
        if window.len() < required {
            return Err(TickError::InsufficientSamples {
                required,
                available: window.len(),
            });
        }

        // Fresh state per call keeps the filter a pure function of its input
        let mut states: Vec<[f64; 2]> = self.sections.iter().map(|_| [0.0; 2]).collect();
        let mut filtered = Vec::with_capacity(window.len());

        for &sample in window {
            let mut acc = sample as f64;
            for (section, state) in self.sections.iter().zip(states.iter_mut()) {
                acc = section.process(state, acc);
            }
            filtered.push(acc as f32);
        }

        Ok(filtered)
    }

    /// Filter order the cascade realizes
    pub fn order(&self) -> usize {
        self.order
    }

    /// -3 dB cutoff frequency in Hz
    pub fn cutoff_hz(&self) -> f64 {
        self.cutoff_hz
    }

    /// Sampling rate the design assumes, in Hz
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }
}

/// Bilinear transform of a conjugate pole pair into a low-pass biquad.
///
/// Analog prototype: H(s) = ωc² / (s² - 2·Re(p)·s + ωc²) with |p| = ωc.
/// Substituting s = k·(z-1)/(z+1) and normalizing by the z² coefficient gives
/// unity DC gain by construction.
fn lowpass_pair(pole_re: f64, wc: f64, k: f64) -> Biquad {
    let wc2 = wc * wc;
    let d0 = k * k - 2.0 * k * pole_re + wc2;

    Biquad {
        b: [wc2 / d0, 2.0 * wc2 / d0, wc2 / d0],
        a: [
            2.0 * (wc2 - k * k) / d0,
            (k * k + 2.0 * k * pole_re + wc2) / d0,
        ],
    }
}

/// Bilinear transform of the single real pole at -ωc (odd orders only).
///
/// Analog prototype: H(s) = ωc / (s + ωc).
fn lowpass_real(wc: f64, k: f64) -> Biquad {
    let d0 = k + wc;

    Biquad {
        b: [wc / d0, wc / d0, 0.0],
        a: [(wc - k) / d0, 0.0],
    }
}
