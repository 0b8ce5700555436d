//! Error Types for the Condition-Monitoring Engine
//!
//! ## Design Philosophy
//!
//! Errors split along the engine's fault boundaries:
//!
//! 1. **Per-tick errors** ([`TickError`]): something went wrong with one
//!    component's window on one tick. These are small `Copy` enums with
//!    inline scalar payloads only - they travel through the hot path and are
//!    cheap to report and drop. One component's tick error never blocks the
//!    other components in the same round.
//!
//! 2. **Configuration errors** ([`ConfigError`]): the engine refuses to
//!    start. A cutoff at or above Nyquist, a zero history cap, or a zero
//!    flush interval cannot produce meaningful monitoring, so these are
//!    raised once at startup and never at call time.
//!
//! 3. **Store errors** ([`StoreError`], `std` only): durable history I/O
//!    failed. A corrupt record downgrades to an empty history with a logged
//!    warning; a failed flush write is recoverable because the session
//!    buffers are kept until a save succeeds.

use thiserror_no_std::Error;

/// Result type for per-tick operations
pub type TickResult<T> = Result<T, TickError>;

/// Per-tick, per-component errors - kept small for the hot path
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    /// Raw window too short for the configured filter order
    #[error("window has {available} samples, filter needs at least {required}")]
    InsufficientSamples {
        /// Minimum number of samples the filter needs (order + 1)
        required: usize,
        /// Actual number of samples in the window
        available: usize,
    },

    /// Reducer was handed an empty window
    #[error("cannot reduce an empty window")]
    EmptyWindow,

    /// A sample was NaN or infinite
    #[error("invalid sample: not a finite number")]
    InvalidValue,

    /// Component id is not in the engine's configured set
    #[error("component is not configured on this engine")]
    UnknownComponent,
}

/// Startup configuration errors - the engine must not start on any of these
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Low-pass cutoff violates the Nyquist limit
    #[error("cutoff {cutoff_hz} Hz is at or above Nyquist ({nyquist_hz} Hz)")]
    CutoffAboveNyquist {
        /// Requested cutoff frequency in Hz
        cutoff_hz: f64,
        /// Nyquist frequency (half the sampling rate) in Hz
        nyquist_hz: f64,
    },

    /// Sampling rate is zero, negative, or not finite
    #[error("sampling rate must be a positive finite number, got {rate_hz}")]
    InvalidSampleRate {
        /// The rejected sampling rate in Hz
        rate_hz: f64,
    },

    /// Cutoff frequency is zero, negative, or not finite
    #[error("cutoff frequency must be a positive finite number, got {cutoff_hz}")]
    InvalidCutoff {
        /// The rejected cutoff frequency in Hz
        cutoff_hz: f64,
    },

    /// Filter order of zero has no passband to design
    #[error("filter order must be at least 1")]
    ZeroFilterOrder,

    /// History cap of zero would discard every reading at flush
    #[error("history cap must be at least 1")]
    ZeroHistoryCap,

    /// Flush interval of zero rounds never accumulates a session
    #[error("flush interval must be at least 1 round")]
    ZeroFlushInterval,
}

/// Durable history store errors
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record exists but does not parse as component -> readings
    #[error("history record exists but cannot be parsed: {0}")]
    CorruptHistory(#[source] serde_json::Error),

    /// The record could not be read for a reason other than absence
    #[error("history record could not be read: {0}")]
    ReadFailure(#[source] std::io::Error),

    /// The record could not be encoded for writing
    #[error("history record could not be encoded: {0}")]
    EncodeFailure(#[source] serde_json::Error),

    /// The record could not be written or moved into place
    #[error("history record could not be written: {0}")]
    WriteFailure(#[source] std::io::Error),
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InsufficientSamples { required, available } =>
                defmt::write!(fmt, "Need {} samples, have {}", required, available),
            Self::EmptyWindow =>
                defmt::write!(fmt, "Empty window"),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid sample"),
            Self::UnknownComponent =>
                defmt::write!(fmt, "Unknown component"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::CutoffAboveNyquist { cutoff_hz, nyquist_hz } =>
                defmt::write!(fmt, "Cutoff {} >= Nyquist {}", cutoff_hz, nyquist_hz),
            Self::InvalidSampleRate { rate_hz } =>
                defmt::write!(fmt, "Bad sampling rate {}", rate_hz),
            Self::InvalidCutoff { cutoff_hz } =>
                defmt::write!(fmt, "Bad cutoff {}", cutoff_hz),
            Self::ZeroFilterOrder =>
                defmt::write!(fmt, "Filter order is 0"),
            Self::ZeroHistoryCap =>
                defmt::write!(fmt, "History cap is 0"),
            Self::ZeroFlushInterval =>
                defmt::write!(fmt, "Flush interval is 0"),
        }
    }
}
