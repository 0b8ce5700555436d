//! Monitoring Engine - Per-Tick Orchestration and Periodic Flush
//!
//! ## Tick Lifecycle
//!
//! The host (a UI loop, a scheduler, a test) drives the engine; the engine
//! owns no timers and makes no scheduling assumptions. For each component in
//! a round the host calls [`MonitoringEngine::process_tick`] with one raw
//! sample window:
//!
//! ```text
//! raw window ── filter ── rms ── classify against persisted history
//!                                  │
//!                                  └── reading appended to session buffer
//! ```
//!
//! After a full pass over all components the host calls
//! [`MonitoringEngine::complete_round`]. Every `flush_interval` rounds the
//! session buffers are appended into the history (trimmed to the cap) and
//! the result saved through the store.
//!
//! ## Why Classification Ignores the Session Buffer
//!
//! Thresholds are always computed from the *persisted* history, excluding
//! readings buffered in the current session. Unflushed readings only start
//! influencing thresholds once a flush commits them. This keeps the
//! classification baseline identical across a flush period and identical to
//! what any other reader of the durable record would compute.
//!
//! ## Flush Failure Semantics
//!
//! A flush stages the appends on a working copy of the history and saves
//! that copy. Only on success does the engine commit the copy and clear the
//! session buffers. On failure the old history and every buffered reading
//! survive untouched, so the next successful flush carries them in their
//! original order - at-least-once persistence with no data loss.

use std::collections::BTreeMap;

use crate::errors::{ConfigError, StoreError, TickError};
use crate::filter::LowPassFilter;
use crate::history::History;
use crate::reduce::rms;
use crate::store::HistoryStore;
use crate::thresholds::{Status, Thresholds};
use crate::trend;

/// Engine configuration, fixed for the engine's lifetime
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Component identities the engine monitors; immutable after startup
    pub components: Vec<String>,
    /// Sampling rate of incoming raw windows in Hz
    pub sample_rate_hz: f64,
    /// Low-pass cutoff in Hz, strictly below Nyquist
    pub cutoff_hz: f64,
    /// Butterworth filter order
    pub filter_order: usize,
    /// Maximum retained history entries per component
    pub history_cap: usize,
    /// Rounds between flushes of the session buffers into the history
    pub flush_interval: u32,
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// Covers the whole fatal-at-startup space: filter design parameters
    /// (Nyquist, positive rate and cutoff, nonzero order) plus a nonzero
    /// history cap and flush interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        LowPassFilter::validate_design(self.filter_order, self.cutoff_hz, self.sample_rate_hz)?;
        if self.history_cap == 0 {
            return Err(ConfigError::ZeroHistoryCap);
        }
        if self.flush_interval == 0 {
            return Err(ConfigError::ZeroFlushInterval);
        }
        Ok(())
    }
}

/// Result of one successful tick for one component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// RMS energy of the filtered window
    pub rms: f32,
    /// Classification of the reading against the thresholds below
    pub status: Status,
    /// Thresholds derived from the persisted history at evaluation time
    pub thresholds: Thresholds,
}

/// Outcome of completing a round
#[derive(Debug)]
pub enum FlushOutcome {
    /// Flush not due yet
    Pending {
        /// Rounds remaining until the next flush attempt
        rounds_until_flush: u32,
    },
    /// Session buffers persisted and cleared
    Flushed {
        /// Readings moved into the durable history
        readings: usize,
    },
    /// Save failed; session buffers kept for the next attempt (recoverable)
    FlushFailed(StoreError),
}

/// Condition-monitoring engine for a fixed set of components
pub struct MonitoringEngine<S: HistoryStore> {
    config: EngineConfig,
    filter: LowPassFilter,
    store: S,
    /// Durable source of truth; mutated only by a committed flush
    history: History,
    /// Readings accumulated since the last successful flush
    session: BTreeMap<String, Vec<f32>>,
    rounds_since_flush: u32,
}

impl<S: HistoryStore> MonitoringEngine<S> {
    /// Build an engine: validate the configuration, design the filter once,
    /// and load the persisted history.
    ///
    /// Configuration errors are fatal and the engine does not start. A
    /// corrupt or unreadable history record is not fatal: the engine logs a
    /// warning and starts from an empty history.
    pub fn new(config: EngineConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let filter =
            LowPassFilter::butterworth(config.filter_order, config.cutoff_hz, config.sample_rate_hz)?;

        let history = match store.load() {
            Ok(history) => history,
            Err(err) => {
                log::warn!("history record unusable, starting fresh: {}", err);
                History::new()
            }
        };

        let session = config
            .components
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();

        Ok(Self {
            config,
            filter,
            store,
            history,
            session,
            rounds_since_flush: 0,
        })
    }

    /// Process one raw sample window for one component.
    ///
    /// Filters the window, reduces it to an RMS value, classifies that value
    /// against thresholds from the persisted history, and buffers it for the
    /// next flush. Errors are isolated to this component and this tick; the
    /// caller skips classification for it and carries on with the rest of
    /// the round.
    pub fn process_tick(
        &mut self,
        component: &str,
        raw_window: &[f32],
    ) -> Result<TickReport, TickError> {
        if !self.session.contains_key(component) {
            return Err(TickError::UnknownComponent);
        }

        let filtered = self.filter.apply(raw_window)?;
        let value = rms(&filtered)?;

        let thresholds = Thresholds::estimate(self.history.values(component));
        let status = thresholds.classify(value);

        if let Some(buffer) = self.session.get_mut(component) {
            buffer.push(value);
        }

        Ok(TickReport {
            rms: value,
            status,
            thresholds,
        })
    }

    /// Mark the end of one full pass over all components.
    ///
    /// Increments the round counter; at every `flush_interval` rounds the
    /// session buffers are flushed. The counter resets on a flush attempt
    /// whether it succeeds or fails, so a failed flush is retried after the
    /// next full interval.
    pub fn complete_round(&mut self) -> FlushOutcome {
        self.rounds_since_flush += 1;
        if self.rounds_since_flush < self.config.flush_interval {
            return FlushOutcome::Pending {
                rounds_until_flush: self.config.flush_interval - self.rounds_since_flush,
            };
        }

        self.rounds_since_flush = 0;
        self.flush()
    }

    /// Flush immediately, regardless of the round counter.
    ///
    /// Intended for host shutdown so buffered readings are not lost; resets
    /// the round counter.
    pub fn flush_now(&mut self) -> FlushOutcome {
        self.rounds_since_flush = 0;
        self.flush()
    }

    fn flush(&mut self) -> FlushOutcome {
        let mut staged = self.history.clone();
        let mut readings = 0;
        for (component, buffered) in &self.session {
            if buffered.is_empty() {
                continue;
            }
            staged.append_and_trim(component, buffered, self.config.history_cap);
            readings += buffered.len();
        }

        if readings == 0 {
            return FlushOutcome::Flushed { readings: 0 };
        }

        match self.store.save(&staged) {
            Ok(()) => {
                self.history = staged;
                for buffered in self.session.values_mut() {
                    buffered.clear();
                }
                log::debug!("flushed {} readings", readings);
                FlushOutcome::Flushed { readings }
            }
            Err(err) => {
                log::warn!("flush failed, keeping {} buffered readings: {}", readings, err);
                FlushOutcome::FlushFailed(err)
            }
        }
    }

    /// Predict batches until a component's trend crosses `threshold`.
    ///
    /// Read-only query over the persisted history; the unit is one flush
    /// period. See [`trend::batches_to_threshold`] for the policy.
    pub fn batches_to_threshold(&self, component: &str, threshold: f32) -> Option<f32> {
        trend::batches_to_threshold(self.history.values(component), threshold)
    }

    /// Read-only snapshot of the persisted history (for export/charting)
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The engine's configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
