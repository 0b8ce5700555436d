//! Core condition-monitoring engine for GearGuard
//!
//! Watches the vibration condition of rotating machinery (engines, gearboxes)
//! by reducing raw sample windows to RMS energy and comparing each reading
//! against thresholds learned from the component's own history.
//!
//! Per tick the host hands the engine one raw sample window per component;
//! the engine low-pass filters it, reduces it to a single RMS value,
//! classifies that value against mean + k·σ thresholds over the persisted
//! history, and buffers it. Every few rounds the buffered readings are
//! flushed into a bounded, durable, per-component history.
//!
//! Key constraints:
//! - The DSP and statistics modules are `no_std`-capable (alloc only)
//! - The engine never schedules itself: the host drives every tick
//! - Flush is at-least-once; a failed write never loses buffered readings
//!
//! ```no_run
//! use gearguard_core::{EngineConfig, MonitoringEngine, JsonFileStore, Status};
//!
//! let config = EngineConfig {
//!     components: vec!["ENG1".into(), "PG3".into()],
//!     sample_rate_hz: 1000.0,
//!     cutoff_hz: 100.0,
//!     filter_order: 2,
//!     history_cap: 100,
//!     flush_interval: 10,
//! };
//! let store = JsonFileStore::new("history.json");
//! let mut engine = MonitoringEngine::new(config, store).unwrap();
//!
//! let window = [0.1_f32, 0.2, 0.15, 0.1, 0.2, 0.18, 0.12, 0.16];
//! match engine.process_tick("ENG1", &window) {
//!     Ok(report) if report.status == Status::Critical => { /* raise alarm */ }
//!     Ok(_) => { /* render reading */ }
//!     Err(_) => { /* skip this component this tick */ }
//! }
//! engine.complete_round();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod errors;
pub mod filter;
pub mod history;
pub mod reduce;
pub mod thresholds;
pub mod trend;

#[cfg(feature = "std")]
pub mod engine;
#[cfg(feature = "std")]
pub mod export;
#[cfg(feature = "std")]
pub mod store;

// Public API
pub use errors::{ConfigError, TickError, TickResult};
pub use filter::LowPassFilter;
pub use history::History;
pub use reduce::rms;
pub use thresholds::{Status, Thresholds};
pub use trend::batches_to_threshold;

#[cfg(feature = "std")]
pub use engine::{EngineConfig, FlushOutcome, MonitoringEngine, TickReport};
#[cfg(feature = "std")]
pub use errors::StoreError;
#[cfg(feature = "std")]
pub use store::{HistoryStore, JsonFileStore};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
