//! Durable History Storage
//!
//! ## The Store Seam
//!
//! The engine talks to persistence through the [`HistoryStore`] trait so the
//! storage target is swappable: the shipped [`JsonFileStore`] writes a JSON
//! file, tests substitute in-memory stores with forced failures, and a
//! deployment could back the same trait with anything that can hold a
//! `component -> readings` record.
//!
//! ## Durable Format
//!
//! A single JSON object mapping component identity to an array of numbers:
//!
//! ```json
//! {"ENG1":[0.41,0.44,0.39],"PG3":[0.2,0.22]}
//! ```
//!
//! The backing `BTreeMap` keeps key order stable, so `save(load())` is a
//! no-op on the record's logical content.
//!
//! ## Atomicity
//!
//! `save` writes the full record to a temporary sibling file and then
//! renames it over the target. A rename within one directory is atomic on
//! the platforms this runs on, so a concurrent reader observes either the
//! fully-old or the fully-new record, never a torn write.
//!
//! ## Missing vs. Corrupt
//!
//! A missing record is a fresh start and loads as an empty history. A record
//! that exists but does not parse is [`StoreError::CorruptHistory`] - the
//! caller decides whether to fall back (the engine does, with a warning) or
//! to stop and investigate.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;
use crate::history::History;

/// Persistence boundary for the per-component history record
pub trait HistoryStore {
    /// Load the persisted history, or an empty one if no record exists.
    fn load(&self) -> Result<History, StoreError>;

    /// Persist the full history, replacing any prior record atomically.
    fn save(&self, history: &History) -> Result<(), StoreError>;
}

/// History store backed by a JSON file on local disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given file path. Nothing is touched on disk
    /// until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the durable record
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path the new record is staged at before the atomic rename
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<History, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(History::new()),
            Err(err) => return Err(StoreError::ReadFailure(err)),
        };

        serde_json::from_str(&raw).map_err(StoreError::CorruptHistory)
    }

    fn save(&self, history: &History) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(history).map_err(StoreError::EncodeFailure)?;

        let staging = self.staging_path();
        fs::write(&staging, encoded.as_bytes()).map_err(StoreError::WriteFailure)?;
        fs::rename(&staging, &self.path).map_err(StoreError::WriteFailure)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_path_is_a_sibling() {
        let store = JsonFileStore::new("/var/lib/gearguard/history.json");
        assert_eq!(
            store.staging_path(),
            PathBuf::from("/var/lib/gearguard/history.json.tmp")
        );
    }
}
