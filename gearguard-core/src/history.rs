//! Bounded Per-Component History of RMS Readings
//!
//! ## Ownership Model
//!
//! `History` is a plain value: the engine owns one instance, the store
//! loads and saves instances, and every read (thresholds, trending, export)
//! borrows it immutably. There is no process-wide cache and no interior
//! mutability - the only mutation path is the engine's flush, which appends
//! a session batch and trims to the cap.
//!
//! ## Shape and Invariants
//!
//! A mapping from component identity to an ordered sequence of RMS values,
//! oldest first. Insertion order is temporal order. After any
//! [`append_and_trim`](History::append_and_trim) each sequence holds at most
//! `cap` entries, and the retained entries are always the newest ones in
//! their original order.
//!
//! A `BTreeMap` backs the mapping so the serialized record has a stable key
//! order: saving a freshly loaded history reproduces the same logical
//! content byte-for-byte.

#[cfg(not(feature = "std"))]
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

/// Durable per-component history of RMS readings, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct History {
    components: BTreeMap<String, Vec<f32>>,
}

impl History {
    /// Create an empty history (fresh start)
    pub fn new() -> Self {
        Self {
            components: BTreeMap::new(),
        }
    }

    /// True if no component has any recorded readings
    pub fn is_empty(&self) -> bool {
        self.components.values().all(|seq| seq.is_empty())
    }

    /// Number of components with an entry in the mapping
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// A component's readings, oldest first; empty slice for unknown ids
    pub fn values(&self, component: &str) -> &[f32] {
        self.components
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over `(component, readings)` pairs in stable key order
    pub fn components(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.components
            .iter()
            .map(|(id, seq)| (id.as_str(), seq.as_slice()))
    }

    /// Append a batch of readings to a component and trim to `cap`.
    ///
    /// `new_values` keep their order; unknown components are created on
    /// first append. When the sequence exceeds `cap` the oldest excess
    /// entries are discarded, so the result is always the most recent `cap`
    /// readings in original order. Pure in-memory transform - no I/O.
    pub fn append_and_trim(&mut self, component: &str, new_values: &[f32], cap: usize) {
        let seq = self.components.entry(component.to_string()).or_default();
        seq.extend_from_slice(new_values);
        if seq.len() > cap {
            let excess = seq.len() - cap;
            seq.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.component_count(), 0);
        assert_eq!(history.values("ENG1"), &[] as &[f32]);
    }

    #[test]
    fn append_creates_component() {
        let mut history = History::new();
        history.append_and_trim("ENG1", &[0.1, 0.2], 100);
        assert_eq!(history.values("ENG1"), &[0.1, 0.2]);
        assert_eq!(history.component_count(), 1);
    }

    #[test]
    fn appends_preserve_order() {
        let mut history = History::new();
        history.append_and_trim("PG3", &[1.0, 2.0], 100);
        history.append_and_trim("PG3", &[3.0], 100);
        assert_eq!(history.values("PG3"), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn cap_keeps_newest_suffix() {
        let mut history = History::new();
        history.append_and_trim("ENG1", &[1.0, 2.0, 3.0], 4);
        history.append_and_trim("ENG1", &[4.0, 5.0, 6.0], 4);
        assert_eq!(history.values("ENG1"), &[3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn cap_never_exceeded() {
        let mut history = History::new();
        for batch in 0..20 {
            let values: Vec<f32> = (0..7).map(|i| (batch * 7 + i) as f32).collect();
            history.append_and_trim("ENG1", &values, 10);
            assert!(history.values("ENG1").len() <= 10);
        }
        // 20 batches of 7 values: the last 10 are 130..140
        let expected: Vec<f32> = (130..140).map(|v| v as f32).collect();
        assert_eq!(history.values("ENG1"), expected.as_slice());
    }

    #[test]
    fn oversized_batch_is_trimmed_itself() {
        let mut history = History::new();
        let values: Vec<f32> = (0..12).map(|v| v as f32).collect();
        history.append_and_trim("ENG1", &values, 5);
        assert_eq!(history.values("ENG1"), &[7.0, 8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn components_are_independent() {
        let mut history = History::new();
        history.append_and_trim("ENG1", &[1.0, 2.0, 3.0], 2);
        history.append_and_trim("PG3", &[9.0], 2);
        assert_eq!(history.values("ENG1"), &[2.0, 3.0]);
        assert_eq!(history.values("PG3"), &[9.0]);
    }
}
