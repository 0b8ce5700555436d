//! Integration tests for the JSON file store
//!
//! Exercises the persistence boundary against a real filesystem: fresh
//! starts, save/load round-trips, corrupt records, and the atomic-rename
//! staging behavior.

use std::fs;

use gearguard_core::{History, HistoryStore, JsonFileStore, StoreError};

fn sample_history() -> History {
    let mut history = History::new();
    history.append_and_trim("ENG1", &[0.41, 0.44, 0.39], 100);
    history.append_and_trim("PG3", &[0.2, 0.22], 100);
    history.append_and_trim("AUX", &[0.0], 100);
    history
}

#[test]
fn missing_record_is_a_fresh_start() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("history.json"));

    let history = store.load().unwrap();
    assert!(history.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("history.json"));

    let original = sample_history();
    store.save(&original).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, original);
    assert_eq!(loaded.values("ENG1"), &[0.41, 0.44, 0.39]);
}

#[test]
fn save_of_loaded_history_is_a_no_op_on_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = JsonFileStore::new(&path);

    store.save(&sample_history()).unwrap();
    let first_bytes = fs::read(&path).unwrap();

    store.save(&store.load().unwrap()).unwrap();
    let second_bytes = fs::read(&path).unwrap();

    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn corrupt_record_is_reported_not_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, b"{\"ENG1\": \"not a sequence\"}").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(store.load(), Err(StoreError::CorruptHistory(_))));

    fs::write(&path, b"garbage").unwrap();
    assert!(matches!(store.load(), Err(StoreError::CorruptHistory(_))));
}

#[test]
fn save_overwrites_prior_state_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = JsonFileStore::new(&path);

    store.save(&sample_history()).unwrap();

    let mut newer = History::new();
    newer.append_and_trim("ENG1", &[9.9], 100);
    store.save(&newer).unwrap();

    assert_eq!(store.load().unwrap(), newer);

    // The staging file must not survive a completed save
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec!["history.json"]);
}

#[test]
fn empty_history_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("history.json"));

    store.save(&History::new()).unwrap();
    assert!(store.load().unwrap().is_empty());
}
