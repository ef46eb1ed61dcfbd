//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use parking_lot::Mutex;
use reduxlite::app::{AppState, AppStore};
use reduxlite::store::Subscription;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Write `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Every state delivered to a subscriber, in delivery order.
pub type StateLog = Arc<Mutex<Vec<Arc<AppState>>>>;

/// Subscribe a recorder to `store`.
pub fn record_states(store: &AppStore) -> (StateLog, Subscription) {
    let log: StateLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let subscription = store.subscribe(move |state| sink.lock().push(Arc::clone(state)));
    (log, subscription)
}
