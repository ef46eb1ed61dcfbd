use std::sync::Arc;

use serde::Serialize;

use crate::app::catalog::{Channel, Os};
use crate::config::Defaults;
use crate::mvi::StoreState;

/// One entry of the random number list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomNumber {
    pub id: u32,
    pub value: f64,
}

/// Application state held by the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub channel: Channel,
    pub os: Os,
    /// Shared between snapshots until an intent edits the list.
    pub random_numbers: Arc<Vec<RandomNumber>>,
    pub is_waiting: bool,
    /// Message of the last failed fetch, cleared when a new fetch starts.
    pub last_error: Option<String>,
}

impl StoreState for AppState {}

impl AppState {
    /// Initial state from configured defaults.
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            channel: defaults.channel,
            os: defaults.os,
            ..Self::default()
        }
    }

    /// Id for the next appended entry: one past the largest id, or 0.
    pub fn next_id(&self) -> u32 {
        self.random_numbers
            .iter()
            .map(|entry| entry.id)
            .max()
            .map_or(0, |max| max + 1)
    }

    pub fn find_number(&self, id: u32) -> Option<&RandomNumber> {
        self.random_numbers.iter().find(|entry| entry.id == id)
    }
}
