//! Atomic intents for the application store.

use crate::app::catalog::{Channel, Os};
use crate::mvi::Intent;

/// Intents that can be dispatched to the application store.
///
/// Random values are drawn when the intent is built (see
/// [`actions`](crate::app::actions)), so reducing stays deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Select a release channel.
    ChangeChannel { channel: Channel },

    /// Select an operating system.
    ChangeOs { os: Os },

    /// Append a value under the next free id.
    AddNumber { value: f64 },

    /// Replace the value of an existing entry.
    RandomizeNumber { id: u32, value: f64 },

    /// Remove an entry. Unknown ids are ignored.
    DeleteNumber { id: u32 },

    /// Empty the list.
    ClearNumbers,

    /// Toggle the "request in flight" flag.
    SetWaiting { waiting: bool },

    /// A fetch failed: stop waiting and remember why.
    FetchFailed { message: String },

    /// A fetch started: forget the previous failure.
    ClearError,
}

impl Intent for AppIntent {
    fn name(&self) -> &'static str {
        match self {
            AppIntent::ChangeChannel { .. } => "change_channel",
            AppIntent::ChangeOs { .. } => "change_os",
            AppIntent::AddNumber { .. } => "add_number",
            AppIntent::RandomizeNumber { .. } => "randomize_number",
            AppIntent::DeleteNumber { .. } => "delete_number",
            AppIntent::ClearNumbers => "clear_numbers",
            AppIntent::SetWaiting { .. } => "set_waiting",
            AppIntent::FetchFailed { .. } => "fetch_failed",
            AppIntent::ClearError => "clear_error",
        }
    }
}
