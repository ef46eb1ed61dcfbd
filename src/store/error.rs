//! Error types for the store and its reducers.

use thiserror::Error;

/// Errors raised by a reducer while editing a draft.
///
/// The draft is discarded when one of these is returned, so the published
/// state is never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The intent referenced an entry that does not exist.
    #[error("No entry with id {id}")]
    NotFound { id: u32 },
}

/// Errors returned by [`Dispatcher::dispatch`](crate::store::Dispatcher::dispatch).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The atomic action failed; state is unchanged.
    #[error("Action failed: {0}")]
    Action(#[from] ActionError),

    /// A composite action was dispatched outside of a tokio runtime.
    #[error("Composite actions require a tokio runtime")]
    NoRuntime,

    /// The composite routine issuing the dispatch was cancelled.
    #[error("Routine cancelled")]
    Cancelled,
}
