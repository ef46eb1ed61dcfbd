//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::StoreState;
use crate::store::ActionError;

/// Reducer applies intents to a draft of the state.
///
/// The reducer is the only place where state transitions happen. It receives
/// a private working copy; the store publishes that copy only if the reducer
/// returns `Ok`.
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: StoreState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Edit `draft` according to `intent`.
    ///
    /// This should be a pure function of `draft` and `intent`. On error the
    /// draft is discarded, so partial edits are never observed.
    fn reduce(draft: &mut Self::State, intent: Self::Intent) -> Result<(), ActionError>;
}
