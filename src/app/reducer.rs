//! Reducer for the application store.

use std::sync::Arc;

use crate::app::intent::AppIntent;
use crate::app::state::{AppState, RandomNumber};
use crate::mvi::Reducer;
use crate::store::ActionError;

/// Reducer for application state transitions.
///
/// Only intents that touch the number list call `Arc::make_mut`, so every
/// other transition shares the list with the previous snapshot.
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = AppIntent;

    fn reduce(draft: &mut AppState, intent: AppIntent) -> Result<(), ActionError> {
        match intent {
            AppIntent::ChangeChannel { channel } => draft.channel = channel,

            AppIntent::ChangeOs { os } => draft.os = os,

            AppIntent::AddNumber { value } => {
                let id = draft.next_id();
                Arc::make_mut(&mut draft.random_numbers).push(RandomNumber { id, value });
            }

            AppIntent::RandomizeNumber { id, value } => {
                if draft.find_number(id).is_none() {
                    return Err(ActionError::NotFound { id });
                }
                if let Some(entry) = Arc::make_mut(&mut draft.random_numbers)
                    .iter_mut()
                    .find(|entry| entry.id == id)
                {
                    entry.value = value;
                }
            }

            AppIntent::DeleteNumber { id } => {
                // Avoid copying the list when there is nothing to remove.
                if draft.find_number(id).is_some() {
                    Arc::make_mut(&mut draft.random_numbers).retain(|entry| entry.id != id);
                }
            }

            AppIntent::ClearNumbers => {
                if !draft.random_numbers.is_empty() {
                    draft.random_numbers = Arc::new(Vec::new());
                }
            }

            AppIntent::SetWaiting { waiting } => draft.is_waiting = waiting,

            AppIntent::FetchFailed { message } => {
                draft.is_waiting = false;
                draft.last_error = Some(message);
            }

            AppIntent::ClearError => draft.last_error = None,
        }
        Ok(())
    }
}
