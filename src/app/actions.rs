//! Action constructors for the application store.
//!
//! Atomic constructors draw any random value up front and wrap an
//! [`AppIntent`]. `request_new_numbers_from_api` is the only composite action.

use std::sync::Arc;

use crate::app::catalog::{Channel, Os};
use crate::app::intent::AppIntent;
use crate::app::reducer::AppReducer;
use crate::app::source::{random_value, NumberSource};
use crate::store::{Action, RoutineContext, Store, StoreError};

/// How many values one fetch asks for.
pub const NUMBERS_PER_REQUEST: usize = 10;

pub type AppStore = Store<AppReducer>;
pub type AppAction = Action<AppReducer>;

pub fn change_channel(channel: Channel) -> AppAction {
    Action::atomic(AppIntent::ChangeChannel { channel })
}

pub fn change_os(os: Os) -> AppAction {
    Action::atomic(AppIntent::ChangeOs { os })
}

/// Append a fresh random value under the next free id.
pub fn add_random_number() -> AppAction {
    add_number(random_value())
}

/// Append `value` under the next free id.
pub fn add_number(value: f64) -> AppAction {
    Action::atomic(AppIntent::AddNumber { value })
}

/// Give entry `id` a fresh random value. Fails with `NotFound` for unknown ids.
pub fn randomize_number(id: u32) -> AppAction {
    Action::atomic(AppIntent::RandomizeNumber {
        id,
        value: random_value(),
    })
}

pub fn delete_random_number(id: u32) -> AppAction {
    Action::atomic(AppIntent::DeleteNumber { id })
}

pub fn clear_random_numbers() -> AppAction {
    Action::atomic(AppIntent::ClearNumbers)
}

pub fn set_api_waiting_status(waiting: bool) -> AppAction {
    Action::atomic(AppIntent::SetWaiting { waiting })
}

/// Replace the list with [`NUMBERS_PER_REQUEST`] values from `source`.
///
/// Clearing the list and raising the waiting flag happen inside `dispatch`;
/// the fetch and the appends run on the spawned routine. Whatever way the
/// routine ends, the waiting flag is lowered again: a fetch failure is
/// recorded in `last_error`, a cancellation just stops.
pub fn request_new_numbers_from_api(source: Arc<dyn NumberSource>) -> AppAction {
    Action::composite(
        "request_new_numbers_from_api",
        move |ctx: RoutineContext<AppReducer>| {
            let started = begin_request(&ctx);
            finish_request(ctx, source, started)
        },
    )
}

fn begin_request(ctx: &RoutineContext<AppReducer>) -> Result<(), StoreError> {
    ctx.dispatch(clear_random_numbers())?;
    ctx.dispatch(Action::atomic(AppIntent::ClearError))?;
    ctx.dispatch(set_api_waiting_status(true))?;
    Ok(())
}

async fn finish_request(
    ctx: RoutineContext<AppReducer>,
    source: Arc<dyn NumberSource>,
    started: Result<(), StoreError>,
) -> anyhow::Result<()> {
    started?;
    let outcome = fill_from_source(&ctx, source.as_ref()).await;
    if outcome.is_err() {
        // Unconditional: the raise may still sit in the store's queue, and the
        // reset is queued behind it.
        ctx.dispatcher().dispatch(set_api_waiting_status(false))?;
    }
    outcome
}

async fn fill_from_source(
    ctx: &RoutineContext<AppReducer>,
    source: &dyn NumberSource,
) -> anyhow::Result<()> {
    let fetched = tokio::select! {
        fetched = source.fetch(NUMBERS_PER_REQUEST) => fetched,
        _ = ctx.cancel_token().cancelled() => return Err(StoreError::Cancelled.into()),
    };

    let values = match fetched {
        Ok(values) => values,
        Err(err) => {
            ctx.dispatcher().dispatch(Action::atomic(AppIntent::FetchFailed {
                message: err.to_string(),
            }))?;
            return Err(anyhow::Error::new(err).context(format!("{} source failed", source.name())));
        }
    };

    tracing::debug!(source = source.name(), count = values.len(), "Numbers fetched");
    for value in values {
        ctx.dispatch(add_number(value))?;
    }
    ctx.dispatch(set_api_waiting_status(false))?;
    Ok(())
}
