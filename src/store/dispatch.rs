//! Actions and the dispatch entry point.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_core::future::BoxFuture;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::cancel::CancelToken;
use super::error::StoreError;
use super::Store;
use crate::mvi::{Intent, Reducer};

type Routine<R> =
    Box<dyn FnOnce(RoutineContext<R>) -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// A state transition request.
///
/// The variant is chosen by whoever builds the action; the dispatcher only
/// matches on it.
pub enum Action<R: Reducer> {
    /// Applied synchronously to a draft by the reducer.
    Atomic(R::Intent),
    /// Spawned as a routine that issues further dispatches over time.
    Composite(CompositeAction<R>),
}

impl<R: Reducer> Action<R> {
    pub fn atomic(intent: R::Intent) -> Self {
        Action::Atomic(intent)
    }

    /// See [`CompositeAction::new`].
    pub fn composite<F, Fut>(name: &'static str, routine: F) -> Self
    where
        F: FnOnce(RoutineContext<R>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Action::Composite(CompositeAction::new(name, routine))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Atomic(intent) => intent.name(),
            Action::Composite(composite) => composite.name(),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Action::Composite(_))
    }
}

impl<R: Reducer> fmt::Debug for Action<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Atomic(intent) => f.debug_tuple("Atomic").field(intent).finish(),
            Action::Composite(composite) => {
                f.debug_tuple("Composite").field(&composite.name).finish()
            }
        }
    }
}

/// A coordinating routine.
pub struct CompositeAction<R: Reducer> {
    name: &'static str,
    routine: Routine<R>,
}

impl<R: Reducer> CompositeAction<R> {
    /// Wrap `routine`.
    ///
    /// `routine` itself is called synchronously inside `dispatch`, so anything
    /// it does before building its future (typically a few atomic dispatches)
    /// is visible as soon as `dispatch` returns. The future it returns is
    /// spawned on the current tokio runtime.
    pub fn new<F, Fut>(name: &'static str, routine: F) -> Self
    where
        F: FnOnce(RoutineContext<R>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name,
            routine: Box::new(
                move |ctx| -> BoxFuture<'static, anyhow::Result<()>> { Box::pin(routine(ctx)) },
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Result of a successful dispatch.
#[derive(Debug)]
pub enum Dispatched {
    /// The intent produced a new state and subscribers were notified.
    Applied,
    /// The intent left the state equal to the previous one; nobody was notified.
    Unchanged,
    /// A notification round was running; the intent was queued behind it.
    Deferred,
    /// A composite routine was started.
    Spawned(RoutineHandle),
}

impl Dispatched {
    pub fn into_routine(self) -> Option<RoutineHandle> {
        match self {
            Dispatched::Spawned(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Write-only access to a store.
///
/// Exposes `dispatch`, `get_state` and `connect`; the replace primitive stays
/// private to the store.
pub struct Dispatcher<R: Reducer> {
    store: Store<R>,
}

impl<R: Reducer> Clone for Dispatcher<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<R: Reducer> Dispatcher<R> {
    pub(crate) fn new(store: Store<R>) -> Self {
        Self { store }
    }

    /// Apply an atomic action or start a composite one.
    ///
    /// # Errors
    /// Reducer failures are returned as [`StoreError::Action`] and leave the
    /// state untouched. Composite actions fail with [`StoreError::NoRuntime`]
    /// when called outside a tokio runtime.
    pub fn dispatch(&self, action: Action<R>) -> Result<Dispatched, StoreError> {
        match action {
            Action::Atomic(intent) => self.store.apply(intent),
            Action::Composite(composite) => self.spawn(composite).map(Dispatched::Spawned),
        }
    }

    pub fn get_state(&self) -> Arc<R::State> {
        self.store.snapshot()
    }

    /// Bind an action constructor to this dispatcher.
    ///
    /// Constructors with several arguments take them as a tuple; zero-argument
    /// constructors take `()`.
    pub fn connect<A, F>(
        &self,
        constructor: F,
    ) -> impl Fn(A) -> Result<Dispatched, StoreError> + Send + Sync + 'static
    where
        A: 'static,
        F: Fn(A) -> Action<R> + Send + Sync + 'static,
    {
        let dispatcher = self.clone();
        move |args| dispatcher.dispatch(constructor(args))
    }

    fn spawn(&self, composite: CompositeAction<R>) -> Result<RoutineHandle, StoreError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| StoreError::NoRuntime)?;

        let id = Uuid::new_v4();
        let name = composite.name;
        let cancel = CancelToken::new();
        let ctx = RoutineContext {
            id,
            dispatcher: self.clone(),
            cancel: cancel.clone(),
        };

        tracing::info!(routine = name, %id, "Composite routine started");
        let future = (composite.routine)(ctx);
        let join = runtime.spawn(async move {
            let outcome = future.await;
            match &outcome {
                Ok(()) => tracing::info!(routine = name, %id, "Composite routine finished"),
                Err(err) => {
                    tracing::error!(routine = name, %id, error = %format!("{err:#}"), "Composite routine failed")
                }
            }
            outcome
        });

        Ok(RoutineHandle {
            id,
            name,
            cancel,
            join,
        })
    }
}

/// What a composite routine gets to work with: dispatch, getState and its
/// cancellation token.
pub struct RoutineContext<R: Reducer> {
    id: Uuid,
    dispatcher: Dispatcher<R>,
    cancel: CancelToken,
}

impl<R: Reducer> RoutineContext<R> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Dispatch unless the routine has been cancelled.
    pub fn dispatch(&self, action: Action<R>) -> Result<Dispatched, StoreError> {
        if self.cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        self.dispatcher.dispatch(action)
    }

    pub fn get_state(&self) -> Arc<R::State> {
        self.dispatcher.get_state()
    }

    /// Dispatcher that ignores cancellation, for cleanup on the way out.
    pub fn dispatcher(&self) -> &Dispatcher<R> {
        &self.dispatcher
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Sleep for `duration`, returning early with [`StoreError::Cancelled`].
    pub async fn sleep(&self, duration: Duration) -> Result<(), StoreError> {
        tokio::select! {
            _ = tokio::time::sleep(duration) => Ok(()),
            _ = self.cancel.cancelled() => Err(StoreError::Cancelled),
        }
    }
}

/// Handle to a running composite routine.
#[derive(Debug)]
pub struct RoutineHandle {
    id: Uuid,
    name: &'static str,
    cancel: CancelToken,
    join: JoinHandle<anyhow::Result<()>>,
}

impl RoutineHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ask the routine to stop at its next dispatch or suspension point.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the routine and return its outcome.
    pub async fn join(self) -> anyhow::Result<()> {
        let RoutineHandle { name, join, .. } = self;
        match join.await {
            Ok(outcome) => outcome,
            Err(err) => Err(anyhow::anyhow!("Routine '{}' aborted: {}", name, err)),
        }
    }
}
