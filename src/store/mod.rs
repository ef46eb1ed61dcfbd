//! Single-cell state container with dispatch, subscriptions and derived views.
//!
//! # Architecture
//!
//! ```text
//! consumer ──► Dispatcher::dispatch(Action)
//!                   │
//!        ┌──────────┴───────────┐
//!        ▼                      ▼
//!   Atomic(intent)        Composite(routine)
//!        │                      │
//!        ▼                      ▼ tokio::spawn
//!   gate (busy? queue)    RoutineContext ──► dispatch(..) ...
//!        │
//!        ▼
//!   produce(snapshot, reducer) ──► replace ──► subscribers (in order)
//! ```
//!
//! ## Reentrancy
//!
//! The store runs one notification round at a time. A dispatch or subscribe
//! issued while a round is running (from a subscriber callback, or from
//! another thread) is queued and executed, in order, by the thread that owns
//! the round before its own dispatch returns. Queued dispatches report
//! [`Dispatched::Deferred`]; their errors are logged because no caller is left
//! to receive them.

mod cancel;
mod derived;
mod dispatch;
mod error;
mod produce;
mod subscribers;

pub use cancel::CancelToken;
pub use derived::Derived;
pub use dispatch::{Action, CompositeAction, Dispatched, Dispatcher, RoutineContext, RoutineHandle};
pub use error::{ActionError, StoreError};
pub use produce::produce;
pub use subscribers::Subscription;

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::mvi::{Intent, Reducer};
use subscribers::{Subscriber, SubscriberList};

/// Work serialised through the store's gate.
enum Job<R: Reducer> {
    Apply(R::Intent),
    Attach(Arc<Subscriber<R::State>>),
}

impl<R: Reducer> Job<R> {
    fn name(&self) -> &'static str {
        match self {
            Job::Apply(intent) => intent.name(),
            Job::Attach(_) => "subscribe",
        }
    }
}

struct Gate<R: Reducer> {
    busy: bool,
    queue: VecDeque<Job<R>>,
}

struct StoreInner<R: Reducer> {
    state: RwLock<Arc<R::State>>,
    subscribers: SubscriberList<R::State>,
    gate: Mutex<Gate<R>>,
}

/// Owner of one application state cell.
///
/// Cloning a `Store` yields another handle to the same cell. Consumers that
/// should only write through dispatch get a [`Dispatcher`] instead.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(initial)),
                subscribers: SubscriberList::new(),
                gate: Mutex::new(Gate {
                    busy: false,
                    queue: VecDeque::new(),
                }),
            }),
        }
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Arc<R::State> {
        self.inner.state.read().clone()
    }

    /// Register `callback`.
    ///
    /// The callback receives the current state right away, then every new
    /// state after each replacement.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<R::State>) + Send + Sync + 'static,
    {
        let (entry, subscription) = SubscriberList::create(Box::new(callback));
        // Attach never fails.
        let _ = self.submit(Job::Attach(entry));
        subscription
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.active_count()
    }

    /// Write-only handle for consumers.
    pub fn dispatcher(&self) -> Dispatcher<R> {
        Dispatcher::new(self.clone())
    }

    /// Shorthand for `self.dispatcher().dispatch(action)`.
    pub fn dispatch(&self, action: Action<R>) -> Result<Dispatched, StoreError> {
        self.dispatcher().dispatch(action)
    }

    pub(crate) fn apply(&self, intent: R::Intent) -> Result<Dispatched, StoreError> {
        self.submit(Job::Apply(intent))
    }

    fn submit(&self, job: Job<R>) -> Result<Dispatched, StoreError> {
        {
            let mut gate = self.inner.gate.lock();
            if gate.busy {
                tracing::trace!(job = job.name(), queued = gate.queue.len() + 1, "Deferring store job");
                gate.queue.push_back(job);
                return Ok(Dispatched::Deferred);
            }
            gate.busy = true;
        }

        let inner = &self.inner;
        let _round = scopeguard::guard_on_unwind((), |()| {
            let mut gate = inner.gate.lock();
            let dropped = gate.queue.len();
            gate.queue.clear();
            gate.busy = false;
            tracing::warn!(dropped, "Subscriber panicked, pending store jobs dropped");
        });

        let outcome = self.run(job);

        loop {
            let next = {
                let mut gate = self.inner.gate.lock();
                match gate.queue.pop_front() {
                    Some(next) => next,
                    None => {
                        gate.busy = false;
                        break;
                    }
                }
            };
            let name = next.name();
            if let Err(err) = self.run(next) {
                tracing::warn!(job = name, error = %err, "Deferred dispatch failed");
            }
        }

        outcome
    }

    fn run(&self, job: Job<R>) -> Result<Dispatched, StoreError> {
        match job {
            Job::Apply(intent) => {
                let name = intent.name();
                let base = self.snapshot();
                let next = produce(&base, |draft| R::reduce(draft, intent)).map_err(|err| {
                    tracing::debug!(intent = name, error = %err, "Intent rejected");
                    err
                })?;

                if Arc::ptr_eq(&base, &next) {
                    tracing::trace!(intent = name, "Intent left state unchanged");
                    return Ok(Dispatched::Unchanged);
                }

                tracing::debug!(intent = name, "State replaced");
                self.replace(next);
                Ok(Dispatched::Applied)
            }
            Job::Attach(entry) => {
                self.inner.subscribers.attach(Arc::clone(&entry));
                entry.deliver(&self.snapshot());
                Ok(Dispatched::Unchanged)
            }
        }
    }

    fn replace(&self, next: Arc<R::State>) {
        *self.inner.state.write() = Arc::clone(&next);
        self.inner.subscribers.notify(&next);
    }
}
