//! Derived views: values recomputed from store state on every change.

use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};

use super::subscribers::{SubscriberList, Subscription};
use super::Store;
use crate::mvi::Reducer;

struct DerivedInner<T> {
    value: RwLock<Arc<T>>,
    subscribers: SubscriberList<T>,
    /// Held while a value is published or a subscriber gets its first value.
    /// Reentrant so callbacks may subscribe to the same view.
    delivery: ReentrantMutex<()>,
}

/// A read-only projection of a store's state.
///
/// The projection is recomputed synchronously inside every store
/// notification; its own subscribers hear about it only when the computed
/// value differs from the previous one. Dropping the `Derived` detaches it
/// from the store.
pub struct Derived<T> {
    inner: Arc<DerivedInner<T>>,
    source: Subscription,
}

impl<T> Derived<T> {
    /// Current value.
    pub fn get(&self) -> Arc<T> {
        self.inner.value.read().clone()
    }

    /// Register `callback`; it receives the current value right away.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        let (entry, subscription) = SubscriberList::create(Box::new(callback));
        let _delivery = self.inner.delivery.lock();
        self.inner.subscribers.attach(Arc::clone(&entry));
        entry.deliver(&self.get());
        subscription
    }
}

impl<T> Drop for Derived<T> {
    fn drop(&mut self) {
        self.source.unsubscribe();
    }
}

impl<R: Reducer> Store<R> {
    /// Build a view that tracks `compute(state)`.
    pub fn derive<T, F>(&self, compute: F) -> Derived<T>
    where
        T: PartialEq + Send + Sync + 'static,
        F: Fn(&R::State) -> T + Send + Sync + 'static,
    {
        let inner = Arc::new(DerivedInner {
            value: RwLock::new(Arc::new(compute(&self.snapshot()))),
            subscribers: SubscriberList::new(),
            delivery: ReentrantMutex::new(()),
        });

        let weak = Arc::downgrade(&inner);
        let source = self.subscribe(move |state: &Arc<R::State>| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let _delivery = inner.delivery.lock();
            let next = compute(state);
            let published = {
                let mut value = inner.value.write();
                if **value == next {
                    return;
                }
                let next = Arc::new(next);
                *value = Arc::clone(&next);
                next
            };
            inner.subscribers.notify(&published);
        });

        Derived { inner, source }
    }
}
