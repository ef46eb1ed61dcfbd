//! Ordered subscriber registry shared by stores and derived views.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

pub(crate) type Callback<T> = Box<dyn Fn(&Arc<T>) + Send + Sync>;

/// Handle returned by `subscribe`.
///
/// Dropping the handle does NOT detach the callback; call
/// [`unsubscribe`](Self::unsubscribe) for that.
#[derive(Debug)]
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Subscription {
    /// Stop deliveries. Takes effect for a notification round in progress.
    pub fn unsubscribe(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

pub(crate) struct Subscriber<T> {
    active: Arc<AtomicBool>,
    callback: Callback<T>,
}

impl<T> Subscriber<T> {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub(crate) fn deliver(&self, value: &Arc<T>) {
        if self.is_active() {
            (self.callback)(value);
        }
    }
}

pub(crate) struct SubscriberList<T> {
    entries: Mutex<Vec<Arc<Subscriber<T>>>>,
}

impl<T> SubscriberList<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Build an entry and its handle without registering it yet.
    pub(crate) fn create(callback: Callback<T>) -> (Arc<Subscriber<T>>, Subscription) {
        let active = Arc::new(AtomicBool::new(true));
        let entry = Arc::new(Subscriber {
            active: Arc::clone(&active),
            callback,
        });
        (entry, Subscription { active })
    }

    pub(crate) fn attach(&self, entry: Arc<Subscriber<T>>) {
        self.entries.lock().push(entry);
    }

    /// Deliver `value` to every active subscriber in registration order.
    ///
    /// The registry lock is released before callbacks run, so callbacks may
    /// subscribe or unsubscribe freely.
    pub(crate) fn notify(&self, value: &Arc<T>) {
        let targets: Vec<Arc<Subscriber<T>>> = {
            let mut entries = self.entries.lock();
            entries.retain(|entry| entry.is_active());
            entries.clone()
        };

        for entry in targets {
            entry.deliver(value);
        }
    }

    pub(crate) fn active_count(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.is_active())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Callback<u32> {
        let log = Arc::clone(log);
        Box::new(move |value: &Arc<u32>| log.lock().push(format!("{tag}:{value}")))
    }

    #[test]
    fn notifies_in_registration_order() {
        let list = SubscriberList::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (first, _a) = SubscriberList::create(recorder(&log, "a"));
        let (second, _b) = SubscriberList::create(recorder(&log, "b"));
        list.attach(first);
        list.attach(second);

        list.notify(&Arc::new(1));

        assert_eq!(*log.lock(), vec!["a:1", "b:1"]);
    }

    #[test]
    fn unsubscribed_entries_are_skipped_and_pruned() {
        let list = SubscriberList::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (entry, handle) = SubscriberList::create(recorder(&log, "a"));
        list.attach(entry);
        assert_eq!(list.active_count(), 1);

        handle.unsubscribe();
        list.notify(&Arc::new(2));

        assert!(log.lock().is_empty());
        assert_eq!(list.active_count(), 0);
        assert!(!handle.is_active());
    }
}
