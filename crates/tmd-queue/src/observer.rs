//! Observer Registration and Notification

use crate::error::ObserverError;
use crate::sample::TimeMarkedData;
use std::sync::{Arc, Weak};

/// Capability implemented by every queue consumer.
///
/// `on_sample` is invoked once per append, on the appending thread, with a
/// copy of the new sample and the queue's fill level at the time of the
/// append. No lock is held during the call: a slow observer delays the
/// observers registered after it, but never the producer's next append.
///
/// A notification is a hint, not a cursor. The ring may already have moved
/// on by the time a callback runs, so consumers needing buffer contents
/// should go back through `read_latest`/`read_all` rather than caching
/// positions derived from the payload.
pub trait SampleObserver: Send + Sync {
    /// Handle a freshly appended sample.
    fn on_sample(&self, sample: TimeMarkedData, fill: usize) -> Result<(), ObserverError>;
}

/// Registration table mapping observer identity to notification target,
/// in subscription order.
///
/// Holds weak references only: the queue never owns a consumer's lifetime.
/// Entries whose owner dropped the observer are pruned lazily.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    entries: Vec<(String, Weak<dyn SampleObserver>)>,
}

impl ObserverRegistry {
    /// Drop entries whose observer no longer exists.
    pub fn prune(&mut self) {
        self.entries.retain(|(_, weak)| weak.strong_count() > 0);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(known, _)| known == id)
    }

    pub fn register(&mut self, id: String, observer: Weak<dyn SampleObserver>) {
        self.entries.push((id, observer));
    }

    /// Remove a registration by identity. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(known, _)| known != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Upgrade the live observers in registration order, pruning the dead.
    ///
    /// The returned vector is the dispatch snapshot: callers iterate it
    /// after releasing the queue lock.
    pub fn snapshot(&mut self) -> Vec<(String, Arc<dyn SampleObserver>)> {
        self.prune();
        self.entries
            .iter()
            .filter_map(|(id, weak)| weak.upgrade().map(|observer| (id.clone(), observer)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl SampleObserver for Noop {
        fn on_sample(&self, _sample: TimeMarkedData, _fill: usize) -> Result<(), ObserverError> {
            Ok(())
        }
    }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        let mut registry = ObserverRegistry::default();
        let first: Arc<dyn SampleObserver> = Arc::new(Noop);
        let second: Arc<dyn SampleObserver> = Arc::new(Noop);
        registry.register("first".into(), Arc::downgrade(&first));
        registry.register("second".into(), Arc::downgrade(&second));

        let ids: Vec<String> = registry.snapshot().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_dropped_observer_is_pruned() {
        let mut registry = ObserverRegistry::default();
        let keep: Arc<dyn SampleObserver> = Arc::new(Noop);
        let drop_me: Arc<dyn SampleObserver> = Arc::new(Noop);
        registry.register("keep".into(), Arc::downgrade(&keep));
        registry.register("gone".into(), Arc::downgrade(&drop_me));
        drop(drop_me);

        let ids: Vec<String> = registry.snapshot().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["keep".to_string()]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut registry = ObserverRegistry::default();
        let observer: Arc<dyn SampleObserver> = Arc::new(Noop);
        registry.register("only".into(), Arc::downgrade(&observer));

        assert!(registry.remove("only"));
        assert!(!registry.remove("only"));
    }
}
