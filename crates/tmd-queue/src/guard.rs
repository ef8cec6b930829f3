//! Exclusive Lock Wrapper

use crate::error::QueueError;
use std::sync::{Mutex, MutexGuard};

/// Exclusive lock around the queue's mutable state.
///
/// Wraps [`std::sync::Mutex`] and maps poisoning (a previous holder
/// panicked inside the critical section) to [`QueueError::LockPoisoned`]
/// rather than panicking or silently recovering. Release is tied to guard
/// drop, so an unlock can never be skipped or performed twice.
///
/// Held only for index arithmetic and slot copies. Never held across
/// observer callbacks or I/O.
pub(crate) struct StateLock<T> {
    inner: Mutex<T>,
}

impl<T> StateLock<T> {
    /// Create an unlocked lock owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Block until exclusive ownership is acquired.
    pub fn lock(&self) -> Result<MutexGuard<'_, T>, QueueError> {
        self.inner
            .lock()
            .map_err(|e| QueueError::LockPoisoned(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_round_trip() {
        let lock = StateLock::new(7u32);
        {
            let mut guard = lock.lock().unwrap();
            *guard += 1;
        }
        assert_eq!(*lock.lock().unwrap(), 8);
    }

    #[test]
    fn test_poison_surfaces_as_error() {
        use std::sync::Arc;

        let lock = Arc::new(StateLock::new(0u32));
        let poisoner = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        match lock.lock() {
            Err(QueueError::LockPoisoned(_)) => {}
            other => panic!("expected LockPoisoned, got {:?}", other.map(|g| *g)),
        };
    }
}
