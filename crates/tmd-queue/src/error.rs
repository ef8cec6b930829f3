//! Queue Error Types

use thiserror::Error;

/// Errors raised by queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    /// Zero capacity rejected at construction
    #[error("queue capacity must be greater than zero")]
    InvalidCapacity,

    /// Observer identity already present in the registration table
    #[error("observer `{0}` is already subscribed")]
    DuplicateSubscription(String),

    /// The queue's lock was poisoned by a holder that panicked mid-update.
    /// Indicates a synchronization contract violation, never swallowed.
    #[error("queue lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Failure reported by an individual observer callback.
///
/// Isolated per observer: the dispatcher logs it and continues delivery to
/// the remaining observers. Never reaches the producer's `append` result.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ObserverError(String);

impl ObserverError {
    /// Create an observer failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
