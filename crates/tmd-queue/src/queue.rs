//! Fixed-Capacity Time-Marked Data Queue

use crate::error::QueueError;
use crate::guard::StateLock;
use crate::observer::{ObserverRegistry, SampleObserver};
use crate::sample::TimeMarkedData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default capacity (20000 slots = ~80 s of waveform at 250 Hz)
pub const DEFAULT_CAPACITY: usize = 20_000;

/// Everything behind the queue's lock: ring storage, write indices, and the
/// observer registration table.
struct QueueState {
    /// Pre-allocated ring storage
    storage: Box<[TimeMarkedData]>,
    /// Next write position
    head: usize,
    /// Number of valid entries, saturates at capacity
    count: usize,
    /// Registered observers, in subscription order
    observers: ObserverRegistry,
}

/// Fixed-capacity circular buffer of [`TimeMarkedData`] with
/// publish/subscribe fan-out.
///
/// One producer appends; any number of consumers poll or subscribe. The
/// ring never blocks the producer: at capacity a new append overwrites the
/// oldest entry, so sustained overflow ages out history instead of
/// stalling the sampling clock. Every read is a value copy taken under the
/// lock; no reference into the storage escapes the critical section.
///
/// Observer callbacks run after the lock is released. An observer may
/// therefore be told about a sample that a newer append has already
/// displaced; the push payload is informational and the read API is the
/// source of truth.
pub struct TmdQueue {
    state: StateLock<QueueState>,
    capacity: usize,
}

impl TmdQueue {
    /// Create an empty queue with the given fixed capacity.
    ///
    /// The storage is allocated once here; the queue never grows or
    /// shrinks afterwards.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity);
        }
        let storage = vec![TimeMarkedData::default(); capacity].into_boxed_slice();
        debug!("created queue with capacity {}", capacity);
        Ok(Self {
            state: StateLock::new(QueueState {
                storage,
                head: 0,
                count: 0,
                observers: ObserverRegistry::default(),
            }),
            capacity,
        })
    }

    /// Create a queue with the default capacity (20000 slots).
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY).expect("DEFAULT_CAPACITY is non-zero")
    }

    /// Append a sample, then notify every registered observer.
    ///
    /// At capacity the oldest entry is overwritten and `count` stays put:
    /// a full queue is steady-state behavior, not an error. The critical
    /// section covers only the slot write and index arithmetic;
    /// notifications are dispatched afterwards, in registration order, on
    /// the calling thread, from a snapshot taken under the lock. A failing
    /// observer is logged and skipped; delivery continues with the rest.
    pub fn append(&self, sample: TimeMarkedData) -> Result<(), QueueError> {
        let (fill, notify) = {
            let mut state = self.state.lock()?;
            let head = state.head;
            state.storage[head] = sample;
            state.head = (head + 1) % self.capacity;
            if state.count < self.capacity {
                state.count += 1;
            }
            (state.count, state.observers.snapshot())
        };

        for (id, observer) in notify {
            if let Err(e) = observer.on_sample(sample, fill) {
                warn!(
                    "observer `{}` failed on sample t={}: {}",
                    id,
                    sample.time_interval(),
                    e
                );
            }
        }
        Ok(())
    }

    /// Copy out the most recently appended sample.
    ///
    /// Returns `None` on a queue that has never been appended to.
    pub fn read_latest(&self) -> Result<Option<TimeMarkedData>, QueueError> {
        let state = self.state.lock()?;
        if state.count == 0 {
            return Ok(None);
        }
        let newest = (state.head + self.capacity - 1) % self.capacity;
        Ok(Some(state.storage[newest]))
    }

    /// Copy out every valid entry, oldest first.
    pub fn read_all(&self) -> Result<Vec<TimeMarkedData>, QueueError> {
        let state = self.state.lock()?;
        let oldest = (state.head + self.capacity - state.count) % self.capacity;
        let mut window = Vec::with_capacity(state.count);
        for i in 0..state.count {
            window.push(state.storage[(oldest + i) % self.capacity]);
        }
        Ok(window)
    }

    /// Register an observer under the given identity.
    ///
    /// The queue stores only a weak reference: dropping the observer's
    /// owning `Arc` stops notifications without an explicit unsubscribe.
    /// A duplicate identity is rejected and the existing registration left
    /// untouched.
    pub fn subscribe(
        &self,
        id: impl Into<String>,
        observer: Arc<dyn SampleObserver>,
    ) -> Result<(), QueueError> {
        let id = id.into();
        let mut state = self.state.lock()?;
        state.observers.prune();
        if state.observers.contains(&id) {
            return Err(QueueError::DuplicateSubscription(id));
        }
        debug!("observer `{}` subscribed", id);
        state.observers.register(id, Arc::downgrade(&observer));
        Ok(())
    }

    /// Remove a previously registered observer.
    ///
    /// Returns whether a registration was actually removed; an unknown
    /// identity is not an error.
    pub fn unsubscribe(&self, id: &str) -> Result<bool, QueueError> {
        let mut state = self.state.lock()?;
        let removed = state.observers.remove(id);
        if removed {
            debug!("observer `{}` unsubscribed", id);
        }
        Ok(removed)
    }

    /// Number of live observer registrations.
    pub fn observer_count(&self) -> Result<usize, QueueError> {
        let mut state = self.state.lock()?;
        state.observers.prune();
        Ok(state.observers.len())
    }

    /// Current fill count.
    pub fn len(&self) -> Result<usize, QueueError> {
        Ok(self.state.lock()?.count)
    }

    /// Whether the queue holds no samples.
    pub fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.len()? == 0)
    }

    /// Fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
