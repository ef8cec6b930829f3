//! Time-Marked Data Distribution
//!
//! Provides a fixed-capacity, mutex-guarded ring of timestamped waveform
//! samples with publish/subscribe fan-out. One producer appends; any number
//! of consumers receive push notifications or poll the ring directly.

mod error;
mod guard;
mod observer;
mod queue;
mod sample;

pub use error::{ObserverError, QueueError};
pub use observer::SampleObserver;
pub use queue::{TmdQueue, DEFAULT_CAPACITY};
pub use sample::TimeMarkedData;
