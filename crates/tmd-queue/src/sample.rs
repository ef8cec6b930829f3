//! Time-Marked Sample Type

use serde::{Deserialize, Serialize};

/// A single timestamped waveform sample.
///
/// Immutable once constructed and always moved by value: the queue copies
/// samples in on append and copies them out on read, so no reference into
/// queue storage ever crosses a thread boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeMarkedData {
    /// Logical timestamp, non-decreasing per producer (ms)
    time_interval: u64,
    /// Sampled amplitude (ADC counts)
    data_value: i32,
}

impl TimeMarkedData {
    /// Create a new sample.
    pub fn new(time_interval: u64, data_value: i32) -> Self {
        Self {
            time_interval,
            data_value,
        }
    }

    /// The sample's logical timestamp.
    pub fn time_interval(&self) -> u64 {
        self.time_interval
    }

    /// The sampled amplitude.
    pub fn data_value(&self) -> i32 {
        self.data_value
    }
}
