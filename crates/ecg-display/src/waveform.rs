//! Sliding Waveform Display

use std::collections::VecDeque;
use std::sync::Mutex;
use tmd_queue::{ObserverError, QueueError, SampleObserver, TimeMarkedData, TmdQueue};

/// Glyphs from lowest to highest amplitude
const LEVELS: [char; 8] = ['_', '.', '-', '=', '+', '*', '#', '@'];

/// Keeps the most recent samples for a sweep-style trace.
///
/// Push notifications keep the window current sample-by-sample; after a
/// gap (late attach, slow consumer), `refresh_from` re-pulls the whole
/// window from the queue's bulk read instead of trusting stale payloads.
pub struct WaveformDisplay {
    window: usize,
    state: Mutex<VecDeque<TimeMarkedData>>,
}

impl WaveformDisplay {
    /// Create a display retaining the most recent `window` samples.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            state: Mutex::new(VecDeque::new()),
        }
    }

    /// The retained samples, oldest first.
    pub fn samples(&self) -> Vec<TimeMarkedData> {
        self.state
            .lock()
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Replace the window with the newest samples currently in the queue.
    pub fn refresh_from(&self, queue: &TmdQueue) -> Result<(), QueueError> {
        let all = queue.read_all()?;
        let tail = all.len().saturating_sub(self.window);
        let mut state = self
            .state
            .lock()
            .map_err(|e| QueueError::LockPoisoned(e.to_string()))?;
        state.clear();
        state.extend(all[tail..].iter().copied());
        Ok(())
    }

    /// Render the window as a one-line amplitude trace.
    pub fn render(&self) -> String {
        let samples = self.samples();
        if samples.is_empty() {
            return String::new();
        }
        let min = samples.iter().map(|s| s.data_value()).min().unwrap_or(0);
        let max = samples.iter().map(|s| s.data_value()).max().unwrap_or(0);
        let span = (max - min).max(1) as i64;
        samples
            .iter()
            .map(|s| {
                let scaled =
                    (s.data_value() - min) as i64 * (LEVELS.len() as i64 - 1) / span;
                LEVELS[scaled as usize]
            })
            .collect()
    }
}

impl SampleObserver for WaveformDisplay {
    fn on_sample(&self, sample: TimeMarkedData, _fill: usize) -> Result<(), ObserverError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ObserverError::new("waveform state poisoned"))?;
        if state.len() >= self.window {
            state.pop_front();
        }
        state.push_back(sample);
        Ok(())
    }
}
