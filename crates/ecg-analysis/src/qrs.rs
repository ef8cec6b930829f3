//! QRS Complex Detection

use crate::config::QrsConfig;
use std::collections::VecDeque;
use std::sync::Mutex;
use tmd_queue::{ObserverError, SampleObserver, TimeMarkedData};
use tracing::debug;

/// RR intervals kept for heart-rate averaging
const RR_HISTORY: usize = 32;

/// Detection state (tracked across samples)
#[derive(Debug, Default)]
struct QrsState {
    /// Whether the previous sample was above threshold
    above: bool,
    /// Timestamp of the last accepted beat
    last_beat_ms: Option<u64>,
    /// Accepted beats so far
    beat_count: u64,
    /// Recent RR intervals (ms)
    rr_intervals: VecDeque<u64>,
}

/// Rising-edge QRS detector with a refractory period.
///
/// A beat is accepted when the amplitude crosses the threshold from below
/// and the refractory window since the previous beat has elapsed. State
/// lives behind the detector's own lock; the queue is never involved.
pub struct QrsDetector {
    config: QrsConfig,
    state: Mutex<QrsState>,
}

impl QrsDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: QrsConfig) -> Self {
        Self {
            config,
            state: Mutex::new(QrsState::default()),
        }
    }

    /// Total beats accepted.
    pub fn beat_count(&self) -> u64 {
        self.state.lock().map(|s| s.beat_count).unwrap_or(0)
    }

    /// Heart rate from the most recent RR interval, if one exists.
    pub fn heart_rate_bpm(&self) -> Option<f64> {
        let state = self.state.lock().ok()?;
        state.rr_intervals.back().map(|&rr| 60_000.0 / rr as f64)
    }

    /// Heart rate averaged over the retained RR history.
    pub fn mean_heart_rate_bpm(&self) -> Option<f64> {
        let state = self.state.lock().ok()?;
        if state.rr_intervals.is_empty() {
            return None;
        }
        let mean_rr: f64 = state.rr_intervals.iter().sum::<u64>() as f64
            / state.rr_intervals.len() as f64;
        Some(60_000.0 / mean_rr)
    }
}

impl Default for QrsDetector {
    fn default() -> Self {
        Self::new(QrsConfig::default())
    }
}

impl SampleObserver for QrsDetector {
    fn on_sample(&self, sample: TimeMarkedData, _fill: usize) -> Result<(), ObserverError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ObserverError::new("QRS detector state poisoned"))?;

        let above = sample.data_value() >= self.config.r_threshold;
        let rising_edge = above && !state.above;
        state.above = above;

        if rising_edge {
            let t = sample.time_interval();
            let accepted = match state.last_beat_ms {
                Some(prev) => t.saturating_sub(prev) >= self.config.refractory_ms,
                None => true,
            };
            if accepted {
                if let Some(prev) = state.last_beat_ms {
                    state.rr_intervals.push_back(t - prev);
                    if state.rr_intervals.len() > RR_HISTORY {
                        state.rr_intervals.pop_front();
                    }
                }
                state.last_beat_ms = Some(t);
                state.beat_count += 1;
                debug!("QRS complex at t={} (beat {})", t, state.beat_count);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Impulse train: one above-threshold spike per beat time, back to
    /// baseline right after.
    fn feed_beats(detector: &QrsDetector, beat_times_ms: &[u64]) {
        for &t in beat_times_ms {
            detector
                .on_sample(TimeMarkedData::new(t, 1_000), 0)
                .unwrap();
            detector.on_sample(TimeMarkedData::new(t + 20, 0), 0).unwrap();
        }
    }

    #[test]
    fn test_counts_beats_and_derives_rate() {
        let detector = QrsDetector::default();
        feed_beats(&detector, &[0, 800, 1_600, 2_400]);

        assert_eq!(detector.beat_count(), 4);
        assert_eq!(detector.heart_rate_bpm(), Some(75.0));
        assert_eq!(detector.mean_heart_rate_bpm(), Some(75.0));
    }

    #[test]
    fn test_no_rate_before_second_beat() {
        let detector = QrsDetector::default();
        assert_eq!(detector.heart_rate_bpm(), None);

        feed_beats(&detector, &[500]);
        assert_eq!(detector.beat_count(), 1);
        assert_eq!(detector.heart_rate_bpm(), None);
    }

    #[test]
    fn test_refractory_rejects_double_trigger() {
        let detector = QrsDetector::default();
        // Second spike 50 ms after the first, inside the 200 ms refractory.
        feed_beats(&detector, &[1_000, 1_050, 2_000]);

        assert_eq!(detector.beat_count(), 2);
        assert_eq!(detector.heart_rate_bpm(), Some(60.0));
    }

    #[test]
    fn test_sustained_plateau_is_one_beat() {
        let detector = QrsDetector::default();
        for t in 0..10u64 {
            detector
                .on_sample(TimeMarkedData::new(t * 4, 900), 0)
                .unwrap();
        }
        assert_eq!(detector.beat_count(), 1);
    }

    #[test]
    fn test_subthreshold_samples_are_ignored() {
        let detector = QrsDetector::default();
        for t in 0..100u64 {
            detector
                .on_sample(TimeMarkedData::new(t * 4, 300), 0)
                .unwrap();
        }
        assert_eq!(detector.beat_count(), 0);
    }
}
