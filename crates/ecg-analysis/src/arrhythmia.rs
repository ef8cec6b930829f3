//! Arrhythmia Classification

use crate::config::ArrhythmiaConfig;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use tmd_queue::{ObserverError, SampleObserver, TimeMarkedData};
use tracing::warn;

/// Retained events before the oldest are discarded
const MAX_EVENTS: usize = 1_024;

/// Kind of rhythm anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrhythmiaKind {
    /// Rate below the bradycardia threshold
    Bradycardia,
    /// Rate above the tachycardia threshold
    Tachycardia,
    /// RR interval deviating from the running baseline
    IrregularRhythm,
}

/// A detected rhythm anomaly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrhythmiaEvent {
    /// Timestamp of the beat that triggered the event (ms)
    pub at_ms: u64,
    /// Classification
    pub kind: ArrhythmiaKind,
    /// The RR interval that triggered it (ms)
    pub rr_ms: u64,
}

#[derive(Debug, Default)]
struct RhythmState {
    above: bool,
    last_beat_ms: Option<u64>,
    /// RR baseline window (ms)
    rr_history: VecDeque<u64>,
    events: Vec<ArrhythmiaEvent>,
}

/// RR-interval rhythm classifier.
///
/// Detects beats the same way the QRS detector does, then judges each new
/// RR interval against absolute rate bounds and the running RR baseline.
/// Rate-bound violations win over irregularity when both apply.
pub struct ArrhythmiaDetector {
    config: ArrhythmiaConfig,
    state: Mutex<RhythmState>,
}

impl ArrhythmiaDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: ArrhythmiaConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RhythmState::default()),
        }
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> Vec<ArrhythmiaEvent> {
        self.state
            .lock()
            .map(|s| s.events.clone())
            .unwrap_or_default()
    }

    /// Number of events recorded so far.
    pub fn event_count(&self) -> usize {
        self.state.lock().map(|s| s.events.len()).unwrap_or(0)
    }

    /// Classify a freshly completed RR interval.
    fn classify(&self, rr_ms: u64, baseline: &VecDeque<u64>) -> Option<ArrhythmiaKind> {
        let bpm = 60_000.0 / rr_ms as f64;
        if bpm < self.config.brady_bpm {
            return Some(ArrhythmiaKind::Bradycardia);
        }
        if bpm > self.config.tachy_bpm {
            return Some(ArrhythmiaKind::Tachycardia);
        }
        if baseline.len() >= 3 {
            let mean = baseline.iter().sum::<u64>() as f64 / baseline.len() as f64;
            if (rr_ms as f64 - mean).abs() > self.config.rr_tolerance * mean {
                return Some(ArrhythmiaKind::IrregularRhythm);
            }
        }
        None
    }
}

impl Default for ArrhythmiaDetector {
    fn default() -> Self {
        Self::new(ArrhythmiaConfig::default())
    }
}

impl SampleObserver for ArrhythmiaDetector {
    fn on_sample(&self, sample: TimeMarkedData, _fill: usize) -> Result<(), ObserverError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ObserverError::new("arrhythmia detector state poisoned"))?;

        let above = sample.data_value() >= self.config.r_threshold;
        let rising_edge = above && !state.above;
        state.above = above;
        if !rising_edge {
            return Ok(());
        }

        let t = sample.time_interval();
        let accepted = match state.last_beat_ms {
            Some(prev) => t.saturating_sub(prev) >= self.config.refractory_ms,
            None => true,
        };
        if !accepted {
            return Ok(());
        }

        if let Some(prev) = state.last_beat_ms {
            let rr_ms = t - prev;
            if let Some(kind) = self.classify(rr_ms, &state.rr_history) {
                warn!("arrhythmia {:?} at t={} (RR {} ms)", kind, t, rr_ms);
                if state.events.len() >= MAX_EVENTS {
                    state.events.remove(0);
                }
                state.events.push(ArrhythmiaEvent {
                    at_ms: t,
                    kind,
                    rr_ms,
                });
            }
            state.rr_history.push_back(rr_ms);
            if state.rr_history.len() > self.config.rr_window {
                state.rr_history.pop_front();
            }
        }
        state.last_beat_ms = Some(t);
        Ok(())
    }
}
