//! Analysis Configuration

use serde::{Deserialize, Serialize};

/// QRS detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrsConfig {
    /// Amplitude threshold for an R-wave candidate (ADC counts)
    pub r_threshold: i32,
    /// Refractory period after a detected beat (ms)
    pub refractory_ms: u64,
}

impl Default for QrsConfig {
    fn default() -> Self {
        Self {
            r_threshold: 600,
            refractory_ms: 200,
        }
    }
}

/// Arrhythmia classification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrhythmiaConfig {
    /// Amplitude threshold for beat detection (ADC counts)
    pub r_threshold: i32,
    /// Refractory period after a detected beat (ms)
    pub refractory_ms: u64,
    /// Allowed RR deviation from the running mean, as a fraction
    pub rr_tolerance: f64,
    /// Beats averaged for the RR baseline
    pub rr_window: usize,
    /// Bradycardia threshold (bpm)
    pub brady_bpm: f64,
    /// Tachycardia threshold (bpm)
    pub tachy_bpm: f64,
}

impl Default for ArrhythmiaConfig {
    fn default() -> Self {
        Self {
            r_threshold: 600,
            refractory_ms: 200,
            rr_tolerance: 0.25,
            rr_window: 8,
            brady_bpm: 40.0,
            tachy_bpm: 150.0,
        }
    }
}
