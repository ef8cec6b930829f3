//! Monitor Configuration

use config::{Config, ConfigError, Environment, File};
use ecg_analysis::{ArrhythmiaConfig, QrsConfig};
use serde::{Deserialize, Serialize};
use tmd_queue::DEFAULT_CAPACITY;

/// Top-level monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Distribution queue capacity (slots)
    pub queue_capacity: usize,
    /// Acquisition rate (Hz)
    pub sample_rate_hz: f64,
    /// Samples to acquire before the session ends
    pub run_samples: u64,
    /// Histogram bin width (ADC counts)
    pub histogram_bin_width: i32,
    /// Waveform display window (samples)
    pub waveform_window: usize,
    /// QRS detector settings
    pub qrs: QrsConfig,
    /// Arrhythmia detector settings
    pub arrhythmia: ArrhythmiaConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_CAPACITY,
            sample_rate_hz: 250.0,
            run_samples: 2_500,
            histogram_bin_width: 100,
            waveform_window: 80,
            qrs: QrsConfig::default(),
            arrhythmia: ArrhythmiaConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Layered load: defaults, then an optional `ecg-monitor.toml` in the
    /// working directory, then `ECG_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("ecg-monitor").required(false))
            .add_source(Environment::with_prefix("ECG").separator("__"))
            .build()?
            .try_deserialize()
    }
}
