//! ECG Analysis Consumers
//!
//! Queue observers that analyze the sample stream as it arrives: QRS
//! complex detection with heart-rate derivation, and arrhythmia
//! classification over RR intervals.

mod arrhythmia;
mod config;
mod qrs;

pub use arrhythmia::{ArrhythmiaDetector, ArrhythmiaEvent, ArrhythmiaKind};
pub use config::{ArrhythmiaConfig, QrsConfig};
pub use qrs::QrsDetector;
