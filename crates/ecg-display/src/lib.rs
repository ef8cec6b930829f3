//! ECG Display Consumers
//!
//! Queue observers that maintain render-ready views of the sample stream:
//! an amplitude histogram and a sliding waveform window.

mod histogram;
mod waveform;

pub use histogram::HistogramDisplay;
pub use waveform::WaveformDisplay;
