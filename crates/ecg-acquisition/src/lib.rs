//! ECG Sample Acquisition
//!
//! Provides the producer side of the distribution queue: a capability
//! interface for sample sources, a deterministic synthetic ECG waveform
//! generator, and a rate-driven sampling loop.

mod sampler;
mod source;

pub use sampler::{SamplerConfig, SamplingLoop};
pub use source::{EcgWaveGenerator, SampleSource};
