//! Rate-Driven Sampling Loop

use crate::source::SampleSource;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tmd_queue::{QueueError, TmdQueue};
use tracing::{debug, info};

/// Configuration for the sampling loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Sampling rate in Hz (default: 250.0)
    pub sample_rate_hz: f64,
    /// Stop after this many samples; `None` runs until stopped
    pub max_samples: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 250.0,
            max_samples: None,
        }
    }
}

/// Drives a [`SampleSource`] into a queue at a fixed rate.
///
/// The loop never applies backpressure to the source: the queue's
/// overwrite-on-full policy absorbs any consumer lag, so a tick always
/// completes in bounded time and the sampling clock is never missed.
pub struct SamplingLoop {
    config: SamplerConfig,
    running: bool,
    produced: u64,
}

impl SamplingLoop {
    /// Create a sampling loop with the given configuration.
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            running: false,
            produced: 0,
        }
    }

    /// Run until stopped or `max_samples` is reached.
    pub async fn run(
        &mut self,
        source: &mut dyn SampleSource,
        queue: &TmdQueue,
    ) -> Result<(), QueueError> {
        info!("starting acquisition at {} Hz", self.config.sample_rate_hz);
        self.running = true;
        self.produced = 0;

        let period = Duration::from_secs_f64(1.0 / self.config.sample_rate_hz.max(1e-3));
        let mut ticker = tokio::time::interval(period);

        while self.running {
            ticker.tick().await;
            let sample = source.next_sample();
            queue.append(sample)?;
            self.produced += 1;

            if self.produced % 10_000 == 0 {
                debug!("acquired {} samples", self.produced);
            }
            if let Some(max) = self.config.max_samples {
                if self.produced >= max {
                    break;
                }
            }
        }

        self.running = false;
        info!("acquisition stopped after {} samples", self.produced);
        Ok(())
    }

    /// Request the loop to stop after the current tick.
    pub fn stop(&mut self) {
        info!("stopping acquisition");
        self.running = false;
    }

    /// Whether the loop is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Samples produced by the most recent run.
    pub fn produced(&self) -> u64 {
        self.produced
    }
}
