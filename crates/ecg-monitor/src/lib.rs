//! ECG Monitor
//!
//! Wires the acquisition loop, the distribution queue, the analysis
//! detectors, and the display views into one monitoring session.

use ecg_acquisition::{EcgWaveGenerator, SamplerConfig, SamplingLoop};
use ecg_analysis::{ArrhythmiaDetector, ArrhythmiaEvent, QrsDetector};
use ecg_display::{HistogramDisplay, WaveformDisplay};
use serde::Serialize;
use std::sync::Arc;
use tmd_queue::{QueueError, SampleObserver, TmdQueue};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;

pub use config::MonitorConfig;

/// Install the global tracing subscriber.
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// End-of-session report
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub samples_appended: u64,
    pub queue_fill: usize,
    pub queue_capacity: usize,
    pub beat_count: u64,
    pub mean_heart_rate_bpm: Option<f64>,
    pub arrhythmia_events: Vec<ArrhythmiaEvent>,
    pub histogram_bins: Vec<(i32, u64)>,
    pub waveform_trace: String,
}

/// Run one acquisition session and summarize what the consumers saw.
///
/// The four consumer roles subscribe before acquisition starts, so every
/// appended sample fans out to all of them.
pub async fn run_monitor(config: MonitorConfig) -> Result<SessionSummary, QueueError> {
    let queue = TmdQueue::new(config.queue_capacity)?;

    let arrhythmia = Arc::new(ArrhythmiaDetector::new(config.arrhythmia.clone()));
    let qrs = Arc::new(QrsDetector::new(config.qrs.clone()));
    let histogram = Arc::new(HistogramDisplay::new(config.histogram_bin_width));
    let waveform = Arc::new(WaveformDisplay::new(config.waveform_window));

    queue.subscribe(
        "arrhythmia-detector",
        arrhythmia.clone() as Arc<dyn SampleObserver>,
    )?;
    queue.subscribe("qrs-detector", qrs.clone() as Arc<dyn SampleObserver>)?;
    queue.subscribe(
        "histogram-display",
        histogram.clone() as Arc<dyn SampleObserver>,
    )?;
    queue.subscribe(
        "waveform-display",
        waveform.clone() as Arc<dyn SampleObserver>,
    )?;
    info!("{} consumers subscribed", queue.observer_count()?);

    let mut source = EcgWaveGenerator::new(config.sample_rate_hz as u32);
    let mut sampler = SamplingLoop::new(SamplerConfig {
        sample_rate_hz: config.sample_rate_hz,
        max_samples: Some(config.run_samples),
    });
    sampler.run(&mut source, &queue).await?;

    // Re-pull the display window from the queue rather than trusting the
    // push payloads alone.
    waveform.refresh_from(&queue)?;

    info!(
        "session complete: {} beats, {} arrhythmia events",
        qrs.beat_count(),
        arrhythmia.event_count()
    );

    Ok(SessionSummary {
        samples_appended: sampler.produced(),
        queue_fill: queue.len()?,
        queue_capacity: queue.capacity(),
        beat_count: qrs.beat_count(),
        mean_heart_rate_bpm: qrs.mean_heart_rate_bpm(),
        arrhythmia_events: arrhythmia.events(),
        histogram_bins: histogram.bins(),
        waveform_trace: waveform.render(),
    })
}
