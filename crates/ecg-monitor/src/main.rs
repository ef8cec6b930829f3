//! ECG Monitor - Main Entry Point

use anyhow::Context;
use ecg_monitor::{init_logging, run_monitor, MonitorConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== CardioStream ECG Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = MonitorConfig::load().context("loading monitor configuration")?;
    info!(
        "queue capacity {}, {} Hz, {} samples",
        config.queue_capacity, config.sample_rate_hz, config.run_samples
    );

    let summary = run_monitor(config).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
