//! Pose analysis worker binary.
//!
//! Usage: `posex-worker [RECORDING.jsonl]` (or set `POSEX_INPUT`).

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use posex_worker::{SessionProcessor, WorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("posex=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting posex-worker");

    let mut config = WorkerConfig::from_env();
    if let Some(input) = std::env::args().nth(1) {
        config = config.with_input(input);
    }
    info!("Worker config: {:?}", config);

    let processor = SessionProcessor::new(config).context("Invalid worker configuration")?;
    let outcome = processor
        .run_configured()
        .await
        .context("Analysis session failed")?;

    info!(
        session_id = %outcome.session_id,
        output = %outcome.session_dir.display(),
        frames = outcome.report.frames_seen,
        detection_rate = outcome.report.detection_rate(),
        timelines = outcome.timelines.len(),
        "Session finished"
    );
    Ok(())
}
