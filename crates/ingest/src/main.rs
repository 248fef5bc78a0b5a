use std::path::PathBuf;

use anyhow::bail;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sensorchain_ingest::config::{IngestConfig, LogFormat};
use sensorchain_ingest::pipeline;
use sensorchain_ingest::response::DataResponse;

const DEFAULT_LOG_FILTER: &str = "sensorchain_ingest=info,sensorchain_ledger=info";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = IngestConfig::from_env()?;

    // --- Tracing (stderr, stdout carries the JSON result) ---
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
    tracing::info!(
        owner = %config.owner,
        software_version = config.software_version,
        "Loaded ingest configuration",
    );

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("usage: sensorchain-ingest <file.tuv>...");
    }

    // --- Derive and preview ---
    let ingested_at = chrono::Utc::now();
    let assets = paths
        .iter()
        .map(|path| pipeline::load_file(path, &config, ingested_at))
        .collect::<Result<Vec<_>, _>>()?;
    let records = pipeline::preview(&assets)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&DataResponse { data: records })?
    );
    Ok(())
}
