use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Env var that overrides the configured log filter
pub const LOG_ENV: &str = "AGENT_BUILDER_LOG";

const DEFAULT_FILTER: &str = "agent_builder_core=info,agent_builder_tui=info";

/// The terminal belongs to the UI, so logs go to a file under the data dir.
/// Returns the log file path.
pub fn init(configured_filter: Option<&str>) -> Result<PathBuf> {
    let log_dir = dirs::data_dir()
        .ok_or_else(|| anyhow!("Could not determine data directory"))?
        .join("agent-builder")
        .join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("agent-builder.log");
    init_at(&log_path, configured_filter)?;
    Ok(log_path)
}

fn init_at(log_path: &Path, configured_filter: Option<&str>) -> Result<()> {
    let file = OpenOptions::new().append(true).create(true).open(log_path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured_filter.unwrap_or(DEFAULT_FILTER)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false), // No ANSI colors in file
        )
        .try_init()?;

    tracing::info!(path = %log_path.display(), "logging initialized");
    Ok(())
}
