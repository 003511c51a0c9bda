use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
    sync::Arc,
};

use anyhow::{Context as _, anyhow};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt as _};

const DEFAULT_FILTER: &str = "info";

/// `RUST_LOG` wins over the configured directives, which win over `info`.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives.unwrap_or(DEFAULT_FILTER)))
}

fn file_subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .finish()
}

/// Sends log output to `path` (appending), keeping the terminal free for the TUI.
pub fn init_file(path: &Path, directives: Option<&str>) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    file_subscriber(file, env_filter(directives))
        .try_init()
        .map_err(|error| anyhow!(error))
}

pub fn init_stderr(directives: Option<&str>) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives))
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!(error))
}
