//! Tracing setup for the CLI: append to a log file under the XDG state dir,
//! or write to stderr when that file cannot be opened.
//!
//! The filter comes from `HTTPOOPS_LOG`, then `RUST_LOG`, then
//! [`DEFAULT_FILTER`].

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "HTTPOOPS_LOG";

pub const DEFAULT_FILTER: &str = "info,httpoops=debug,httpoops_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/httpoops/httpoops.log`; the directory is created if needed.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("httpoops")?;
    xdg_dirs
        .place_state_file("httpoops.log")
        .context("failed to create log directory")
}

/// Install the global subscriber writing to [`log_path`] and return that path.
///
/// Errors if the file cannot be opened or a subscriber is already set, so the
/// caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    // &File is Write, so a shared handle serves every event without cloning the fd.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("httpoops logging initialized at {}", path.display());
    Ok(path)
}

/// Install a stderr subscriber. A no-op if one is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
