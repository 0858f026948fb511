use anyhow::Context;
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::{filter::ParseError, EnvFilter};

/// Filter directive used when the configured one does not parse
const FALLBACK_LEVEL: &str = "info";

/// Send log messages at or above `level` to the file at `path`, creating its
/// parent directory if necessary.  The terminal belongs to the game screen,
/// so nothing is ever logged to stderr.
///
/// A malformed `level` is replaced by [`FALLBACK_LEVEL`], and the parse error
/// is logged once the subscriber is installed.
pub(crate) fn init(path: &Path, level: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (filter, filter_err) = match parse_filter(level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(FALLBACK_LEVEL), Some(e)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")?;
    if let Some(e) = filter_err {
        warn!(
            level,
            fallback = FALLBACK_LEVEL,
            error = %e,
            "invalid logging level in configuration"
        );
    }
    Ok(())
}

fn parse_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}
