use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "deskpad.log";

/// `--log-level` wins over `RUST_LOG`, which wins over `default`.
fn filter(level: Option<&str>, default: &str) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
    }
}

/// Subcommands log to stderr, quiet by default.
pub fn init_stderr(level: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level, "warn"))
        .with_writer(std::io::stderr)
        .init();
}

/// The dashboard owns the terminal, so it logs to a file next to the stores.
pub fn init_file(level: Option<&str>, dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    }
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(level, "info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
