//! Tracing subscriber setup.
//!
//! Filter priority: `CATALOG_EXPLORER_LOG`, then `RUST_LOG`, then `warn`
//! (`debug` with `--verbose`). The TUI owns the terminal, so interactive
//! sessions only log when a log file is given.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "CATALOG_EXPLORER_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

pub fn init(target: LogTarget<'_>, verbose: bool) -> Result<()> {
    let filter = build_env_filter(verbose);
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => {
            let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(use_ansi)
                        .without_time()
                        .compact(),
                )
                .try_init()
                .context("install tracing subscriber")
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()
                .context("install tracing subscriber")
        }
    }
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    for var in [LOG_ENV, "RUST_LOG"] {
        if let Ok(directives) = std::env::var(var)
            && let Ok(filter) = EnvFilter::try_new(&directives)
        {
            return filter;
        }
    }
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::default().add_directive(level.into())
}
