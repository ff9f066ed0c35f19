// src/logging.rs

//! Logging setup for `tracefeed` using `tracing` + `tracing-subscriber`.
//!
//! The chosen level applies to events from this crate; everything else is
//! capped at `warn`. Sources, highest priority first:
//! 1. `--log-level` CLI flag
//! 2. `TRACEFEED_LOG`, either a bare level ("debug") or full `EnvFilter`
//!    directives ("tracefeed::dag=trace,info")
//! 3. `info`
//!
//! Logs go to STDERR; the issuance order is printed on STDOUT.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable read when no `--log-level` is given.
pub const LOG_ENV: &str = "TRACEFEED_LOG";

const DEFAULT_DIRECTIVES: &str = "warn,tracefeed=info";

/// Initialise global logging subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let directives = filter_directives(cli_level, std::env::var(LOG_ENV).ok().as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("ignoring invalid {LOG_ENV} value {directives:?}: {e}");
        EnvFilter::new(DEFAULT_DIRECTIVES)
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Filter directives for the given CLI level and `TRACEFEED_LOG` value.
///
/// A bare level is scoped to this crate; anything else is passed through
/// as-is for `EnvFilter` to parse.
pub fn filter_directives(cli_level: Option<LogLevel>, env_value: Option<&str>) -> String {
    if let Some(lvl) = cli_level {
        return scoped(level_from_log_level(lvl));
    }

    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match parse_level_str(raw) {
            Some(level) => scoped(level),
            None => raw.to_string(),
        },
        None => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn scoped(level: Level) -> String {
    format!("warn,tracefeed={}", level.as_str().to_ascii_lowercase())
}

fn level_from_log_level(lvl: LogLevel) -> Level {
    match lvl {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

/// Parse a bare level name.
pub fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
