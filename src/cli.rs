// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::OrderingPolicy;

/// Command-line arguments for `tracefeed`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tracefeed",
    version,
    about = "Load a workload execution trace and replay it in dependency order.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `Tracefeed.toml` in the current directory is used when it
    /// exists; otherwise built-in defaults apply.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Trace file to load. Overrides `[trace].path`.
    #[arg(long, value_name = "PATH")]
    pub trace: Option<String>,

    /// Ready-queue ordering. Overrides `[feeder].ordering`.
    #[arg(long, value_enum, value_name = "ORDER")]
    pub ordering: Option<Ordering>,

    /// Records per load window, 0 for the whole trace. Overrides
    /// `[feeder].window_size`.
    #[arg(long, value_name = "N")]
    pub window_size: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TRACEFEED_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load the first window and print the ready set, but issue nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Ready-queue ordering as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum Ordering {
    Id,
    Arrival,
    Priority,
}

impl From<Ordering> for OrderingPolicy {
    fn from(o: Ordering) -> Self {
        match o {
            Ordering::Id => OrderingPolicy::Id,
            Ordering::Arrival => OrderingPolicy::Arrival,
            Ordering::Priority => OrderingPolicy::Priority,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
