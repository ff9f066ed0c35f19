// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod feeder;
pub mod logging;
pub mod source;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::config::{default_config_path, load_from_path};
use crate::feeder::{FeederOptions, IssuanceProtocol, TraceFeeder};
use crate::source::JsonTraceSource;
use crate::types::TraceFormat;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - backend selection by trace format
/// - either a dry-run summary or a full replay
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;
    info!(
        trace = %cfg.trace_path.display(),
        format = ?cfg.trace_format,
        ordering = ?cfg.feeder.ordering,
        window_size = cfg.feeder.window_size,
        "opening trace"
    );

    if args.dry_run {
        match cfg.trace_format {
            TraceFormat::Json => {
                let source = JsonTraceSource::open(&cfg.trace_path)?;
                let feeder = TraceFeeder::open(source, cfg.feeder_options())?;
                print_dry_run(&cfg, &feeder);
            }
        }
        return Ok(());
    }

    let mut feeder = open_feeder(&cfg)?;
    let summary = engine::replay_with(feeder.as_mut(), |node| {
        println!(
            "{}\t{}\t{:?}\t{}",
            node.id(),
            node.name(),
            node.kind(),
            node.runtime
        );
    })?;

    info!(
        issued = summary.issued.len(),
        extra_windows = summary.extra_windows,
        "trace replayed"
    );
    Ok(())
}

/// Open the backend matching `cfg.trace_format` and load its first window.
///
/// The format is dispatched here once; callers only see the protocol.
pub fn open_feeder(cfg: &ConfigFile) -> errors::Result<Box<dyn IssuanceProtocol>> {
    let options: FeederOptions = cfg.feeder_options();
    match cfg.trace_format {
        TraceFormat::Json => {
            let source = JsonTraceSource::open(&cfg.trace_path)?;
            Ok(Box::new(TraceFeeder::open(source, options)?))
        }
    }
}

/// Merge the config file (if any) with CLI overrides and validate.
///
/// - `--config PATH` must exist.
/// - Without `--config`, `Tracefeed.toml` is used if present.
pub fn resolve_config(args: &CliArgs) -> errors::Result<ConfigFile> {
    let mut raw = match &args.config {
        Some(path) => load_from_path(path)?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                debug!(path = %default_path.display(), "using default config file");
                load_from_path(&default_path)?
            } else {
                RawConfigFile::default()
            }
        }
    };

    if let Some(trace) = &args.trace {
        raw.trace.path = Some(PathBuf::from(trace));
        // A trace given on the command line picks its own format.
        raw.trace.format = None;
    }
    if let Some(ordering) = args.ordering {
        raw.feeder.ordering = ordering.into();
    }
    if let Some(window_size) = args.window_size {
        raw.feeder.window_size = window_size;
    }

    ConfigFile::try_from(raw)
}

/// Simple dry-run output: first window, ready set and forward references.
fn print_dry_run<S: source::RecordSource>(cfg: &ConfigFile, feeder: &TraceFeeder<S>) {
    println!("tracefeed dry-run");
    println!("  trace = {}", cfg.trace_path.display());
    println!("  feeder.ordering = {:?}", cfg.feeder.ordering);
    println!("  feeder.window_size = {}", cfg.feeder.window_size);
    println!();

    println!("loaded nodes: {}", feeder.loaded_len());
    println!("source exhausted: {}", feeder.is_source_exhausted());
    println!(
        "outstanding forward references: {}",
        feeder.outstanding_forward_refs()
    );
    let ready = feeder.ready_ids();
    println!("ready ({}):", ready.len());
    for id in ready {
        if let Ok(node) = feeder.lookup_node(id) {
            println!("  - {} {} ({:?})", node.id(), node.name(), node.kind());
        }
    }

    debug!("dry-run complete (nothing issued)");
}
