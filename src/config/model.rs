// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::feeder::FeederOptions;
use crate::types::{OrderingPolicy, TraceFormat};

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [feeder]
/// ordering = "id"
/// window_size = 0
///
/// [trace]
/// path = "trace.json"
/// format = "json"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Engine behaviour from `[feeder]`.
    #[serde(default)]
    pub feeder: FeederSection,

    /// Trace file selection from `[trace]`.
    #[serde(default)]
    pub trace: TraceSection,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>`, so the trace format is
/// always resolved.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub feeder: FeederSection,
    pub trace_path: PathBuf,
    pub trace_format: TraceFormat,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        feeder: FeederSection,
        trace_path: PathBuf,
        trace_format: TraceFormat,
    ) -> Self {
        Self {
            feeder,
            trace_path,
            trace_format,
        }
    }

    /// Options for constructing a feeder from this config.
    pub fn feeder_options(&self) -> FeederOptions {
        FeederOptions {
            ordering: self.feeder.ordering,
            window_size: self.feeder.window_size,
        }
    }
}

/// `[feeder]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeederSection {
    /// `"id"` (default), `"arrival"` or `"priority"`.
    #[serde(default)]
    pub ordering: OrderingPolicy,

    /// Records per load window. `0` (default) loads the whole trace at once.
    #[serde(default)]
    pub window_size: usize,
}

/// `[trace]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceSection {
    /// Path of the trace file, relative to the working directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Explicit format; if `None`, inferred from the file extension.
    #[serde(default)]
    pub format: Option<TraceFormat>,
}
