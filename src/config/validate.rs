// src/config/validate.rs

use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{FeederError, Result};
use crate::types::TraceFormat;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::FeederError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let path = raw.trace.path.ok_or_else(|| {
            FeederError::ConfigError(
                "no trace file given (set [trace].path or pass --trace)".to_string(),
            )
        })?;
        let format = resolve_format(&path, raw.trace.format)?;
        Ok(ConfigFile::new_unchecked(raw.feeder, path, format))
    }
}

/// Pick the trace format: an explicit setting wins, otherwise the file
/// extension decides.
pub fn resolve_format(path: &Path, explicit: Option<TraceFormat>) -> Result<TraceFormat> {
    if let Some(format) = explicit {
        return Ok(format);
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    TraceFormat::from_extension(ext).ok_or_else(|| {
        FeederError::UnsupportedFormat(format!(
            "cannot infer trace format from '{}' (supported: .json)",
            path.display()
        ))
    })
}
