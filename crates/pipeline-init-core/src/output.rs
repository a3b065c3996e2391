//! Output format selection and file emission

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// On-disk serialization format for emitted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// File extension appended to emitted files.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yml",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => f.write_str("yaml"),
            Format::Json => f.write_str("json"),
        }
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => anyhow::bail!(
                "not an allowed output format ({}), options: [yaml, json]",
                other
            ),
        }
    }
}

/// Serialize `value` in `format` and write it to `base` with the
/// format's extension appended. Returns the path actually written.
/// Parent directories are the caller's concern.
pub fn write_to_file<T: Serialize>(value: &T, format: Format, base: &Path) -> Result<PathBuf> {
    let text = match format {
        Format::Yaml => serde_yaml::to_string(value)
            .with_context(|| format!("failed to serialize {} output", format))?,
        Format::Json => serde_json::to_string_pretty(value)
            .with_context(|| format!("failed to serialize {} output", format))?,
    };

    // Append rather than replace: config names may themselves contain dots.
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(format.extension());
    let path = PathBuf::from(path);
    std::fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
