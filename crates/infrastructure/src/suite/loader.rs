//! File-backed suite loader.

use std::path::{Path, PathBuf};

use probe_domain::SuiteDefinition;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json};

/// Markup a suite file is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl SuiteFormat {
    /// Detects the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Errors raised while loading a suite file.
#[derive(Debug, thiserror::Error)]
pub enum SuiteLoadError {
    /// The file could not be read.
    #[error("failed to read suite file {}: {source}", .path.display())]
    Io {
        /// Suite file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The extension is not one of the supported formats.
    #[error("unsupported suite file {} (expected .yaml, .yml or .json)", .path.display())]
    UnsupportedFormat {
        /// Suite file path.
        path: PathBuf,
    },

    /// The YAML document does not describe a suite.
    #[error("invalid YAML suite {}: {source}", .path.display())]
    Yaml {
        /// Suite file path.
        path: PathBuf,
        /// Parser error.
        source: serde_yaml::Error,
    },

    /// The JSON document does not describe a suite.
    #[error("invalid JSON suite {}: {source}", .path.display())]
    Json {
        /// Suite file path.
        path: PathBuf,
        /// Parser error.
        source: SerializationError,
    },
}

/// Reads and parses the suite file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension, or
/// does not deserialize into a `SuiteDefinition`.
pub async fn load_suite(path: &Path) -> Result<SuiteDefinition, SuiteLoadError> {
    let format = SuiteFormat::from_path(path).ok_or_else(|| SuiteLoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|source| SuiteLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let suite = parse_suite(&content, format, path)?;
    debug!(
        path = %path.display(),
        suite = %suite.name,
        cases = suite.cases.len(),
        "suite loaded"
    );
    Ok(suite)
}

/// Parses suite `content` written in `format`; `path` is only used in errors.
///
/// # Errors
///
/// Returns an error if the content does not deserialize into a
/// `SuiteDefinition`.
pub fn parse_suite(
    content: &str,
    format: SuiteFormat,
    path: &Path,
) -> Result<SuiteDefinition, SuiteLoadError> {
    match format {
        SuiteFormat::Yaml => serde_yaml::from_str(content).map_err(|source| SuiteLoadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        SuiteFormat::Json => from_json(content).map_err(|source| SuiteLoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}
