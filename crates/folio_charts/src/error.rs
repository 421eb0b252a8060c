//! Chart configuration errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading a chart document or its data files.
///
/// Rendering itself never fails; these only occur at the configuration edge.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a document or data file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid TOML or has the wrong shape
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Data file is not valid JSON
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("chart `{chart}`: invalid color `{value}`")]
    InvalidColor { chart: String, value: String },

    #[error("chart id `{0}` is used more than once")]
    DuplicateId(String),

    #[error("chart id must not be empty")]
    EmptyId,

    /// Ids name output files and SVG element ids
    #[error("chart id `{0}` may only contain ASCII letters, digits, `_` and `-`")]
    InvalidId(String),

    #[error("no chart with id `{0}`")]
    UnknownChart(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
