//! Reading pace database files from disk.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{DbConfig, extension_of};
use crate::models::DatabaseFile;

/// Errors raised while reading a database file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read database file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON database: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML database: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported database format {0:?} (expected json or toml)")]
    UnsupportedFormat(String),
}

/// Serialization format of a database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        match extension_of(path).as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => Err(StoreError::UnsupportedFormat(other.to_owned())),
            None => Err(StoreError::UnsupportedFormat(String::new())),
        }
    }
}

/// Parse database content in the given format.
pub fn parse_database(content: &str, format: FileFormat) -> Result<DatabaseFile, StoreError> {
    let file = match format {
        FileFormat::Json => serde_json::from_str(content)?,
        FileFormat::Toml => toml::from_str(content)?,
    };
    Ok(file)
}

/// Read and parse the database file at `path`.
pub fn read_database_file(path: &Path) -> Result<DatabaseFile, StoreError> {
    let format = FileFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "reading pace database");
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = parse_database(&content, format)?;
    info!(
        name = %file.name,
        segments = file.segments.len(),
        pace_rows = file.pace_lines.len(),
        "pace database loaded"
    );
    Ok(file)
}

/// Load the database described by `config`.
pub fn load_database(config: &DbConfig) -> Result<DatabaseFile, StoreError> {
    read_database_file(&config.database_path)
}

/// Entry counts per section, for summaries.
pub fn table_counts(file: &DatabaseFile) -> Vec<(&'static str, usize)> {
    vec![
        ("race_types", file.race_types.len()),
        ("race_times", file.race_times.len()),
        ("segments", file.segments.len()),
        ("pace_lines", file.pace_lines.len()),
        ("plan_instructions", file.plan_instructions.len()),
    ]
}
