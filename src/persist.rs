//! Reading and writing the sitemap artifact.
//!
//! The artifact is pretty-printed JSON (two-space indentation) written with a
//! single write call, replacing whatever was there. There is no locking:
//! concurrent runs against the same path end with the last writer's file.

use crate::types::Sitemap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Serialize `sitemap` and write it to `path`, overwriting any existing file.
///
/// Returns the number of bytes written.
pub fn write_sitemap(sitemap: &Sitemap, path: &Path) -> Result<usize, PersistError> {
    let json = serde_json::to_string_pretty(sitemap).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, &json).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = json.len(), "wrote sitemap");
    Ok(json.len())
}

/// Read an artifact as an untyped JSON document, for validation.
pub fn read_sitemap_value(path: &Path) -> Result<Value, PersistError> {
    let content = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert a validated document into the typed sitemap.
pub fn sitemap_from_value(value: Value, path: &Path) -> Result<Sitemap, PersistError> {
    serde_json::from_value(value).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })
}
