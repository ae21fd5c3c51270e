//! JSON artifact writer — one `<CODE>.json` file per currency.

use crate::domain::PriceRecord;
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize records for {code}: {source}")]
    Serialize {
        code: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes price series into a fixed output directory.
///
/// The directory is created when the writer is constructed, so it exists
/// before the first currency is processed.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    dir: PathBuf,
}

impl JsonWriter {
    /// Create the writer, creating `dir` (and parents) if absent.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, WriteError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| WriteError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the series for `code` is written to.
    pub fn path_for(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}.json"))
    }

    /// Serialize `records` as a pretty-printed JSON array, overwriting any
    /// existing file. Returns the path written.
    pub fn write(&self, code: &str, records: &[PriceRecord]) -> Result<PathBuf, WriteError> {
        let json =
            serde_json::to_string_pretty(records).map_err(|source| WriteError::Serialize {
                code: code.to_string(),
                source,
            })?;

        let path = self.path_for(code);
        std::fs::write(&path, json).map_err(|source| WriteError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Saved {} records to {}", records.len(), path.display());
        Ok(path)
    }
}
