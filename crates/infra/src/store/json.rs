use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Storage failure.
///
/// These are infrastructure errors, kept apart from domain rejections.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but does not hold the expected JSON.
    #[error("malformed JSON in {}: {source}", .path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode collection for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid store path: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads and writes JSON documents on disk.
pub struct JsonStore;

impl JsonStore {
    /// Serialise `value` as pretty JSON at `path`.
    ///
    /// Parent directories are created as needed. The document is written to a
    /// temporary file next to `path`, synced, then renamed over the target, so a
    /// failure at any point leaves the previous file intact.
    pub fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
        if path.file_name().is_none() {
            return Err(StoreError::InvalidPath(path.to_path_buf()));
        }
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(&bytes).map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;

        tracing::trace!(path = %path.display(), bytes = bytes.len(), "json document written");
        Ok(())
    }

    /// Deserialise the document at `path`.
    ///
    /// A missing file, or one holding only whitespace, yields `default`.
    pub fn read<T: DeserializeOwned>(path: &Path, default: T) -> Result<T, StoreError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(default),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(default);
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Syntax {
            path: path.to_path_buf(),
            source,
        })
    }
}
