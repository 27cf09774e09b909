//! Dataset loading and atomic artifact writes.

use crate::domain::{Dataset, DatasetError};
use crate::infra::sanitize::safe_file_name;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors during file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },

    #[error("expected a .json file: {path}")]
    NotJson { path: PathBuf },

    #[error("failed to load dataset from {path}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Reads and validates a dataset export.
///
/// # Errors
///
/// Returns `FsError::NotJson` if the file lacks a `.json` extension.
/// Returns `FsError::NotFound` if the file doesn't exist.
/// Returns `FsError::InvalidEncoding` if the file is not UTF-8.
/// Returns `FsError::Dataset` if the JSON is invalid or misses required fields.
pub fn read_dataset(path: &Path) -> Result<Dataset, FsError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(FsError::NotJson { path: path.into() });
    }

    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;
    parse_dataset_from_bytes(bytes, path)
}

/// Parses a dataset from already-read bytes.
pub fn parse_dataset_from_bytes(bytes: Vec<u8>, path: &Path) -> Result<Dataset, FsError> {
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 byte order mark detected; convert to UTF-8".into(),
        });
    }

    let content = String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
        path: path.into(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })?;

    // Strip UTF-8 BOM if present
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);

    Dataset::from_json(content).map_err(|e| FsError::Dataset {
        path: path.into(),
        source: e,
    })
}

/// Creates an output directory (and parents) if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), FsError> {
    if dir.exists() && !dir.is_dir() {
        return Err(FsError::NotADirectory { path: dir.into() });
    }
    std::fs::create_dir_all(dir).map_err(|e| FsError::from_io(dir, e))
}

/// Writes one artifact into `dir` atomically and returns its path.
///
/// The file name's stem is sanitized so names taken verbatim from the
/// dataset cannot escape `dir`. An existing file is replaced.
pub fn write_artifact(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf, FsError> {
    ensure_dir(dir)?;
    let path = dir.join(safe_file_name(file_name));

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| FsError::Io {
        path: path.clone(),
        source: e,
    })?;

    temp.write_all(content.as_bytes()).map_err(|e| FsError::Io {
        path: path.clone(),
        source: e,
    })?;

    temp.persist(&path).map_err(|e| FsError::AtomicWrite {
        path: path.clone(),
        source: e.error,
    })?;

    Ok(path)
}
