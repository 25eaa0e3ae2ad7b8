//! Raw input access and table output.
//!
//! The pipeline only talks to storage through [`WarehouseStorage`], so the
//! same batch can run against the local filesystem or an in-process store.

mod local;
mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk input tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid storage path: {0}")]
    InvalidPath(PathBuf),

    #[error("Not found: {0}")]
    NotFound(PathBuf),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// One file of a materialized table, relative to the table directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl TableFile {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        TableFile {
            path: path.into(),
            bytes,
        }
    }
}

/// Storage backend for one batch.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait WarehouseStorage: Send + Sync {
    // =========================================================================
    // Input
    // =========================================================================

    /// List the input files below `dir`, recursively, in lexicographic order.
    ///
    /// Files and directories whose name starts with `.` or `_` are skipped.
    /// A `dir` that does not exist is [`StorageError::NotFound`]; an existing
    /// directory with nothing visible in it yields an empty list.
    fn list_input_files(&self, dir: &str) -> Result<Vec<PathBuf>, StorageError>;

    /// Read an input file previously returned by [`Self::list_input_files`].
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than failing the read, so
    /// a corrupt line only costs that line.
    fn read_input(&self, path: &Path) -> Result<String, StorageError>;

    // =========================================================================
    // Output
    // =========================================================================

    /// Replace everything stored for `table` with `files`, written in order.
    ///
    /// Prior content of the table is gone afterwards, including partitions the
    /// new files do not mention.
    fn replace_table(&self, table: &str, files: Vec<TableFile>) -> Result<(), StorageError>;
}

/// Names the engine treats as metadata rather than data.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Only plain relative paths may be written below a table directory.
pub(crate) fn check_relative(path: &Path) -> Result<(), StorageError> {
    let plain = path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if plain {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(path.to_path_buf()))
    }
}

/// A table name must be a single path segment.
pub(crate) fn check_table_name(table: &str) -> Result<(), StorageError> {
    let path = Path::new(table);
    check_relative(path)?;
    if path.components().count() == 1 && !is_hidden_name(table) {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(path.to_path_buf()))
    }
}
