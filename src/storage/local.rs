//! Filesystem-backed storage.

use super::{
    check_relative, check_table_name, is_hidden_name, StorageError, TableFile, WarehouseStorage,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Reads input below `input_root` and writes tables below `output_root`.
///
/// Each table is staged in a hidden sibling directory of its final location
/// and renamed into place once every file is on disk, so a reader never sees
/// a half-written table.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl LocalStorage {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        LocalStorage {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Final directory of `table`.
    pub fn table_dir(&self, table: &str) -> PathBuf {
        self.output_root.join(table)
    }
}

fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry
            .file_name()
            .to_str()
            .map(is_hidden_name)
            .unwrap_or(false)
}

impl WarehouseStorage for LocalStorage {
    fn list_input_files(&self, dir: &str) -> Result<Vec<PathBuf>, StorageError> {
        let root = self.input_root.join(dir);
        if !root.is_dir() {
            return Err(StorageError::NotFound(root));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_visible)
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort();

        debug!("Found {} input files under {:?}", files.len(), root);
        Ok(files)
    }

    fn read_input(&self, path: &Path) -> Result<String, StorageError> {
        let bytes = fs::read(path).map_err(|e| StorageError::io(path, e))?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!("Input {:?} is not valid UTF-8, decoding lossily", path);
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        }
    }

    fn replace_table(&self, table: &str, files: Vec<TableFile>) -> Result<(), StorageError> {
        check_table_name(table)?;
        fs::create_dir_all(&self.output_root).map_err(|e| StorageError::io(&self.output_root, e))?;

        let staging = tempfile::Builder::new()
            .prefix(&format!(".{table}-staging-"))
            .tempdir_in(&self.output_root)
            .map_err(|e| StorageError::io(&self.output_root, e))?;

        for file in &files {
            check_relative(&file.path)?;
            let path = staging.path().join(&file.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
            fs::write(&path, &file.bytes).map_err(|e| StorageError::io(&path, e))?;
        }

        let target = self.table_dir(table);
        if target.exists() {
            fs::remove_dir_all(&target).map_err(|e| StorageError::io(&target, e))?;
        }
        // The staging guard's own cleanup finds nothing left after the rename.
        fs::rename(staging.path(), &target).map_err(|e| StorageError::io(&target, e))?;

        debug!("Replaced table {} with {} files", table, files.len());
        Ok(())
    }
}
