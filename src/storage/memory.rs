//! In-process storage, used by tests and by callers that want the tables as
//! bytes instead of files.

use super::{
    check_relative, check_table_name, is_hidden_name, StorageError, TableFile, WarehouseStorage,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    inputs: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
    tables: Mutex<BTreeMap<String, Vec<TableFile>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input file at `path`, e.g. `log_data/2018-11-01-events.json`.
    pub fn add_input(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        lock(&self.inputs).insert(path.into(), content.into());
    }

    /// Register an empty input directory. Directories holding an input file
    /// exist without being registered.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        lock(&self.dirs).insert(path.into());
    }

    /// Files last stored for `table`, in write order.
    pub fn table_files(&self, table: &str) -> Option<Vec<TableFile>> {
        lock(&self.tables).get(table).cloned()
    }

    /// Names of every table stored so far, sorted.
    pub fn table_names(&self) -> Vec<String> {
        lock(&self.tables).keys().cloned().collect()
    }
}

impl WarehouseStorage for MemoryStorage {
    fn list_input_files(&self, dir: &str) -> Result<Vec<PathBuf>, StorageError> {
        let root = Path::new(dir);
        let inputs = lock(&self.inputs);
        let exists = lock(&self.dirs).iter().any(|known| known.starts_with(root))
            || inputs.keys().any(|path| path != root && path.starts_with(root));
        if !exists {
            return Err(StorageError::NotFound(root.to_path_buf()));
        }

        let files = inputs
            .keys()
            .filter(|path| {
                path.strip_prefix(root).is_ok_and(|rest| {
                    rest.components().all(|component| match component {
                        Component::Normal(name) => {
                            !name.to_str().map(is_hidden_name).unwrap_or(false)
                        }
                        _ => false,
                    })
                })
            })
            .cloned()
            .collect();
        Ok(files)
    }

    fn read_input(&self, path: &Path) -> Result<String, StorageError> {
        lock(&self.inputs)
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_path_buf()))
    }

    fn replace_table(&self, table: &str, files: Vec<TableFile>) -> Result<(), StorageError> {
        check_table_name(table)?;
        for file in &files {
            check_relative(&file.path)?;
        }
        lock(&self.tables).insert(table.to_owned(), files);
        Ok(())
    }
}
