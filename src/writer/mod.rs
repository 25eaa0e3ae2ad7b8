//! Partitioned Parquet output.
//!
//! A table is laid out Hive style: rows are grouped by the values of the
//! table's partition columns into `<column>=<value>/` directories, each holding
//! a single Snappy-compressed Parquet file. Partition columns are encoded in
//! the directory names only. An empty `_SUCCESS` marker is the last file of
//! every table.

mod partition;
mod tables;

pub use partition::{escape_partition_value, partition_dir, DEFAULT_PARTITION};
pub use tables::TableRow;

use crate::storage::{StorageError, TableFile, WarehouseStorage};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::errors::ParquetError;
use parquet::file::properties::WriterProperties;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Data file name inside each partition directory.
pub const PART_FILE: &str = "part-00000.snappy.parquet";

/// Marker written after all data files of a table.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to build record batch: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Failed to encode parquet: {0}")]
    Parquet(#[from] ParquetError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What was written for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableWriteStats {
    pub table: &'static str,
    pub rows: usize,
    pub partitions: usize,
    pub bytes: usize,
}

/// Encode `rows` and replace the stored content of `R::TABLE` with them.
///
/// Partitions are encoded in parallel and handed to storage in sorted
/// directory order. Rows keep their relative order inside a partition.
pub fn write_table<R: TableRow>(
    storage: &dyn WarehouseStorage,
    rows: &[R],
) -> Result<TableWriteStats, WriteError> {
    let mut partitions: BTreeMap<PathBuf, Vec<&R>> = BTreeMap::new();
    for row in rows {
        let dir = partition_dir(R::PARTITION_BY, &row.partition_values());
        partitions.entry(dir).or_default().push(row);
    }

    let mut files: Vec<TableFile> = partitions
        .par_iter()
        .map(|(dir, rows)| -> Result<TableFile, WriteError> {
            let batch = R::record_batch(rows)?;
            let bytes = encode_parquet(&batch)?;
            Ok(TableFile::new(dir.join(PART_FILE), bytes))
        })
        .collect::<Result<_, _>>()?;

    let stats = TableWriteStats {
        table: R::TABLE,
        rows: rows.len(),
        partitions: files.len(),
        bytes: files.iter().map(|file| file.bytes.len()).sum(),
    };
    files.push(TableFile::new(SUCCESS_MARKER, Vec::new()));

    storage.replace_table(R::TABLE, files)?;
    debug!(
        "Wrote {} rows to {} ({} partitions, {} bytes)",
        stats.rows, stats.table, stats.partitions, stats.bytes
    );
    Ok(stats)
}

/// Serialize one batch as a complete Parquet file.
pub fn encode_parquet(batch: &RecordBatch) -> Result<Vec<u8>, WriteError> {
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(buffer)
}
