//! Reading written tables back

#![allow(dead_code)]

use arrow::array::{Array, Int32Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;
use walkdir::WalkDir;

/// Rows of one partition directory.
#[derive(Debug, PartialEq)]
pub struct PartitionData {
    /// Partition directory relative to the table, `""` when unpartitioned
    pub dir: String,
    pub batch: RecordBatch,
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/")
}

/// Every Parquet file of a table, in sorted partition order.
pub fn read_table(table_dir: &Path) -> Vec<PartitionData> {
    let mut partitions = Vec::new();
    for entry in WalkDir::new(table_dir).sort_by_file_name() {
        let entry = entry.unwrap();
        let is_parquet = entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(".parquet");
        if !is_parquet {
            continue;
        }

        let file = File::open(entry.path()).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        let batch = arrow::compute::concat_batches(&batches[0].schema(), &batches).unwrap();

        let dir = entry
            .path()
            .parent()
            .map(|parent| relative(table_dir, parent))
            .unwrap_or_default();
        partitions.push(PartitionData { dir, batch });
    }
    partitions
}

/// Partition directories of a table, as `a=1/b=2` strings.
pub fn partition_dirs(table_dir: &Path) -> Vec<String> {
    read_table(table_dir).into_iter().map(|p| p.dir).collect()
}

pub fn string_column(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    let column = batch.column_by_name(name).unwrap();
    let values = column.as_any().downcast_ref::<StringArray>().unwrap();
    (0..values.len())
        .map(|i| (!values.is_null(i)).then(|| values.value(i).to_string()))
        .collect()
}

pub fn i32_column(batch: &RecordBatch, name: &str) -> Vec<i32> {
    let column = batch.column_by_name(name).unwrap();
    let values = column.as_any().downcast_ref::<Int32Array>().unwrap();
    values.values().to_vec()
}

pub fn i64_column(batch: &RecordBatch, name: &str) -> Vec<i64> {
    let column = batch.column_by_name(name).unwrap();
    let values = column.as_any().downcast_ref::<Int64Array>().unwrap();
    values.values().to_vec()
}
