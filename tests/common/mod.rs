//! Common test infrastructure
//!
//! Integration tests build a raw input tree in a temporary directory, run the
//! pipeline against it through `LocalStorage` and read the Parquet output
//! back. Tests should only import from this module, not from internal
//! submodules.

mod constants;
mod fixtures;
mod tables;

// Public API - this is what tests import
pub use constants::*;
pub use fixtures::{play, Fixture};
#[allow(unused_imports)]
pub use tables::{
    i32_column, i64_column, partition_dirs, read_table, string_column, PartitionData,
};
