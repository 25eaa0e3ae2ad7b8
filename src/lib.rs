//! Pezzottify Listening Warehouse
//!
//! Batch ETL that turns a song catalog and a user activity log into a star
//! schema (songs, artists, users, time, songplays) stored as partitioned
//! Parquet datasets.

pub mod config;
pub mod dimensions;
pub mod facts;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod storage;
pub mod writer;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use dimensions::Clock;
pub use pipeline::{Pipeline, PipelineError, PipelineOptions, RunSummary};
pub use storage::{LocalStorage, MemoryStorage, WarehouseStorage};
