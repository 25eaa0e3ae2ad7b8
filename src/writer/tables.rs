//! Column layout of each warehouse table.

use crate::models::{ArtistRecord, SongPlayFact, SongRecord, TimeRow, UserRecord};
use arrow::array::{
    ArrayRef, Float64Array, Int32Array, Int64Array, StringArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;
use std::sync::Arc;

/// A row type that can be materialized as a partitioned table.
pub trait TableRow: Sync {
    /// Directory name of the table under the output root.
    const TABLE: &'static str;

    /// Partition columns, outermost first.
    const PARTITION_BY: &'static [&'static str];

    /// Values of the partition columns, in [`Self::PARTITION_BY`] order.
    fn partition_values(&self) -> Vec<Option<String>>;

    /// Columns stored inside the data files. Partition columns are not part of it.
    fn schema() -> SchemaRef;

    fn record_batch(rows: &[&Self]) -> Result<RecordBatch, ArrowError>;
}

fn timestamp_field(name: &str) -> Field {
    Field::new(name, DataType::Timestamp(TimeUnit::Microsecond, None), false)
}

fn micros(start_time: &NaiveDateTime) -> i64 {
    start_time.and_utc().timestamp_micros()
}

// =============================================================================
// Dimensions
// =============================================================================

impl TableRow for SongRecord {
    const TABLE: &'static str = "songs";
    const PARTITION_BY: &'static [&'static str] = &["year", "artist_id"];

    fn partition_values(&self) -> Vec<Option<String>> {
        vec![self.year.map(|year| year.to_string()), self.artist_id.clone()]
    }

    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("song_id", DataType::Utf8, false),
            Field::new("title", DataType::Utf8, true),
            Field::new("duration", DataType::Float64, true),
        ]))
    }

    fn record_batch(rows: &[&Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.song_id.as_str()),
            )),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.title.as_deref()))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.duration))),
        ];
        RecordBatch::try_new(Self::schema(), columns)
    }
}

impl TableRow for ArtistRecord {
    const TABLE: &'static str = "artists";
    const PARTITION_BY: &'static [&'static str] = &[];

    fn partition_values(&self) -> Vec<Option<String>> {
        Vec::new()
    }

    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("artist_id", DataType::Utf8, true),
            Field::new("name", DataType::Utf8, true),
            Field::new("location", DataType::Utf8, true),
            Field::new("latitude", DataType::Float64, true),
            Field::new("longitude", DataType::Float64, true),
        ]))
    }

    fn record_batch(rows: &[&Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.artist_id.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.name.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.location.as_deref()))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.latitude))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.longitude))),
        ];
        RecordBatch::try_new(Self::schema(), columns)
    }
}

impl TableRow for UserRecord {
    const TABLE: &'static str = "users";
    const PARTITION_BY: &'static [&'static str] = &[];

    fn partition_values(&self) -> Vec<Option<String>> {
        Vec::new()
    }

    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("user_id", DataType::Int32, false),
            Field::new("first_name", DataType::Utf8, true),
            Field::new("last_name", DataType::Utf8, true),
            Field::new("gender", DataType::Utf8, true),
            Field::new("level", DataType::Utf8, true),
        ]))
    }

    fn record_batch(rows: &[&Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.user_id))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.first_name.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.last_name.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.gender.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.level.as_deref()))),
        ];
        RecordBatch::try_new(Self::schema(), columns)
    }
}

impl TableRow for TimeRow {
    const TABLE: &'static str = "time";
    const PARTITION_BY: &'static [&'static str] = &["year", "month"];

    fn partition_values(&self) -> Vec<Option<String>> {
        vec![Some(self.year.to_string()), Some(self.month.to_string())]
    }

    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            timestamp_field("start_time"),
            Field::new("hour", DataType::Int32, false),
            Field::new("day", DataType::Int32, false),
            Field::new("week", DataType::Int32, false),
            Field::new("weekday", DataType::Int32, false),
        ]))
    }

    fn record_batch(rows: &[&Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(TimestampMicrosecondArray::from_iter_values(
                rows.iter().map(|r| micros(&r.start_time)),
            )),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.hour))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.day))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.week))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.weekday))),
        ];
        RecordBatch::try_new(Self::schema(), columns)
    }
}

// =============================================================================
// Facts
// =============================================================================

impl TableRow for SongPlayFact {
    const TABLE: &'static str = "songplays";
    const PARTITION_BY: &'static [&'static str] = &["year", "month"];

    fn partition_values(&self) -> Vec<Option<String>> {
        vec![Some(self.year.to_string()), Some(self.month.to_string())]
    }

    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("songplay_id", DataType::Int64, false),
            timestamp_field("start_time"),
            Field::new("user_id", DataType::Int32, false),
            Field::new("level", DataType::Utf8, true),
            Field::new("song_id", DataType::Utf8, true),
            Field::new("artist_id", DataType::Utf8, true),
            Field::new("session_id", DataType::Int64, true),
            Field::new("location", DataType::Utf8, true),
            Field::new("user_agent", DataType::Utf8, true),
        ]))
    }

    fn record_batch(rows: &[&Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.songplay_id))),
            Arc::new(TimestampMicrosecondArray::from_iter_values(
                rows.iter().map(|r| micros(&r.start_time)),
            )),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.user_id))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.level.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.song_id.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.artist_id.as_deref()))),
            Arc::new(Int64Array::from_iter(rows.iter().map(|r| r.session_id))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.location.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.user_agent.as_deref()))),
        ];
        RecordBatch::try_new(Self::schema(), columns)
    }
}
