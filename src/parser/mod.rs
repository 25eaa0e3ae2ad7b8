//! Record parsing for the catalog and activity log feeds.
//!
//! Parsing never fails a batch. A record that cannot be turned into a typed
//! row is dropped and tallied in a [`ParseReport`] under its [`RecordProblem`].

mod activity;
mod cast;
mod catalog;

pub use activity::{parse_log_file, parse_log_line};
pub use catalog::{parse_catalog_file, parse_catalog_record};

use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Why a raw record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordProblem {
    #[error("not a valid JSON object")]
    InvalidJson,

    #[error("missing song_id")]
    MissingSongId,

    #[error("userId is not an integer")]
    InvalidUserId,

    #[error("ts is missing or out of range")]
    InvalidTimestamp,

    /// Not a playback event. Expected for most log lines, not a data problem.
    #[error("page is not NextSong")]
    NotAPlay,
}

/// Tally of one parsing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub files: usize,
    pub accepted: usize,
    pub invalid_json: usize,
    pub missing_song_id: usize,
    pub invalid_user_id: usize,
    pub invalid_timestamp: usize,
    pub not_a_play: usize,
}

impl ParseReport {
    pub fn record(&mut self, outcome: Result<(), RecordProblem>) {
        match outcome {
            Ok(()) => self.accepted += 1,
            Err(RecordProblem::InvalidJson) => self.invalid_json += 1,
            Err(RecordProblem::MissingSongId) => self.missing_song_id += 1,
            Err(RecordProblem::InvalidUserId) => self.invalid_user_id += 1,
            Err(RecordProblem::InvalidTimestamp) => self.invalid_timestamp += 1,
            Err(RecordProblem::NotAPlay) => self.not_a_play += 1,
        }
    }

    /// Combines two reports. Associative and commutative, so partial reports
    /// from parallel workers can be merged in any order.
    pub fn merge(mut self, other: ParseReport) -> ParseReport {
        self.files += other.files;
        self.accepted += other.accepted;
        self.invalid_json += other.invalid_json;
        self.missing_song_id += other.missing_song_id;
        self.invalid_user_id += other.invalid_user_id;
        self.invalid_timestamp += other.invalid_timestamp;
        self.not_a_play += other.not_a_play;
        self
    }

    /// Records dropped because they were malformed. Filtered non-play pages
    /// are not counted.
    pub fn malformed(&self) -> usize {
        self.invalid_json + self.missing_song_id + self.invalid_user_id + self.invalid_timestamp
    }

    pub fn log(&self, feed: &str) {
        info!(
            "Parsed {} {} files: {} records accepted, {} filtered",
            self.files, feed, self.accepted, self.not_a_play
        );
        if self.malformed() > 0 {
            warn!("Dropped {} malformed {} records: {}", self.malformed(), feed, self);
        }
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid_json={} missing_song_id={} invalid_user_id={} invalid_timestamp={}",
            self.invalid_json, self.missing_song_id, self.invalid_user_id, self.invalid_timestamp
        )
    }
}
