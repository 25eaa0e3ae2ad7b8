use chrono::{DateTime, Utc};

/// Page value of log lines that represent a song being played.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// Position of a record in the input snapshot.
///
/// Input files are discovered in sorted path order, so `(file, line)` is a
/// stable total order over every record of a batch. It breaks ties between
/// events sharing the same timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordOrder {
    pub file: u32,
    pub line: u32,
}

impl RecordOrder {
    pub fn new(file: u32, line: u32) -> Self {
        RecordOrder { file, line }
    }
}

/// A parsed activity log line with `page == "NextSong"`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayEvent {
    /// Raw timestamp, milliseconds since the epoch.
    pub ts: i64,
    /// `ts` as an instant. Always representable, the parser rejects the rest.
    pub played_at: DateTime<Utc>,
    pub user_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    /// Song title as reported by the client.
    pub song: Option<String>,
    /// Artist name as reported by the client.
    pub artist: Option<String>,
    /// Played length in seconds.
    pub length: Option<f64>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    pub page: String,
    pub order: RecordOrder,
}

impl PlayEvent {
    /// Sort key giving the global playback order: timestamp, then input position.
    pub fn chronological_key(&self) -> (i64, RecordOrder) {
        (self.ts, self.order)
    }
}
