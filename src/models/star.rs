use chrono::NaiveDateTime;

use super::PlayEvent;

/// Row of the `users` table, the latest known state of a listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

impl From<&PlayEvent> for UserRecord {
    fn from(event: &PlayEvent) -> Self {
        UserRecord {
            user_id: event.user_id,
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            gender: event.gender.clone(),
            level: event.level.clone(),
        }
    }
}

/// Row of the `time` table. All fields derive from `start_time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeRow {
    /// Wall-clock time, no zone attached.
    pub start_time: NaiveDateTime,
    pub hour: i32,
    pub day: i32,
    /// ISO-8601 week of year.
    pub week: i32,
    pub month: i32,
    pub year: i32,
    /// Sunday = 1 through Saturday = 7.
    pub weekday: i32,
}

/// Row of the `songplays` fact table.
#[derive(Clone, Debug, PartialEq)]
pub struct SongPlayFact {
    pub songplay_id: i64,
    pub start_time: NaiveDateTime,
    pub user_id: i32,
    pub level: Option<String>,
    /// Set only when the play was matched against the catalog.
    pub song_id: Option<String>,
    /// Set only when the play was matched against the catalog.
    pub artist_id: Option<String>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    pub year: i32,
    pub month: i32,
}
