//! Row builders shared by unit tests.

use crate::models::{CatalogEntry, PlayEvent, RecordOrder, NEXT_SONG_PAGE};
use chrono::DateTime;

/// A `NextSong` event for `user_id` at `ts` with every optional field empty
/// except `level`, which is "free".
pub fn play(user_id: i32, ts: i64) -> PlayEvent {
    PlayEvent {
        ts,
        played_at: DateTime::from_timestamp_millis(ts).unwrap(),
        user_id,
        first_name: None,
        last_name: None,
        gender: None,
        level: Some("free".to_owned()),
        song: None,
        artist: None,
        length: None,
        session_id: None,
        location: None,
        user_agent: None,
        page: NEXT_SONG_PAGE.to_owned(),
        order: RecordOrder::default(),
    }
}

/// Same as [`play`], for a specific song heard for `length` seconds.
pub fn play_of(user_id: i32, ts: i64, song: &str, artist: &str, length: f64) -> PlayEvent {
    PlayEvent {
        song: Some(song.to_owned()),
        artist: Some(artist.to_owned()),
        length: Some(length),
        ..play(user_id, ts)
    }
}

pub fn song(song_id: &str, title: &str, artist_id: &str, artist_name: &str, duration: f64) -> CatalogEntry {
    CatalogEntry {
        song_id: song_id.to_owned(),
        title: Some(title.to_owned()),
        artist_id: Some(artist_id.to_owned()),
        year: Some(2001),
        duration: Some(duration),
        artist_name: Some(artist_name.to_owned()),
        artist_location: None,
        artist_latitude: None,
        artist_longitude: None,
    }
}
