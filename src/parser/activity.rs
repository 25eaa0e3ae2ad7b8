use super::{cast, ParseReport, RecordProblem};
use crate::models::{PlayEvent, RecordOrder, NEXT_SONG_PAGE};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLogRecord {
    user_id: Option<Value>,
    first_name: Option<Value>,
    last_name: Option<Value>,
    gender: Option<Value>,
    level: Option<Value>,
    ts: Option<Value>,
    page: Option<Value>,
    song: Option<Value>,
    artist: Option<Value>,
    length: Option<Value>,
    session_id: Option<Value>,
    location: Option<Value>,
    user_agent: Option<Value>,
}

/// Parse one activity log line into a [`PlayEvent`].
///
/// Lines for any page other than `NextSong` are rejected with
/// [`RecordProblem::NotAPlay`] before the other fields are validated.
pub fn parse_log_line(line: &str, order: RecordOrder) -> Result<PlayEvent, RecordProblem> {
    let value: Value = serde_json::from_str(line).map_err(|_| RecordProblem::InvalidJson)?;
    if !value.is_object() {
        return Err(RecordProblem::InvalidJson);
    }
    let raw: RawLogRecord =
        serde_json::from_value(value).map_err(|_| RecordProblem::InvalidJson)?;

    let page = match raw.page.as_ref().and_then(cast::to_string) {
        Some(page) if page == NEXT_SONG_PAGE => page,
        _ => return Err(RecordProblem::NotAPlay),
    };

    let user_id = raw
        .user_id
        .as_ref()
        .and_then(cast::to_i32)
        .ok_or(RecordProblem::InvalidUserId)?;

    let ts = raw
        .ts
        .as_ref()
        .and_then(cast::to_i64)
        .ok_or(RecordProblem::InvalidTimestamp)?;
    let played_at = DateTime::from_timestamp_millis(ts).ok_or(RecordProblem::InvalidTimestamp)?;

    Ok(PlayEvent {
        ts,
        played_at,
        user_id,
        first_name: raw.first_name.as_ref().and_then(cast::to_string),
        last_name: raw.last_name.as_ref().and_then(cast::to_string),
        gender: raw.gender.as_ref().and_then(cast::to_string),
        level: raw.level.as_ref().and_then(cast::to_string),
        song: raw.song.as_ref().and_then(cast::to_string),
        artist: raw.artist.as_ref().and_then(cast::to_string),
        length: raw.length.as_ref().and_then(cast::to_f64),
        session_id: raw.session_id.as_ref().and_then(cast::to_i64),
        location: raw.location.as_ref().and_then(cast::to_string),
        user_agent: raw.user_agent.as_ref().and_then(cast::to_string),
        page,
        order,
    })
}

/// Parse a JSON-lines activity log file. Blank lines are skipped.
///
/// `file_index` is the position of the file in discovery order and becomes
/// part of each event's [`RecordOrder`].
pub fn parse_log_file(file_index: u32, text: &str) -> (Vec<PlayEvent>, ParseReport) {
    let mut events = Vec::new();
    let mut report = ParseReport {
        files: 1,
        ..Default::default()
    };

    for (line_index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let order = RecordOrder::new(file_index, line_index as u32);
        match parse_log_line(line, order) {
            Ok(event) => {
                events.push(event);
                report.record(Ok(()));
            }
            Err(problem) => report.record(Err(problem)),
        }
    }

    (events, report)
}
