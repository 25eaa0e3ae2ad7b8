use super::{cast, ParseReport, RecordProblem};
use crate::models::CatalogEntry;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawCatalogRecord {
    song_id: Option<Value>,
    title: Option<Value>,
    artist_id: Option<Value>,
    artist_name: Option<Value>,
    artist_location: Option<Value>,
    artist_latitude: Option<Value>,
    artist_longitude: Option<Value>,
    year: Option<Value>,
    duration: Option<Value>,
}

/// Parse one catalog JSON object into a [`CatalogEntry`].
pub fn parse_catalog_record(value: Value) -> Result<CatalogEntry, RecordProblem> {
    if !value.is_object() {
        return Err(RecordProblem::InvalidJson);
    }
    let raw: RawCatalogRecord =
        serde_json::from_value(value).map_err(|_| RecordProblem::InvalidJson)?;

    let song_id = raw
        .song_id
        .as_ref()
        .and_then(cast::to_string)
        .filter(|id| !id.trim().is_empty())
        .ok_or(RecordProblem::MissingSongId)?;

    Ok(CatalogEntry {
        song_id,
        title: raw.title.as_ref().and_then(cast::to_string),
        artist_id: raw.artist_id.as_ref().and_then(cast::to_string),
        year: raw.year.as_ref().and_then(cast::to_i32),
        duration: raw.duration.as_ref().and_then(cast::to_f64),
        artist_name: raw.artist_name.as_ref().and_then(cast::to_string),
        artist_location: raw.artist_location.as_ref().and_then(cast::to_string),
        artist_latitude: raw.artist_latitude.as_ref().and_then(cast::to_f64),
        artist_longitude: raw.artist_longitude.as_ref().and_then(cast::to_f64),
    })
}

/// Parse the content of a catalog file.
///
/// A catalog file normally holds a single JSON object, but any sequence of
/// whitespace separated objects is accepted. Parsing stops at the first
/// syntax error, since nothing after it can be trusted.
pub fn parse_catalog_file(text: &str) -> (Vec<CatalogEntry>, ParseReport) {
    let mut entries = Vec::new();
    let mut report = ParseReport {
        files: 1,
        ..Default::default()
    };

    for value in serde_json::Deserializer::from_str(text).into_iter::<Value>() {
        let value = match value {
            Ok(value) => value,
            Err(_) => {
                report.record(Err(RecordProblem::InvalidJson));
                break;
            }
        };
        match parse_catalog_record(value) {
            Ok(entry) => {
                entries.push(entry);
                report.record(Ok(()));
            }
            Err(problem) => report.record(Err(problem)),
        }
    }

    (entries, report)
}
