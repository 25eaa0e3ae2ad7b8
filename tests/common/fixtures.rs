//! Raw input trees for integration tests

use super::constants::*;
use pezzottify_warehouse::{
    Clock, LocalStorage, Pipeline, PipelineError, PipelineOptions, RunSummary,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary input tree plus an output root next to it.
pub struct Fixture {
    _dir: TempDir,
    pub input_root: PathBuf,
    pub output_root: PathBuf,
}

#[allow(dead_code)]
impl Fixture {
    /// Empty input tree with `song_data/` and `log_data/` present.
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let input_root = dir.path().join("input");
        let output_root = dir.path().join("output");
        fs::create_dir_all(input_root.join("song_data")).unwrap();
        fs::create_dir_all(input_root.join("log_data")).unwrap();
        Fixture {
            _dir: dir,
            input_root,
            output_root,
        }
    }

    /// Three catalog songs and three days of activity.
    pub fn new() -> Self {
        let fixture = Self::empty();

        fixture.write_input(
            "song_data/A/A/A/TRAAAAW128F429D538.json",
            &song(SONG_CASUAL_ID, "I Didn't Mean To", ARTIST_CASUAL_ID, "Casual", 218.93179, 0),
        );
        fixture.write_input(
            "song_data/A/A/B/TRAABJL12903CDCF1A.json",
            &song(SONG_DOMPFAFF_ID, "Der Kleine Dompfaff", ARTIST_RENAUD_ID, "Line Renaud", 152.92036, 0),
        );
        fixture.write_input(
            "song_data/A/B/C/TRABCEI128F424C983.json",
            &song(SONG_SCREAM_ID, "Scream", ARTIST_ADELITAS_ID, "Adelitas Way", 213.9424, 2009),
        );

        fixture.write_log(
            "log_data/2018/11/2018-11-01-events.json",
            &[
                play(USER_KAYLEE, "Kaylee", "free", "I Didn't Mean To", "Casual", 218.0, TS_KAYLEE_FIRST),
                page(USER_KAYLEE, "Home", TS_KAYLEE_FIRST + 26_000),
                play(USER_SYLVIE, "Sylvie", "free", "Scream", "Adelitas Way", 215.0, TS_SYLVIE_FIRST),
                page(USER_BROWSER, "Home", TS_SYLVIE_FIRST + 1_000),
                play(USER_RYAN, "Ryan", "free", "Unknown Song", "Nobody", 100.0, TS_RYAN),
            ],
        );
        fixture.write_log(
            "log_data/2018/11/2018-11-30-events.json",
            &[
                logged_out("Home", TS_KAYLEE_LAST - 5_000),
                play(USER_KAYLEE, "Kaylee", "paid", "Der Kleine Dompfaff", "Line Renaud", 155.0, TS_KAYLEE_LAST),
            ],
        );
        fixture.write_log(
            "log_data/2018/12/2018-12-01-events.json",
            &[play(USER_SYLVIE, "Sylvie", "paid", "Scream", "Adelitas Way", 213.0, TS_SYLVIE_LAST)],
        );

        fixture
    }

    pub fn write_input(&self, relative: &str, content: &str) {
        let path = self.input_root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn write_input_bytes(&self, relative: &str, content: &[u8]) {
        let path = self.input_root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn write_log(&self, relative: &str, lines: &[String]) {
        self.write_input(relative, &(lines.join("\n") + "\n"));
    }

    pub fn remove_input(&self, relative: &str) {
        fs::remove_file(self.input_root.join(relative)).unwrap();
    }

    pub fn table_dir(&self, table: &str) -> PathBuf {
        self.output_root.join(table)
    }

    /// Options with the UTC clock, so results do not depend on the host.
    pub fn options() -> PipelineOptions {
        PipelineOptions {
            clock: Clock::Utc,
            ..Default::default()
        }
    }

    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        self.run_with(Self::options())
    }

    pub fn run_with(&self, options: PipelineOptions) -> Result<RunSummary, PipelineError> {
        let storage = Arc::new(LocalStorage::new(&self.input_root, &self.output_root));
        Pipeline::new(storage, options).run()
    }

    pub fn output_exists(&self, relative: impl AsRef<Path>) -> bool {
        self.output_root.join(relative).exists()
    }
}

pub fn song(
    song_id: &str,
    title: &str,
    artist_id: &str,
    artist_name: &str,
    duration: f64,
    year: i32,
) -> String {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": year,
    })
    .to_string()
}

pub fn play(
    user_id: i32,
    first_name: &str,
    level: &str,
    song: &str,
    artist: &str,
    length: f64,
    ts: i64,
) -> String {
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": first_name,
        "gender": "F",
        "itemInSession": 0,
        "lastName": "Tester",
        "length": length,
        "level": level,
        "location": "Phoenix-Mesa-Scottsdale, AZ",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1540344794796.0,
        "sessionId": 139,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0 (Windows NT 6.1; WOW64)",
        "userId": user_id.to_string(),
    })
    .to_string()
}

pub fn page(user_id: i32, page: &str, ts: i64) -> String {
    json!({
        "artist": null,
        "auth": "Logged In",
        "firstName": "Someone",
        "gender": "M",
        "itemInSession": 1,
        "lastName": "Browsing",
        "length": null,
        "level": "free",
        "location": "Tampa-St. Petersburg-Clearwater, FL",
        "method": "GET",
        "page": page,
        "registration": 1540344794796.0,
        "sessionId": 140,
        "song": null,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0",
        "userId": user_id.to_string(),
    })
    .to_string()
}

pub fn logged_out(page: &str, ts: i64) -> String {
    json!({
        "artist": null,
        "auth": "Logged Out",
        "firstName": null,
        "gender": null,
        "itemInSession": 0,
        "lastName": null,
        "length": null,
        "level": "free",
        "location": null,
        "method": "GET",
        "page": page,
        "registration": null,
        "sessionId": 141,
        "song": null,
        "status": 200,
        "ts": ts,
        "userAgent": null,
        "userId": "",
    })
    .to_string()
}
