use crate::models::{PlayEvent, TimeRow};
use chrono::{DateTime, Datelike, Local, NaiveDateTime, Timelike, Utc};
use clap::ValueEnum;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashSet;

/// Wall clock used to turn a play instant into a zone-less `start_time`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    /// Local time of the host running the batch. Historical output was
    /// produced with this convention.
    #[default]
    Local,
    /// UTC wall clock, for host-independent output.
    Utc,
}

impl Clock {
    /// Wall-clock reading of `instant`, keeping millisecond precision.
    pub fn start_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Clock::Local => instant.with_timezone(&Local).naive_local(),
            Clock::Utc => instant.naive_utc(),
        }
    }
}

impl TimeRow {
    pub fn from_start_time(start_time: NaiveDateTime) -> Self {
        TimeRow {
            start_time,
            hour: start_time.hour() as i32,
            day: start_time.day() as i32,
            week: start_time.iso_week().week() as i32,
            month: start_time.month() as i32,
            year: start_time.year(),
            weekday: start_time.weekday().number_from_sunday() as i32,
        }
    }
}

/// Build the time dimension, one row per play in input order.
///
/// With `dedupe` set, only the first row for each distinct `start_time` is
/// kept.
pub fn extract_time(events: &[PlayEvent], clock: Clock, dedupe: bool) -> Vec<TimeRow> {
    let mut rows: Vec<TimeRow> = events
        .par_iter()
        .map(|event| TimeRow::from_start_time(clock.start_time(event.played_at)))
        .collect();

    if dedupe {
        let mut seen = HashSet::with_capacity(rows.len());
        rows.retain(|row| seen.insert(row.start_time));
    }
    rows
}
