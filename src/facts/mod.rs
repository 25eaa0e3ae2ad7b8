//! The `songplays` fact table.

mod resolver;

pub use resolver::{resolve_songplays, MatchStats, SongIndex, DURATION_TOLERANCE_SECS};
