use super::PipelineOptions;
use crate::dimensions::{extract_artists, extract_songs, extract_time, extract_users};
use crate::facts::{resolve_songplays, MatchStats};
use crate::models::{
    ArtistRecord, CatalogEntry, PlayEvent, SongPlayFact, SongRecord, TimeRow, UserRecord,
};

/// Every table of one batch, ready to be written.
#[derive(Debug, Clone, Default)]
pub struct StarSchema {
    pub songs: Vec<SongRecord>,
    pub artists: Vec<ArtistRecord>,
    pub users: Vec<UserRecord>,
    pub time: Vec<TimeRow>,
    pub songplays: Vec<SongPlayFact>,
    pub match_stats: MatchStats,
}

/// Derive all five tables from the parsed feeds.
///
/// `events` must be in input order and contain plays only.
pub fn build_star_schema(
    catalog: &[CatalogEntry],
    events: &[PlayEvent],
    options: &PipelineOptions,
) -> StarSchema {
    let ((songs, artists), (users, time)) = rayon::join(
        || (extract_songs(catalog), extract_artists(catalog)),
        || {
            (
                extract_users(events),
                extract_time(events, options.clock, options.dedupe_time_rows),
            )
        },
    );
    let (songplays, match_stats) = resolve_songplays(events, catalog, options.clock);

    StarSchema {
        songs,
        artists,
        users,
        time,
        songplays,
        match_stats,
    }
}
