//! Play-to-catalog resolution.
//!
//! Every play becomes exactly one fact row. A play is attributed to a catalog
//! song when title and artist name match exactly and the played length is
//! within [`DURATION_TOLERANCE_SECS`] of the catalog duration. Plays without a
//! match keep null `song_id` and `artist_id`.
//!
//! Ids are assigned after sorting plays chronologically, so `songplay_id`
//! order always agrees with timestamp order.

use crate::dimensions::Clock;
use crate::models::{CatalogEntry, PlayEvent, SongPlayFact};
use chrono::Datelike;
use rayon::prelude::*;
use std::collections::HashMap;

/// Maximum difference, exclusive, between played length and catalog duration.
pub const DURATION_TOLERANCE_SECS: f64 = 2.0;

/// Outcome counts of a resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub matched: usize,
    pub unmatched: usize,
}

/// Catalog lookup keyed by exact title, then exact artist name.
pub struct SongIndex<'a> {
    by_title: HashMap<&'a str, HashMap<&'a str, Vec<&'a CatalogEntry>>>,
}

impl<'a> SongIndex<'a> {
    /// Index the entries that can ever match: those with a title, an artist
    /// name and a duration.
    pub fn new(entries: &'a [CatalogEntry]) -> Self {
        let mut by_title: HashMap<&'a str, HashMap<&'a str, Vec<&'a CatalogEntry>>> =
            HashMap::new();
        for entry in entries {
            if let (Some(title), Some(artist), Some(_)) = (
                entry.title.as_deref(),
                entry.artist_name.as_deref(),
                entry.duration,
            ) {
                by_title
                    .entry(title)
                    .or_default()
                    .entry(artist)
                    .or_default()
                    .push(entry);
            }
        }
        SongIndex { by_title }
    }

    /// Find the catalog entry for a play of `title` by `artist` lasting
    /// `length` seconds.
    ///
    /// When several entries are within tolerance the closest duration wins,
    /// then the smallest `song_id`.
    pub fn find(&self, title: &str, artist: &str, length: f64) -> Option<&'a CatalogEntry> {
        self.by_title
            .get(title)?
            .get(artist)?
            .iter()
            .copied()
            .filter_map(|entry| {
                let diff = (length - entry.duration?).abs();
                (diff < DURATION_TOLERANCE_SECS).then_some((diff, entry))
            })
            .min_by(|(a_diff, a), (b_diff, b)| {
                a_diff
                    .total_cmp(b_diff)
                    .then_with(|| a.song_id.cmp(&b.song_id))
            })
            .map(|(_, entry)| entry)
    }

    pub fn resolve(&self, event: &PlayEvent) -> Option<&'a CatalogEntry> {
        self.find(
            event.song.as_deref()?,
            event.artist.as_deref()?,
            event.length?,
        )
    }
}

/// Build the fact table from every play, in chronological order.
pub fn resolve_songplays(
    events: &[PlayEvent],
    catalog: &[CatalogEntry],
    clock: Clock,
) -> (Vec<SongPlayFact>, MatchStats) {
    let mut ordered: Vec<&PlayEvent> = events.iter().collect();
    ordered.par_sort_by_key(|event| event.chronological_key());

    let index = SongIndex::new(catalog);
    let facts: Vec<SongPlayFact> = ordered
        .par_iter()
        .enumerate()
        .map(|(position, event)| {
            let start_time = clock.start_time(event.played_at);
            let song = index.resolve(event);
            SongPlayFact {
                songplay_id: position as i64,
                start_time,
                user_id: event.user_id,
                level: event.level.clone(),
                song_id: song.map(|s| s.song_id.clone()),
                artist_id: song.and_then(|s| s.artist_id.clone()),
                session_id: event.session_id,
                location: event.location.clone(),
                user_agent: event.user_agent.clone(),
                year: start_time.year(),
                month: start_time.month() as i32,
            }
        })
        .collect();

    let matched = facts.iter().filter(|fact| fact.song_id.is_some()).count();
    let stats = MatchStats {
        matched,
        unmatched: facts.len() - matched,
    };
    (facts, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordOrder;
    use crate::test_support::{play, play_of, song};

    #[test]
    fn test_match_within_tolerance() {
        let catalog = vec![song("S1", "Song A", "AR1", "Artist A", 211.9)];
        let events = vec![play_of(1, 1000, "Song A", "Artist A", 210.5)];

        let (facts, stats) = resolve_songplays(&events, &catalog, Clock::Utc);

        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].song_id.as_deref(), Some("S1"));
        assert_eq!(facts[0].artist_id.as_deref(), Some("AR1"));
        assert_eq!(stats, MatchStats { matched: 1, unmatched: 0 });
    }

    #[test]
    fn test_no_match_outside_tolerance_still_emits_fact() {
        let catalog = vec![song("S1", "Song A", "AR1", "Artist A", 213.0)];
        let events = vec![play_of(1, 1000, "Song A", "Artist A", 210.5)];

        let (facts, stats) = resolve_songplays(&events, &catalog, Clock::Utc);

        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].song_id, None);
        assert_eq!(facts[0].artist_id, None);
        assert_eq!(facts[0].user_id, 1);
        assert_eq!(stats, MatchStats { matched: 0, unmatched: 1 });
    }

    #[test]
    fn test_tolerance_is_strict() {
        let catalog = vec![song("S1", "Song A", "AR1", "Artist A", 212.0)];
        let index = SongIndex::new(&catalog);

        assert!(index.find("Song A", "Artist A", 210.0).is_none());
        assert!(index.find("Song A", "Artist A", 214.0).is_none());
        assert!(index.find("Song A", "Artist A", 210.01).is_some());
        assert!(index.find("Song A", "Artist A", 213.99).is_some());
    }

    #[test]
    fn test_title_and_artist_must_match_exactly() {
        let catalog = vec![song("S1", "Song A", "AR1", "Artist A", 200.0)];
        let index = SongIndex::new(&catalog);

        assert!(index.find("song a", "Artist A", 200.0).is_none());
        assert!(index.find("Song A ", "Artist A", 200.0).is_none());
        assert!(index.find("Song A", "ARTIST A", 200.0).is_none());
        assert!(index.find("Song A", "Artist B", 200.0).is_none());
        assert!(index.find("Song A", "Artist A", 200.0).is_some());
    }

    #[test]
    fn test_missing_fields_never_match() {
        let catalog = vec![song("S1", "Song A", "AR1", "Artist A", 200.0)];
        let index = SongIndex::new(&catalog);

        let mut event = play_of(1, 1, "Song A", "Artist A", 200.0);
        event.length = None;
        assert!(index.resolve(&event).is_none());

        let mut event = play_of(1, 1, "Song A", "Artist A", 200.0);
        event.artist = None;
        assert!(index.resolve(&event).is_none());

        let mut no_duration = song("S2", "Song B", "AR1", "Artist A", 0.0);
        no_duration.duration = None;
        let catalog = vec![no_duration];
        let index = SongIndex::new(&catalog);
        assert!(index.find("Song B", "Artist A", 0.0).is_none());
    }

    #[test]
    fn test_closest_candidate_wins() {
        let catalog = vec![
            song("S3", "Song A", "AR3", "Artist A", 201.5),
            song("S2", "Song A", "AR2", "Artist A", 200.2),
            song("S1", "Song A", "AR1", "Artist A", 199.0),
        ];
        let index = SongIndex::new(&catalog);

        let found = index.find("Song A", "Artist A", 200.0).unwrap();
        assert_eq!(found.song_id, "S2");
    }

    #[test]
    fn test_equal_candidates_pick_smallest_song_id() {
        let catalog = vec![
            song("SB", "Song A", "AR2", "Artist A", 201.0),
            song("SA", "Song A", "AR1", "Artist A", 199.0),
        ];
        let index = SongIndex::new(&catalog);
        assert_eq!(index.find("Song A", "Artist A", 200.0).unwrap().song_id, "SA");

        let reversed: Vec<CatalogEntry> = catalog.into_iter().rev().collect();
        let index = SongIndex::new(&reversed);
        assert_eq!(index.find("Song A", "Artist A", 200.0).unwrap().song_id, "SA");
    }

    #[test]
    fn test_ids_follow_timestamp_order() {
        let mut events = vec![
            play(1, 5000),
            play(2, 1000),
            play(3, 3000),
            play(4, 3000),
            play(5, 2000),
        ];
        for (line, event) in events.iter_mut().enumerate() {
            event.order = RecordOrder::new(0, line as u32);
        }

        let (facts, _) = resolve_songplays(&events, &[], Clock::Utc);

        let users: Vec<i32> = facts.iter().map(|f| f.user_id).collect();
        assert_eq!(users, vec![2, 5, 3, 4, 1]);
        for pair in facts.windows(2) {
            assert!(pair[0].songplay_id < pair[1].songplay_id);
            assert!(pair[0].start_time <= pair[1].start_time);
        }
    }

    #[test]
    fn test_two_plays_of_same_user() {
        let mut later = play(7, 2000);
        later.level = Some("paid".to_owned());
        let mut earlier = play(7, 1000);
        earlier.order = RecordOrder::new(0, 1);

        let (facts, _) = resolve_songplays(&[later, earlier], &[], Clock::Utc);

        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].start_time.and_utc().timestamp_millis(), 1000);
        assert_eq!(facts[1].start_time.and_utc().timestamp_millis(), 2000);
        assert!(facts[0].songplay_id < facts[1].songplay_id);
        assert_eq!(facts[1].level.as_deref(), Some("paid"));
    }

    #[test]
    fn test_fact_carries_event_columns_and_partition_fields() {
        let mut event = play(12, 1541105830796);
        event.session_id = Some(38);
        event.location = Some("Tampa, FL".to_owned());
        event.user_agent = Some("Mozilla/5.0".to_owned());

        let (facts, _) = resolve_songplays(&[event], &[], Clock::Utc);
        let fact = &facts[0];

        assert_eq!(fact.songplay_id, 0);
        assert_eq!(fact.user_id, 12);
        assert_eq!(fact.level.as_deref(), Some("free"));
        assert_eq!(fact.session_id, Some(38));
        assert_eq!(fact.location.as_deref(), Some("Tampa, FL"));
        assert_eq!(fact.user_agent.as_deref(), Some("Mozilla/5.0"));
        // 2018-11-01T20:57:10.796Z
        assert_eq!(fact.year, 2018);
        assert_eq!(fact.month, 11);
    }

    #[test]
    fn test_every_play_yields_one_fact() {
        let catalog = vec![song("S1", "Song A", "AR1", "Artist A", 200.0)];
        let events: Vec<PlayEvent> = (0..300)
            .map(|i| play_of(i % 11, i as i64 * 13, "Song A", "Artist A", 199.0 + (i % 5) as f64))
            .collect();

        let (facts, stats) = resolve_songplays(&events, &catalog, Clock::Utc);

        assert_eq!(facts.len(), 300);
        assert_eq!(stats.matched + stats.unmatched, 300);
        // lengths 199, 200, 201 match; 202 and 203 do not
        assert_eq!(stats.matched, 180);
    }
}
