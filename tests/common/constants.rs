//! Shared constants for integration tests
//!
//! Timestamps are epoch milliseconds. With the UTC clock every play except
//! the last one falls in November 2018.

#![allow(dead_code)]

// ============================================================================
// Catalog
// ============================================================================

pub const SONG_CASUAL_ID: &str = "SOMZWCG12A8C13C480";
pub const ARTIST_CASUAL_ID: &str = "ARD7TVE1187B99BFB1";

pub const SONG_DOMPFAFF_ID: &str = "SOUPIRU12A6D4FA1E1";
pub const ARTIST_RENAUD_ID: &str = "ARJIE2Y1187B994AB7";

pub const SONG_SCREAM_ID: &str = "SOBLFFE12AF72AA5BA";
pub const ARTIST_ADELITAS_ID: &str = "ARJNIUY12298900C91";

// ============================================================================
// Activity log
// ============================================================================

/// Kaylee: free on Nov 1st, paid by Nov 30th
pub const USER_KAYLEE: i32 = 8;
/// Sylvie: free in November, paid on Dec 1st
pub const USER_SYLVIE: i32 = 10;
/// Ryan: a single unmatched play
pub const USER_RYAN: i32 = 26;
/// Only ever visits the home page
pub const USER_BROWSER: i32 = 99;

/// 2018-11-01T21:01:46.796Z, Kaylee plays "I Didn't Mean To"
pub const TS_KAYLEE_FIRST: i64 = 1541106106796;
/// 2018-11-01T21:17:33.796Z, Sylvie plays "Scream"
pub const TS_SYLVIE_FIRST: i64 = 1541107053796;
/// 2018-11-01T21:50:15.796Z, Ryan plays a song missing from the catalog
pub const TS_RYAN: i64 = 1541109015796;
/// 2018-11-30T00:22:07.796Z, Kaylee plays "Der Kleine Dompfaff", too long to match
pub const TS_KAYLEE_LAST: i64 = 1543537327796;
/// 2018-12-01T00:00:00.000Z, Sylvie plays "Scream" again
pub const TS_SYLVIE_LAST: i64 = 1543622400000;

/// Number of `NextSong` events in the default fixture
pub const PLAY_COUNT: usize = 5;
