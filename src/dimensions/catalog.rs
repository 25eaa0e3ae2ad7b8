use crate::models::{ArtistRecord, CatalogEntry, SongRecord};

/// One song row per catalog entry, in catalog order.
pub fn extract_songs(entries: &[CatalogEntry]) -> Vec<SongRecord> {
    entries.iter().map(SongRecord::from).collect()
}

/// One artist row per catalog entry, in catalog order.
///
/// Artists are not deduplicated: an artist with several songs appears once
/// per song, and rows may disagree on location or coordinates.
pub fn extract_artists(entries: &[CatalogEntry]) -> Vec<ArtistRecord> {
    entries.iter().map(ArtistRecord::from).collect()
}
