/// A parsed song catalog entry.
///
/// Carries both the song columns and the `artist_`-prefixed columns of the
/// source record; the songs and artists tables are projections of it.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub song_id: String,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    /// Release year, 0 in the source feed when unknown.
    pub year: Option<i32>,
    /// Duration in seconds.
    pub duration: Option<f64>,
    pub artist_name: Option<String>,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
}

/// Row of the `songs` table.
#[derive(Clone, Debug, PartialEq)]
pub struct SongRecord {
    pub song_id: String,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    pub year: Option<i32>,
    pub duration: Option<f64>,
}

/// Row of the `artists` table.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtistRecord {
    pub artist_id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&CatalogEntry> for SongRecord {
    fn from(entry: &CatalogEntry) -> Self {
        SongRecord {
            song_id: entry.song_id.clone(),
            title: entry.title.clone(),
            artist_id: entry.artist_id.clone(),
            year: entry.year,
            duration: entry.duration,
        }
    }
}

impl From<&CatalogEntry> for ArtistRecord {
    fn from(entry: &CatalogEntry) -> Self {
        ArtistRecord {
            artist_id: entry.artist_id.clone(),
            name: entry.artist_name.clone(),
            location: entry.artist_location.clone(),
            latitude: entry.artist_latitude,
            longitude: entry.artist_longitude,
        }
    }
}
