//! Row types of the warehouse.
//!
//! Every table is an ordered `Vec` of one of these immutable rows. Raw input
//! is parsed into [`CatalogEntry`] and [`PlayEvent`]; everything else is a
//! projection or aggregation of those two.

mod catalog_entry;
mod play_event;
mod star;

pub use catalog_entry::{ArtistRecord, CatalogEntry, SongRecord};
pub use play_event::{PlayEvent, RecordOrder, NEXT_SONG_PAGE};
pub use star::{SongPlayFact, TimeRow, UserRecord};
