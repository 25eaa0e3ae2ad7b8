//! Dimension tables of the star schema.
//!
//! Songs and artists are plain projections of the catalog. Users are a
//! "latest state wins" aggregation of play events, and the time dimension is
//! derived from each play's timestamp under a [`Clock`].

mod catalog;
mod time;
mod users;

pub use catalog::{extract_artists, extract_songs};
pub use time::{extract_time, Clock};
pub use users::extract_users;
