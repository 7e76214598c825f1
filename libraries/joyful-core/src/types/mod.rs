//! Domain types

mod ids;
mod playlist;
mod track;

pub use ids::TrackId;
pub use playlist::Playlist;
pub use track::Track;
