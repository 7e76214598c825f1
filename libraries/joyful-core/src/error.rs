/// Core error types for Joyful Notes
use thiserror::Error;

use crate::types::TrackId;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A playlist must contain at least one track
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Two tracks in one playlist share an id
    #[error("Duplicate track id: {0}")]
    DuplicateTrack(TrackId),

    /// Track not found in the playlist
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),
}
