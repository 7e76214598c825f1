//! Error types for playback management

use joyful_core::{CoreError, TrackId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The media engine failed to load or start a source
    ///
    /// Never returned from a command. Logged and kept as the controller's
    /// last error.
    #[error("Engine failed to load or play: {0}")]
    EngineLoadFailure(String),

    /// Selected track id is not in the playlist
    #[error("Track not found: {0}")]
    UnknownTrack(TrackId),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Playlist construction error
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
