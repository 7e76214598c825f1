//! Track metadata
//!
//! Tracks come from a static list loaded once at startup and are never
//! mutated afterwards.

use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// Immutable track record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique id within the playlist
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Performer name
    pub artist: String,

    /// Cover art reference (URL or asset path)
    #[serde(default)]
    pub cover: String,

    /// Audio source reference handed to the media engine
    #[serde(alias = "url")]
    pub source: String,

    /// Pre-formatted duration shown in the track list ("3:42")
    #[serde(default, alias = "duration")]
    pub display_duration: String,
}

impl Track {
    /// Create a track with no cover art and no display duration
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            cover: String::new(),
            source: source.into(),
            display_duration: String::new(),
        }
    }

    /// Set the cover art reference
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = cover.into();
        self
    }

    /// Set the display duration label
    pub fn with_display_duration(mut self, duration: impl Into<String>) -> Self {
        self.display_duration = duration.into();
        self
    }
}
