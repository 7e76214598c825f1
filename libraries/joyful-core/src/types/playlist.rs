//! Fixed, non-empty playlist with wrap-around navigation

use super::ids::TrackId;
use super::track::Track;
use crate::error::{CoreError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Ordered, non-empty sequence of tracks
///
/// The length is fixed at construction. Every index handed out by
/// [`Playlist::next_index`] and [`Playlist::previous_index`] is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist
    ///
    /// Fails on an empty list or when two tracks share an id.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CoreError::EmptyPlaylist);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(&track.id) {
                return Err(CoreError::DuplicateTrack(track.id.clone()));
            }
        }

        Ok(Self { tracks })
    }

    /// Number of tracks (always >= 1)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Position of the track with `id`
    pub fn index_of(&self, id: &TrackId) -> Result<usize> {
        self.tracks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| CoreError::TrackNotFound(id.clone()))
    }

    /// Index after `index`, wrapping from the last track to the first
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Index before `index`, wrapping from the first track to the last
    pub fn previous_index(&self, index: usize) -> usize {
        let len = self.tracks.len();
        (index % len + len - 1) % len
    }

    /// Iterate tracks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// All tracks as a slice
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
