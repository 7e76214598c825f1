//! Playlist view model
//!
//! Derives what the track list and the player bar display from the session.
//! Holds no state of its own; selection goes back through
//! `PlaybackController::select_track`.

use joyful_core::{Playlist, TrackId};
use serde::Serialize;

/// One row of the track list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRow {
    pub id: TrackId,

    /// 1-based position, zero-padded to two digits ("01")
    pub number: String,

    pub title: String,
    pub artist: String,
    pub display_duration: String,
    pub is_current: bool,

    /// Current and playing: the row shows the animated equalizer instead of
    /// its number
    pub show_equalizer: bool,
}

/// Build the rows for `playlist`
pub fn track_rows(playlist: &Playlist, current_index: usize, is_playing: bool) -> Vec<TrackRow> {
    playlist
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let is_current = index == current_index;
            TrackRow {
                id: track.id.clone(),
                number: format!("{:02}", index + 1),
                title: track.title.clone(),
                artist: track.artist.clone(),
                display_duration: track.display_duration.clone(),
                is_current,
                show_equalizer: is_current && is_playing,
            }
        })
        .collect()
}

/// Header label such as "3 Songs"
pub fn track_count_label(count: usize) -> String {
    if count == 1 {
        "1 Song".to_string()
    } else {
        format!("{} Songs", count)
    }
}

/// Elapsed share of the track, 0-100
///
/// Unknown or zero duration reads as 0.
pub fn progress_percent(position: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(duration) if duration > 0.0 && position.is_finite() => {
            (position / duration * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}
