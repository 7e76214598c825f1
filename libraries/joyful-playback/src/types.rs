//! Core types for playback management

use joyful_core::Track;
use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// First track cued, never started
    Idle,

    /// Engine instructed to load a new track
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Which scrub control a pointer gesture targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrubKind {
    /// Time-seek bar
    Progress,

    /// Volume bar
    Volume,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.8)
    pub initial_volume: f64,

    /// Seconds into a track after which "previous" restarts it instead of
    /// moving back (default: 3.0)
    pub restart_threshold_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: 0.8,
            restart_threshold_secs: 3.0,
        }
    }
}

impl PlaybackConfig {
    /// Reject values the controller cannot honour
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "initial_volume must be within 0.0..=1.0, got {}",
                self.initial_volume
            )));
        }

        if !self.restart_threshold_secs.is_finite() || self.restart_threshold_secs < 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "restart_threshold_secs must be a non-negative number, got {}",
                self.restart_threshold_secs
            )));
        }

        Ok(())
    }
}

/// Read-only view of the session for the UI layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub current_track: Option<Track>,
    pub state: PlaybackState,
    pub is_playing: bool,

    /// Elapsed seconds
    pub position: f64,

    /// Total seconds, `None` until the engine reports metadata
    pub duration: Option<f64>,

    /// Volume (0.0-1.0)
    pub volume: f64,

    /// Elapsed share of the track (0-100)
    pub progress_percent: f64,
}
