//! Media engine seam
//!
//! The engine decodes and outputs audio. The controller owns exactly one
//! engine and is the only caller of these methods. Browser builds implement
//! this over `HTMLAudioElement` (see the `wasm` feature); tests use a
//! recording fake.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying one `load` request
///
/// Every load bumps the generation. Notifications carry the generation that
/// was current when the engine produced them, so late events from a
/// superseded source can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    /// Generation of the track cued at construction
    pub const FIRST: Self = Self(1);

    /// Wrap a raw value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The generation after this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the engine is reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEventKind {
    /// Periodic position report, in seconds
    TimeUpdate(f64),

    /// Duration became known, in seconds (once per load)
    LoadedMetadata(f64),

    /// Playback reached the end of the source (once per load)
    Ended,

    /// The source failed to load or the play request was refused
    Failed(String),
}

/// Engine notification tagged with its load generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub generation: LoadGeneration,
    pub kind: EngineEventKind,
}

impl EngineEvent {
    /// Position report
    pub fn time_update(generation: LoadGeneration, seconds: f64) -> Self {
        Self {
            generation,
            kind: EngineEventKind::TimeUpdate(seconds),
        }
    }

    /// Duration report
    pub fn loaded_metadata(generation: LoadGeneration, seconds: f64) -> Self {
        Self {
            generation,
            kind: EngineEventKind::LoadedMetadata(seconds),
        }
    }

    /// End-of-source report
    pub fn ended(generation: LoadGeneration) -> Self {
        Self {
            generation,
            kind: EngineEventKind::Ended,
        }
    }

    /// Failure report
    pub fn failed(generation: LoadGeneration, message: impl Into<String>) -> Self {
        Self {
            generation,
            kind: EngineEventKind::Failed(message.into()),
        }
    }
}

/// Platform media engine
///
/// Commands are fire-and-forget: loading may complete asynchronously and
/// report back through [`EngineEvent`]s delivered to
/// `PlaybackController::handle_engine_event`.
pub trait MediaEngine {
    /// Begin loading a new source
    ///
    /// Invalidates every in-flight notification of the previous source.
    /// Notifications for this source must carry `generation`.
    fn load(&mut self, source: &str, generation: LoadGeneration) -> Result<()>;

    /// Start or resume output (idempotent)
    ///
    /// An `Err` here, or a later `Failed` event, means the engine is not
    /// advancing even though playback was requested.
    fn play(&mut self) -> Result<()>;

    /// Pause output (idempotent)
    fn pause(&mut self);

    /// Jump to `seconds` in the current source
    fn set_current_time(&mut self, seconds: f64);

    /// Apply output gain, `volume` in 0.0-1.0
    fn set_volume(&mut self, volume: f64);

    /// Engine's own playback position in seconds
    ///
    /// May be NaN before metadata is available.
    fn current_time(&self) -> f64;
}

/// Engine that records commands without producing sound
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub loads: Vec<(String, LoadGeneration)>,
    pub playing: bool,
    pub current_time: f64,
    pub volume: f64,
    pub fail_play: bool,
}

#[cfg(test)]
impl MediaEngine for RecordingEngine {
    fn load(&mut self, source: &str, generation: LoadGeneration) -> Result<()> {
        self.loads.push((source.to_string(), generation));
        self.playing = false;
        self.current_time = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.fail_play {
            return Err(crate::error::PlaybackError::EngineLoadFailure(
                "autoplay blocked".to_string(),
            ));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }
}
