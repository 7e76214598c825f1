//! Joyful Notes - Playback Control
//!
//! Platform-agnostic playback state machine and scrub controls for a fixed
//! playlist.
//!
//! This crate provides:
//! - Track selection with play/pause toggle on the current track
//! - Next/previous with wrap-around and a restart threshold
//! - Seek and volume with clamping
//! - Stale engine notification filtering (load generations)
//! - Drag-to-value scrub bars for progress and volume
//! - Event queue and snapshots for UI synchronization
//!
//! # Architecture
//!
//! `joyful-playback` never touches audio itself. The platform supplies a
//! [`MediaEngine`]; the controller owns it and is the only component that
//! calls it. With the `wasm` feature, [`wasm::WasmPlayer`] binds the
//! controller to an `HTMLAudioElement` and document pointer events.
//!
//! # Example
//!
//! ```rust
//! use joyful_core::{Playlist, Track, TrackId};
//! use joyful_playback::{
//!     EngineEvent, LoadGeneration, MediaEngine, PlaybackConfig, PlaybackController, Result,
//!     ScrubKind, TrackBounds,
//! };
//!
//! // Implement MediaEngine for your platform
//! #[derive(Default)]
//! struct SilentEngine {
//!     time: f64,
//! }
//!
//! impl MediaEngine for SilentEngine {
//!     fn load(&mut self, _source: &str, _generation: LoadGeneration) -> Result<()> {
//!         self.time = 0.0;
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn set_current_time(&mut self, seconds: f64) {
//!         self.time = seconds;
//!     }
//!     fn set_volume(&mut self, _volume: f64) {}
//!     fn current_time(&self) -> f64 {
//!         self.time
//!     }
//! }
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("a", "Silent Night", "Choir", "/audio/a.mp3"),
//!     Track::new("b", "Joy to the World", "Band", "/audio/b.mp3"),
//! ])?;
//!
//! let mut player = PlaybackController::new(playlist, SilentEngine::default(), PlaybackConfig::default())?;
//!
//! player.select_track(&TrackId::new("b"))?;
//! assert!(player.is_playing());
//!
//! // Engine reports duration for the current load
//! let generation = player.generation();
//! player.handle_engine_event(EngineEvent::loaded_metadata(generation, 200.0));
//!
//! // Drag the progress bar to its middle
//! let bar = TrackBounds::new(0.0, 400.0);
//! player.begin_scrub(ScrubKind::Progress, 200.0, bar);
//! player.end_scrub(ScrubKind::Progress);
//! assert_eq!(player.position(), 100.0);
//! # Ok::<(), joyful_playback::PlaybackError>(())
//! ```

mod controller;
mod engine;
mod error;
mod events;
mod scrub;
pub mod types;
pub mod view;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use controller::PlaybackController;
pub use engine::{EngineEvent, EngineEventKind, LoadGeneration, MediaEngine};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use scrub::{CaptureGuard, DragCapture, PointerInput, ScrubTrack, TrackBounds};
pub use types::{PlaybackConfig, PlaybackSnapshot, PlaybackState, ScrubKind};
pub use view::TrackRow;
pub use volume::Volume;
