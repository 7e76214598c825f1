//! Playback controller - core orchestration
//!
//! Single source of truth for what should be playing, where, and how loud.
//! Owns the media engine and routes every engine command through here.

use joyful_core::{Playlist, Track, TrackId};
use tracing::{debug, trace, warn};

use crate::{
    engine::{EngineEvent, EngineEventKind, LoadGeneration, MediaEngine},
    error::{PlaybackError, Result},
    events::{EventQueue, PlaybackEvent},
    scrub::{DragCapture, ScrubTrack, TrackBounds},
    types::{PlaybackConfig, PlaybackSnapshot, PlaybackState, ScrubKind},
    view::{self, TrackRow},
    volume::{clamp_unit, Volume},
};

/// Central playback management
///
/// Orchestrates:
/// - Track selection with play/pause toggle on the current track
/// - Next/previous with wrap-around and restart threshold
/// - Seek and volume with clamping
/// - Engine notifications, discarding those from superseded loads
/// - Progress and volume scrub drags
///
/// Engine failures never surface as `Err`. They are logged, queued as
/// [`PlaybackEvent::Error`] and kept in [`PlaybackController::last_error`]
/// while the requested state stays as it was.
pub struct PlaybackController<E: MediaEngine> {
    // Session
    playlist: Playlist,
    current_index: usize,
    state: PlaybackState,
    is_playing: bool,
    position: f64,
    duration: Option<f64>,
    volume: Volume,

    // Engine
    engine: E,
    generation: LoadGeneration,

    // Scrub controls
    progress_scrub: ScrubTrack,
    volume_scrub: ScrubTrack,

    config: PlaybackConfig,
    events: EventQueue,
    last_error: Option<PlaybackError>,
}

impl<E: MediaEngine> PlaybackController<E> {
    /// Create a controller with the first track cued
    ///
    /// The first track is loaded into the engine but not started.
    pub fn new(playlist: Playlist, engine: E, config: PlaybackConfig) -> Result<Self> {
        config.validate()?;

        let mut controller = Self {
            playlist,
            current_index: 0,
            state: PlaybackState::Idle,
            is_playing: false,
            position: 0.0,
            duration: None,
            volume: Volume::new(config.initial_volume),
            engine,
            generation: LoadGeneration::FIRST,
            progress_scrub: ScrubTrack::new(ScrubKind::Progress),
            volume_scrub: ScrubTrack::new(ScrubKind::Volume),
            config,
            events: EventQueue::default(),
            last_error: None,
        };

        controller.engine.set_volume(controller.volume.level());
        controller.load_current();

        Ok(controller)
    }

    // ===== Playback Control =====

    /// Select a track by id
    ///
    /// Selecting the current track toggles play/pause. Any other track is
    /// loaded from the start and played.
    pub fn select_track(&mut self, id: &TrackId) -> Result<()> {
        let index = self
            .playlist
            .index_of(id)
            .map_err(|_| PlaybackError::UnknownTrack(id.clone()))?;
        self.select_index(index)
    }

    /// Select a track by playlist position
    pub fn select_index(&mut self, index: usize) -> Result<()> {
        if index >= self.playlist.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }

        if index == self.current_index {
            self.toggle_play();
        } else {
            self.switch_to(index);
        }
        Ok(())
    }

    /// Flip between playing and paused
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Start or resume the current track
    pub fn play(&mut self) {
        self.is_playing = true;
        self.start_engine();
    }

    /// Pause the current track
    pub fn pause(&mut self) {
        self.is_playing = false;
        self.engine.pause();
        if self.state != PlaybackState::Idle {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Skip to the next track, wrapping from last to first
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let index = self.playlist.next_index(self.current_index);
        self.switch_to(index);
    }

    /// Go to previous track
    ///
    /// Past the restart threshold, rewinds the current track instead.
    /// Otherwise moves back one track, wrapping from first to last.
    pub fn prev(&mut self) {
        let position = self.engine_position();
        if position > self.config.restart_threshold_secs {
            debug!(position, "previous within track: restarting");
            self.seek(0.0);
            return;
        }

        let index = self.playlist.previous_index(self.current_index);
        self.switch_to(index);
    }

    // ===== Seek =====

    /// Seek to `target` seconds
    ///
    /// Clamps into the track. Position updates immediately without waiting
    /// for the engine. Non-finite targets are ignored.
    pub fn seek(&mut self, target: f64) {
        if !target.is_finite() {
            debug!(target, "ignoring non-finite seek target");
            return;
        }

        let position = match self.duration {
            Some(duration) => target.clamp(0.0, duration),
            None => target.max(0.0),
        };

        self.engine.set_current_time(position);
        self.set_position(position);
    }

    /// Seek to a fraction (0.0-1.0) of the track
    ///
    /// No-op while the duration is unknown.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let Some(fraction) = clamp_unit(fraction) else {
            debug!(fraction, "ignoring non-finite seek fraction");
            return;
        };

        match self.duration {
            Some(duration) => self.seek(fraction * duration),
            None => trace!(fraction, "duration unknown, seek skipped"),
        }
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0), clamping out-of-range values
    pub fn set_volume(&mut self, level: f64) {
        if !self.volume.set_level(level) {
            debug!(level, "ignoring non-finite volume");
            return;
        }

        let level = self.volume.level();
        self.engine.set_volume(level);
        self.events.push(PlaybackEvent::VolumeChanged { volume: level });
    }

    // ===== Engine Notifications =====

    /// Apply an engine notification
    ///
    /// Notifications from an earlier load generation are discarded.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        if event.generation != self.generation {
            trace!(
                stale = %event.generation,
                current = %self.generation,
                "discarding stale engine notification"
            );
            return;
        }

        match event.kind {
            EngineEventKind::TimeUpdate(seconds) => self.on_time_update(seconds),
            EngineEventKind::LoadedMetadata(seconds) => self.on_duration_known(seconds),
            EngineEventKind::Ended => self.on_ended(),
            EngineEventKind::Failed(message) => {
                self.record_engine_failure(PlaybackError::EngineLoadFailure(message));
            }
        }
    }

    fn on_time_update(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }

        let position = match self.duration {
            Some(duration) => seconds.clamp(0.0, duration),
            None => seconds.max(0.0),
        };
        self.set_position(position);
    }

    fn on_duration_known(&mut self, seconds: f64) {
        // Live streams report an infinite duration
        if !seconds.is_finite() || seconds < 0.0 {
            debug!(seconds, "engine reported unusable duration");
            return;
        }

        self.duration = Some(seconds);
        self.events.push(PlaybackEvent::DurationChanged {
            duration: self.duration,
        });

        if self.position > seconds {
            self.set_position(seconds);
        }
    }

    fn on_ended(&mut self) {
        if self.state != PlaybackState::Playing {
            debug!(state = ?self.state, "ignoring end of track outside playback");
            return;
        }

        debug!("track ended, advancing");
        self.next();
    }

    // ===== Scrub =====

    /// Press on a scrub bar
    ///
    /// Commits the value under the pointer immediately. Ends a drag still
    /// running on the other bar.
    pub fn begin_scrub(&mut self, kind: ScrubKind, pointer_x: f64, bounds: TrackBounds) {
        self.end_other_scrub(kind);
        let value = self.scrub_mut(kind).begin(pointer_x, bounds);
        self.events.push(PlaybackEvent::ScrubStarted { kind });
        self.apply_scrub(kind, value);
    }

    /// Press on a scrub bar, holding document-level listeners until release
    pub fn begin_scrub_captured(
        &mut self,
        kind: ScrubKind,
        pointer_x: f64,
        bounds: TrackBounds,
        capture: Box<dyn DragCapture>,
    ) {
        self.end_other_scrub(kind);
        let value = self.scrub_mut(kind).begin_captured(pointer_x, bounds, capture);
        self.events.push(PlaybackEvent::ScrubStarted { kind });
        self.apply_scrub(kind, value);
    }

    /// Pointer moved during a drag
    ///
    /// Ignored when `kind` is not being dragged.
    pub fn update_scrub(&mut self, kind: ScrubKind, pointer_x: f64, bounds: TrackBounds) {
        if let Some(value) = self.scrub_mut(kind).update(pointer_x, bounds) {
            self.apply_scrub(kind, value);
        }
    }

    /// Pointer released
    pub fn end_scrub(&mut self, kind: ScrubKind) {
        if self.scrub_mut(kind).end() {
            self.events.push(PlaybackEvent::ScrubEnded { kind });
        }
    }

    /// Whether `kind` is being dragged
    pub fn is_scrubbing(&self, kind: ScrubKind) -> bool {
        self.scrub(kind).is_active()
    }

    fn scrub(&self, kind: ScrubKind) -> &ScrubTrack {
        match kind {
            ScrubKind::Progress => &self.progress_scrub,
            ScrubKind::Volume => &self.volume_scrub,
        }
    }

    fn scrub_mut(&mut self, kind: ScrubKind) -> &mut ScrubTrack {
        match kind {
            ScrubKind::Progress => &mut self.progress_scrub,
            ScrubKind::Volume => &mut self.volume_scrub,
        }
    }

    fn end_other_scrub(&mut self, kind: ScrubKind) {
        let other = match kind {
            ScrubKind::Progress => ScrubKind::Volume,
            ScrubKind::Volume => ScrubKind::Progress,
        };
        self.end_scrub(other);
    }

    fn apply_scrub(&mut self, kind: ScrubKind, value: f64) {
        match kind {
            ScrubKind::Progress => self.seek_fraction(value),
            ScrubKind::Volume => self.set_volume(value),
        }
    }

    // ===== State Queries =====

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether playback is requested
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current_index)
    }

    /// Index of the current track
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Elapsed seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Track length in seconds, once known
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Volume (0.0-1.0)
    pub fn volume(&self) -> f64 {
        self.volume.level()
    }

    /// Generation of the most recent load
    pub fn generation(&self) -> LoadGeneration {
        self.generation
    }

    /// The playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Active configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Read-only access to the engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Most recent engine failure, if any
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    /// Everything the UI renders, in one value
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_track: self.current_track().cloned(),
            state: self.state,
            is_playing: self.is_playing,
            position: self.position,
            duration: self.duration,
            volume: self.volume.level(),
            progress_percent: view::progress_percent(self.position, self.duration),
        }
    }

    /// Track list rows for the current session
    pub fn track_rows(&self) -> Vec<TrackRow> {
        view::track_rows(&self.playlist, self.current_index, self.is_playing)
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns everything emitted since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // ===== Internals =====

    /// Load `index` from the start and play it
    fn switch_to(&mut self, index: usize) {
        let previous_track_id = self.current_track().map(|t| t.id.clone());

        self.engine.pause();
        self.current_index = index;
        self.generation = self.generation.next();
        self.set_state(PlaybackState::Loading);

        if let Some(track_id) = self.current_track().map(|t| t.id.clone()) {
            self.events.push(PlaybackEvent::TrackChanged {
                track_id,
                previous_track_id,
            });
        }

        self.set_position(0.0);
        self.duration = None;
        self.events.push(PlaybackEvent::DurationChanged { duration: None });

        self.load_current();
        self.play();
    }

    fn load_current(&mut self) {
        let Some(source) = self.current_track().map(|t| t.source.clone()) else {
            return;
        };

        debug!(index = self.current_index, generation = %self.generation, %source, "loading track");
        if let Err(err) = self.engine.load(&source, self.generation) {
            self.record_engine_failure(err);
        }
    }

    /// Command play and move to `Playing` without waiting for the engine
    fn start_engine(&mut self) {
        if let Err(err) = self.engine.play() {
            self.record_engine_failure(err);
        }
        self.set_state(PlaybackState::Playing);
    }

    fn engine_position(&self) -> f64 {
        let position = self.engine.current_time();
        if position.is_finite() {
            position
        } else {
            self.position
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "playback state");
            self.state = state;
            self.events.push(PlaybackEvent::StateChanged { state });
        }
    }

    fn set_position(&mut self, position: f64) {
        self.position = position;
        self.events.push(PlaybackEvent::PositionChanged { position });
    }

    fn record_engine_failure(&mut self, err: PlaybackError) {
        warn!(track = ?self.current_track().map(|t| t.id.as_str()), "playback failed: {}", err);
        self.events.push(PlaybackEvent::Error {
            message: err.to_string(),
        });
        self.last_error = Some(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecordingEngine;

    fn playlist() -> Playlist {
        Playlist::new(vec![
            Track::new("a", "Track A", "Artist", "/a.mp3"),
            Track::new("b", "Track B", "Artist", "/b.mp3"),
            Track::new("c", "Track C", "Artist", "/c.mp3"),
        ])
        .unwrap()
    }

    fn controller() -> PlaybackController<RecordingEngine> {
        PlaybackController::new(playlist(), RecordingEngine::default(), PlaybackConfig::default())
            .unwrap()
    }

    #[test]
    fn create_controller() {
        let controller = controller();

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.is_playing());
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.volume(), 0.8);
        assert_eq!(controller.engine().volume, 0.8);
        assert_eq!(
            controller.engine().loads,
            vec![("/a.mp3".to_string(), LoadGeneration::FIRST)]
        );
    }

    #[test]
    fn rejects_invalid_config() {
        let config = PlaybackConfig {
            initial_volume: 2.0,
            ..Default::default()
        };
        let result = PlaybackController::new(playlist(), RecordingEngine::default(), config);

        assert!(matches!(result, Err(PlaybackError::InvalidConfig(_))));
    }

    #[test]
    fn toggle_from_idle_plays_cued_track() {
        let mut controller = controller();

        controller.toggle_play();
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert!(controller.engine().playing);
        assert_eq!(controller.engine().loads.len(), 1);

        controller.toggle_play();
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert!(!controller.engine().playing);
    }

    #[test]
    fn selecting_other_track_loads_and_plays() {
        let mut controller = controller();

        controller.select_track(&TrackId::new("c")).unwrap();

        assert_eq!(controller.current_index(), 2);
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert!(controller.is_playing());
        assert_eq!(controller.position(), 0.0);
        assert_eq!(controller.duration(), None);
        assert_eq!(controller.engine().loads.last().unwrap().0, "/c.mp3");
        assert_eq!(controller.generation(), LoadGeneration::FIRST.next());
    }

    #[test]
    fn unknown_track_is_an_error() {
        let mut controller = controller();

        let err = controller.select_track(&TrackId::new("zzz")).unwrap_err();
        assert_eq!(err, PlaybackError::UnknownTrack(TrackId::new("zzz")));
        assert_eq!(
            controller.select_index(9).unwrap_err(),
            PlaybackError::IndexOutOfBounds(9)
        );
    }

    #[test]
    fn track_change_emits_events_in_order() {
        let mut controller = controller();
        controller.drain_events();

        controller.next();
        let events = controller.drain_events();

        assert_eq!(
            events.first(),
            Some(&PlaybackEvent::StateChanged {
                state: PlaybackState::Loading
            })
        );
        assert!(events.contains(&PlaybackEvent::TrackChanged {
            track_id: TrackId::new("b"),
            previous_track_id: Some(TrackId::new("a")),
        }));
        assert_eq!(
            events.last(),
            Some(&PlaybackEvent::StateChanged {
                state: PlaybackState::Playing
            })
        );
    }

    #[test]
    fn play_failure_is_recorded_not_returned() {
        let engine = RecordingEngine {
            fail_play: true,
            ..Default::default()
        };
        let mut controller =
            PlaybackController::new(playlist(), engine, PlaybackConfig::default()).unwrap();

        controller.select_track(&TrackId::new("b")).unwrap();

        assert!(controller.is_playing());
        assert!(matches!(
            controller.last_error(),
            Some(PlaybackError::EngineLoadFailure(_))
        ));
        assert!(controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. })));
    }

    #[test]
    fn ended_only_advances_while_playing() {
        let mut controller = controller();
        let generation = controller.generation();

        controller.handle_engine_event(EngineEvent::ended(generation));
        assert_eq!(controller.current_index(), 0);

        controller.play();
        controller.handle_engine_event(EngineEvent::ended(generation));
        assert_eq!(controller.current_index(), 1);
        assert!(controller.is_playing());
    }

    #[test]
    fn metadata_clamps_overshooting_position() {
        let mut controller = controller();
        let generation = controller.generation();

        controller.handle_engine_event(EngineEvent::time_update(generation, 50.0));
        controller.handle_engine_event(EngineEvent::loaded_metadata(generation, 30.0));

        assert_eq!(controller.duration(), Some(30.0));
        assert_eq!(controller.position(), 30.0);
    }

    #[test]
    fn infinite_duration_stays_unknown() {
        let mut controller = controller();
        let generation = controller.generation();

        controller.handle_engine_event(EngineEvent::loaded_metadata(generation, f64::INFINITY));
        assert_eq!(controller.duration(), None);
    }

    #[test]
    fn seek_without_duration_only_floors() {
        let mut controller = controller();

        controller.seek(42.0);
        assert_eq!(controller.position(), 42.0);

        controller.seek(-1.0);
        assert_eq!(controller.position(), 0.0);

        controller.seek(f64::NAN);
        assert_eq!(controller.position(), 0.0);
    }

    #[test]
    fn progress_scrub_waits_for_duration() {
        let mut controller = controller();
        let bounds = TrackBounds::new(0.0, 100.0);

        controller.begin_scrub(ScrubKind::Progress, 50.0, bounds);
        assert_eq!(controller.position(), 0.0);
        assert_eq!(controller.engine().current_time, 0.0);

        let generation = controller.generation();
        controller.handle_engine_event(EngineEvent::loaded_metadata(generation, 200.0));
        controller.update_scrub(ScrubKind::Progress, 25.0, bounds);
        assert_eq!(controller.position(), 50.0);
        assert_eq!(controller.engine().current_time, 50.0);
    }

    #[test]
    fn starting_one_scrub_ends_the_other() {
        let mut controller = controller();
        let bounds = TrackBounds::new(0.0, 100.0);

        controller.begin_scrub(ScrubKind::Volume, 10.0, bounds);
        assert!(controller.is_scrubbing(ScrubKind::Volume));

        controller.begin_scrub(ScrubKind::Progress, 10.0, bounds);
        assert!(controller.is_scrubbing(ScrubKind::Progress));
        assert!(!controller.is_scrubbing(ScrubKind::Volume));

        // The volume bar no longer follows the pointer
        controller.update_scrub(ScrubKind::Volume, 90.0, bounds);
        assert_eq!(controller.volume(), 0.1);
    }

    #[test]
    fn snapshot_reflects_session() {
        let mut controller = controller();
        let generation = controller.generation();
        controller.handle_engine_event(EngineEvent::loaded_metadata(generation, 100.0));
        controller.handle_engine_event(EngineEvent::time_update(generation, 25.0));

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.current_track.map(|t| t.id), Some(TrackId::new("a")));
        assert_eq!(snapshot.progress_percent, 25.0);
        assert_eq!(snapshot.duration, Some(100.0));
        assert!(!snapshot.is_playing);
    }
}
