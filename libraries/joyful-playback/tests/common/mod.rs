//! Shared test infrastructure for joyful-playback integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use joyful_core::{Playlist, Track};
use joyful_playback::{
    LoadGeneration, MediaEngine, PlaybackConfig, PlaybackController, PlaybackError, Result,
};

static INIT: Once = Once::new();

/// Route controller logs to the test output
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// What the mock engine has been told to do
#[derive(Debug, Default)]
pub struct EngineState {
    pub loads: Vec<(String, LoadGeneration)>,
    pub playing: bool,
    pub current_time: f64,
    pub volume: f64,
    pub play_calls: usize,
    pub seeks: Vec<f64>,
    pub refuse_play: bool,
    pub refuse_load: bool,
}

/// Engine whose state stays inspectable after the controller takes it
#[derive(Clone, Default)]
pub struct MockEngine {
    state: Rc<RefCell<EngineState>>,
}

impl MockEngine {
    pub fn new() -> (Self, Rc<RefCell<EngineState>>) {
        let engine = Self::default();
        let state = engine.state.clone();
        (engine, state)
    }
}

impl MediaEngine for MockEngine {
    fn load(&mut self, source: &str, generation: LoadGeneration) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.refuse_load {
            return Err(PlaybackError::EngineLoadFailure(format!("cannot load {source}")));
        }
        state.loads.push((source.to_string(), generation));
        state.current_time = 0.0;
        state.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.play_calls += 1;
        if state.refuse_play {
            return Err(PlaybackError::EngineLoadFailure("play() refused".to_string()));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.current_time = seconds;
        state.seeks.push(seconds);
    }

    fn set_volume(&mut self, volume: f64) {
        self.state.borrow_mut().volume = volume;
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }
}

pub fn track(id: &str) -> Track {
    Track::new(id, format!("Track {id}"), "Test Artist", format!("/audio/{id}.mp3"))
        .with_display_duration("3:00")
}

/// Playlist of one track per id
pub fn playlist(ids: &[&str]) -> Playlist {
    Playlist::new(ids.iter().map(|id| track(id)).collect()).expect("valid playlist")
}

/// Controller over `ids` with default config
pub fn controller(ids: &[&str]) -> (PlaybackController<MockEngine>, Rc<RefCell<EngineState>>) {
    init_logging();
    let (engine, state) = MockEngine::new();
    let controller = PlaybackController::new(playlist(ids), engine, PlaybackConfig::default())
        .expect("controller");
    (controller, state)
}
