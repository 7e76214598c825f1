//! JavaScript-facing player

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use joyful_core::{Playlist, Track, TrackId};
use wasm_bindgen::prelude::*;

use super::engine::{EngineSink, HtmlAudioEngine};
use super::listeners::DocumentDragListeners;
use super::logging;
use crate::{
    view, PlaybackConfig, PlaybackController, PlaybackError, PlaybackEvent, ScrubKind,
    TrackBounds,
};

type SharedController = Rc<RefCell<PlaybackController<HtmlAudioEngine>>>;

/// Registered JavaScript observers
#[derive(Default)]
struct Callbacks {
    on_change: RefCell<Option<Function>>,
    on_error: RefCell<Option<Function>>,
}

impl Callbacks {
    fn emit_change(&self, snapshot: &JsValue) {
        let callback = self.on_change.borrow().clone();
        if let Some(cb) = callback {
            cb.call1(&JsValue::NULL, snapshot).ok();
        }
    }

    fn emit_error(&self, message: &str) {
        let callback = self.on_error.borrow().clone();
        if let Some(cb) = callback {
            cb.call1(&JsValue::NULL, &JsValue::from_str(message)).ok();
        }
    }
}

/// WASM-compatible audio player
///
/// Owns the playback controller and its `HTMLAudioElement`. Engine and
/// drag notifications reach the controller through weak handles, so
/// dropping the player (`free()` from JavaScript) tears everything down.
#[wasm_bindgen]
pub struct WasmPlayer {
    controller: SharedController,
    callbacks: Rc<Callbacks>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player for `tracks` and cue the first one
    ///
    /// `tracks` is an array of `{ id, title, artist, cover?, url, duration? }`.
    /// `config` is optional: `{ initialVolume?, restartThresholdSecs? }`.
    #[wasm_bindgen(constructor)]
    pub fn new(tracks: JsValue, config: JsValue) -> Result<WasmPlayer, JsValue> {
        logging::init();

        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Invalid tracks: {e}")))?;
        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };

        let playlist = Playlist::new(tracks).map_err(|e| to_js(e.into()))?;
        let sink = EngineSink::default();
        let engine = HtmlAudioEngine::new(sink.clone())?;
        let controller = PlaybackController::new(playlist, engine, config).map_err(to_js)?;

        let controller = Rc::new(RefCell::new(controller));
        let callbacks = Rc::new(Callbacks::default());

        {
            let weak = Rc::downgrade(&controller);
            let callbacks = callbacks.clone();
            sink.connect(move |event| {
                with_controller(&weak, &callbacks, |c| c.handle_engine_event(event));
            });
        }

        tracing::info!(
            tracks = controller.borrow().playlist().len(),
            "player ready"
        );

        Ok(Self {
            controller,
            callbacks,
        })
    }

    // ===== Playback Control =====

    /// Select a track by id: toggles when it is already current
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&self, id: &str) -> Result<(), JsValue> {
        let result = self
            .controller
            .borrow_mut()
            .select_track(&TrackId::new(id));
        self.notify();
        result.map_err(|e| self.handle_error(e))
    }

    /// Play or pause the current track
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&self) {
        self.controller.borrow_mut().toggle_play();
        self.notify();
    }

    /// Skip to the next track (wraps)
    pub fn next(&self) {
        self.controller.borrow_mut().next();
        self.notify();
    }

    /// Restart the track, or go back one when near its start
    pub fn prev(&self) {
        self.controller.borrow_mut().prev();
        self.notify();
    }

    /// Seek to a position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&self, seconds: f64) {
        self.controller.borrow_mut().seek(seconds);
        self.notify();
    }

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f64) {
        self.controller.borrow_mut().set_volume(level);
        self.notify();
    }

    // ===== Scrub =====

    /// Press on a scrub bar
    ///
    /// `kind` is `"progress"` or `"volume"`; `left` and `width` are the bar's
    /// client rectangle. Moves and the release are then tracked on the
    /// document until the pointer is let go.
    #[wasm_bindgen(js_name = beginScrub)]
    pub fn begin_scrub(&self, kind: &str, client_x: f64, left: f64, width: f64) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        let bounds = TrackBounds::new(left, width);
        let capture = self.document_capture(kind, bounds)?;

        self.controller
            .borrow_mut()
            .begin_scrub_captured(kind, client_x, bounds, Box::new(capture));
        self.notify();
        Ok(())
    }

    /// Move an active drag (for hosts that track pointer events themselves)
    #[wasm_bindgen(js_name = updateScrub)]
    pub fn update_scrub(&self, kind: &str, client_x: f64, left: f64, width: f64) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        self.controller
            .borrow_mut()
            .update_scrub(kind, client_x, TrackBounds::new(left, width));
        self.notify();
        Ok(())
    }

    /// Release a drag
    #[wasm_bindgen(js_name = endScrub)]
    pub fn end_scrub(&self, kind: &str) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        self.controller.borrow_mut().end_scrub(kind);
        self.notify();
        Ok(())
    }

    // ===== State Queries =====

    /// Current session as `{ currentTrack, state, isPlaying, position, ... }`
    pub fn snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.controller.borrow().snapshot()).unwrap_or(JsValue::NULL)
    }

    /// Track list rows
    #[wasm_bindgen(js_name = trackRows)]
    pub fn track_rows(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.controller.borrow().track_rows()).unwrap_or(JsValue::NULL)
    }

    /// Header label, e.g. "12 Songs"
    #[wasm_bindgen(js_name = trackCountLabel)]
    pub fn track_count_label(&self) -> String {
        view::track_count_label(self.controller.borrow().playlist().len())
    }

    /// Format seconds as m:ss
    #[wasm_bindgen(js_name = formatTime)]
    pub fn format_time(seconds: f64) -> String {
        joyful_core::format_time(seconds)
    }

    // ===== Event Callbacks =====

    /// Called with a fresh snapshot whenever the session changes
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Function) {
        *self.callbacks.on_change.borrow_mut() = Some(callback);
    }

    /// Called with a message when the engine reports a failure
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: Function) {
        *self.callbacks.on_error.borrow_mut() = Some(callback);
    }
}

impl WasmPlayer {
    fn notify(&self) {
        notify(&self.controller, &self.callbacks);
    }

    fn handle_error(&self, error: PlaybackError) -> JsValue {
        let message = error.to_string();
        self.callbacks.emit_error(&message);
        JsValue::from_str(&message)
    }

    fn document_capture(
        &self,
        kind: ScrubKind,
        bounds: TrackBounds,
    ) -> Result<DocumentDragListeners, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let weak = Rc::downgrade(&self.controller);
        let on_move = {
            let weak = weak.clone();
            let callbacks = self.callbacks.clone();
            move |x: f64| with_controller(&weak, &callbacks, |c| c.update_scrub(kind, x, bounds))
        };
        let on_release = {
            let callbacks = self.callbacks.clone();
            move || with_controller(&weak, &callbacks, |c| c.end_scrub(kind))
        };

        DocumentDragListeners::attach(&document, on_move, on_release)
    }
}

/// Run `f` against a live controller, then publish what changed
///
/// Does nothing once the player is gone. A notification arriving while a
/// command holds the controller is dropped.
fn with_controller(
    weak: &Weak<RefCell<PlaybackController<HtmlAudioEngine>>>,
    callbacks: &Callbacks,
    f: impl FnOnce(&mut PlaybackController<HtmlAudioEngine>),
) {
    let Some(controller) = weak.upgrade() else {
        return;
    };

    match controller.try_borrow_mut() {
        Ok(mut guard) => f(&mut guard),
        Err(_) => {
            tracing::warn!("controller busy, dropping notification");
            return;
        }
    }

    notify(&controller, callbacks);
}

fn notify(controller: &SharedController, callbacks: &Callbacks) {
    let (events, snapshot) = {
        let mut controller = controller.borrow_mut();
        (controller.drain_events(), controller.snapshot())
    };

    if events.is_empty() {
        return;
    }

    for event in &events {
        if let PlaybackEvent::Error { message } = event {
            callbacks.emit_error(message);
        }
    }

    if let Ok(snapshot) = serde_wasm_bindgen::to_value(&snapshot) {
        callbacks.emit_change(&snapshot);
    }
}

fn parse_kind(kind: &str) -> Result<ScrubKind, JsValue> {
    match kind {
        "progress" => Ok(ScrubKind::Progress),
        "volume" => Ok(ScrubKind::Volume),
        other => Err(JsValue::from_str(&format!("Unknown scrub control: {other}"))),
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
