//! `HTMLAudioElement` media engine

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlAudioElement};

use super::listeners::Listener;
use crate::engine::{EngineEvent, LoadGeneration, MediaEngine};
use crate::error::{PlaybackError, Result};

type Handler = Box<dyn Fn(EngineEvent)>;

/// Late-bound destination for engine notifications
///
/// The engine is built before the controller that consumes its events,
/// so the handler is connected afterwards. Events sent while unconnected
/// are dropped.
#[derive(Clone, Default)]
pub struct EngineSink {
    handler: Rc<RefCell<Option<Handler>>>,
}

impl EngineSink {
    /// Route all subsequent events to `handler`
    pub fn connect(&self, handler: impl Fn(EngineEvent) + 'static) {
        *self.handler.borrow_mut() = Some(Box::new(handler));
    }

    /// Deliver an event to the connected handler
    pub fn send(&self, event: EngineEvent) {
        match self.handler.borrow().as_ref() {
            Some(handler) => handler(event),
            None => tracing::trace!(?event, "engine sink not connected, dropping event"),
        }
    }
}

/// Media engine backed by a detached `HTMLAudioElement`
///
/// Each notification is tagged with the generation of the load that was
/// current when the element fired it.
pub struct HtmlAudioEngine {
    audio: HtmlAudioElement,
    generation: Rc<Cell<LoadGeneration>>,
    sink: EngineSink,
    _listeners: Vec<Listener>,
}

impl HtmlAudioEngine {
    /// Create the audio element and subscribe to its media events
    pub fn new(sink: EngineSink) -> std::result::Result<Self, JsValue> {
        let audio = HtmlAudioElement::new()?;
        audio.set_preload("auto");

        let generation = Rc::new(Cell::new(LoadGeneration::FIRST));
        let mut listeners = Vec::with_capacity(4);

        {
            let (element, generation, sink) = (audio.clone(), generation.clone(), sink.clone());
            listeners.push(Listener::attach(&audio, "timeupdate", move |_: Event| {
                sink.send(EngineEvent::time_update(generation.get(), element.current_time()));
            })?);
        }

        {
            let (element, generation, sink) = (audio.clone(), generation.clone(), sink.clone());
            listeners.push(Listener::attach(&audio, "loadedmetadata", move |_: Event| {
                sink.send(EngineEvent::loaded_metadata(generation.get(), element.duration()));
            })?);
        }

        {
            let (generation, sink) = (generation.clone(), sink.clone());
            listeners.push(Listener::attach(&audio, "ended", move |_: Event| {
                sink.send(EngineEvent::ended(generation.get()));
            })?);
        }

        {
            let (element, generation, sink) = (audio.clone(), generation.clone(), sink.clone());
            listeners.push(Listener::attach(&audio, "error", move |_: Event| {
                let message = match element.error() {
                    Some(error) => format!("media error (code {})", error.code()),
                    None => "media error".to_string(),
                };
                sink.send(EngineEvent::failed(generation.get(), message));
            })?);
        }

        Ok(Self {
            audio,
            generation,
            sink,
            _listeners: listeners,
        })
    }

    /// The underlying element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }
}

impl MediaEngine for HtmlAudioEngine {
    fn load(&mut self, source: &str, generation: LoadGeneration) -> Result<()> {
        self.generation.set(generation);
        self.audio.set_src(source);
        self.audio.load();
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .audio
            .play()
            .map_err(|err| PlaybackError::EngineLoadFailure(describe(&err)))?;

        // Autoplay policy and unsupported sources reject asynchronously
        let generation = self.generation.get();
        let sink = self.sink.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                if error_name(&err).as_deref() == Some("AbortError") {
                    tracing::debug!(%generation, "play request interrupted");
                    return;
                }
                sink.send(EngineEvent::failed(generation, describe(&err)));
            }
        });

        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            tracing::warn!("pause failed: {}", describe(&err));
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }
}

fn error_name(err: &JsValue) -> Option<String> {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
}

fn describe(err: &JsValue) -> String {
    let message = js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string());

    match (error_name(err), message) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (None, Some(message)) => message,
        _ => err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
