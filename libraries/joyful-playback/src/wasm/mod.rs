//! WASM bindings for joyful-playback
//!
//! Runs the controller in the browser: [`HtmlAudioEngine`] drives an
//! `HTMLAudioElement`, [`DocumentDragListeners`] keeps scrub drags alive
//! outside the bar, and [`WasmPlayer`] is the class exported to JavaScript.

mod engine;
mod listeners;
mod logging;
mod player;

pub use engine::{EngineSink, HtmlAudioEngine};
pub use listeners::{DocumentDragListeners, Listener};
pub use player::WasmPlayer;
