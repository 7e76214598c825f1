//! DOM event listener handles
//!
//! Every listener registered from Rust is held by a [`Listener`] that
//! removes it again on drop, so add/remove always pair up.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, EventTarget, MouseEvent, TouchEvent};

use crate::scrub::{DragCapture, PointerInput};

/// A registered listener, removed on drop
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Register `handler` for `kind` events on `target`
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            tracing::warn!(kind = self.kind, "failed to remove listener: {:?}", err);
        }
    }
}

/// Document-level move/release listeners for one scrub drag
///
/// Attached when a drag begins and handed to the controller as its
/// [`DragCapture`]. Released when the drag ends, which detaches every
/// listener.
pub struct DocumentDragListeners {
    listeners: Vec<Listener>,
}

impl DocumentDragListeners {
    /// Listen for pointer moves and releases anywhere on `target`
    ///
    /// `on_move` receives the primary client x of every mouse or touch move.
    pub fn attach(
        target: &EventTarget,
        on_move: impl Fn(f64) + 'static,
        on_release: impl Fn() + 'static,
    ) -> Result<Self, JsValue> {
        let on_move = std::rc::Rc::new(on_move);
        let on_release = std::rc::Rc::new(on_release);
        let mut listeners = Vec::with_capacity(5);

        {
            let on_move = on_move.clone();
            listeners.push(Listener::attach(target, "mousemove", move |event: Event| {
                let mouse = event.unchecked_ref::<MouseEvent>();
                let input = PointerInput::Mouse {
                    client_x: f64::from(mouse.client_x()),
                };
                if let Some(x) = input.primary_x() {
                    on_move(x);
                }
            })?);
        }

        listeners.push(Listener::attach(target, "touchmove", move |event: Event| {
            if let Some(x) = touch_input(event.unchecked_ref::<TouchEvent>()).primary_x() {
                on_move(x);
            }
        })?);

        for kind in ["mouseup", "touchend", "touchcancel"] {
            let on_release = on_release.clone();
            listeners.push(Listener::attach(target, kind, move |_event: Event| {
                on_release();
            })?);
        }

        Ok(Self { listeners })
    }
}

impl DragCapture for DocumentDragListeners {
    fn release(&mut self) {
        self.listeners.clear();
    }
}

fn touch_input(event: &TouchEvent) -> PointerInput {
    let list = event.touches();
    let touches = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|touch| f64::from(touch.client_x()))
        .collect();
    PointerInput::Touch { touches }
}
