//! Drag-to-value scrub controls
//!
//! A [`ScrubTrack`] turns pointer positions over a horizontal bar into a
//! normalized value in 0.0-1.0. The value is reported on press
//! (click-to-jump) and on every move while the drag is active, so the
//! consumer can update live. Release stops the updates and emits nothing.
//!
//! Once a drag starts, moves and the release must be observed even after
//! the pointer leaves the bar. Platforms do that with document-level
//! listeners, represented here by a [`DragCapture`] held in a
//! [`CaptureGuard`] for the lifetime of the drag. The guard releases the
//! capture exactly once: on `end`, on a new `begin`, or when the track is
//! dropped.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::ScrubKind;

/// Horizontal extent of a scrub bar in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackBounds {
    pub left: f64,
    pub width: f64,
}

impl TrackBounds {
    /// Create bounds
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Map a pointer x coordinate to 0.0-1.0
    ///
    /// Zero, negative or non-finite geometry yields 0.0, as does a
    /// non-finite pointer.
    pub fn normalize(&self, pointer_x: f64) -> f64 {
        if !(self.width.is_finite() && self.width > 0.0) {
            return 0.0;
        }

        let ratio = (pointer_x - self.left) / self.width;
        if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Raw pointer sample from mouse or touch input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerInput {
    /// Mouse event client x
    Mouse { client_x: f64 },

    /// Client x of every active contact, in touch-list order
    Touch { touches: Vec<f64> },
}

impl PointerInput {
    /// The x coordinate both input kinds share
    ///
    /// Touch uses the first contact. `None` for a touch sample without
    /// contacts (for example a `touchend` whose list is already empty).
    pub fn primary_x(&self) -> Option<f64> {
        match self {
            PointerInput::Mouse { client_x } => Some(*client_x),
            PointerInput::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Platform listener registration that lives as long as a drag
pub trait DragCapture {
    /// Detach the listeners
    ///
    /// Called exactly once by [`CaptureGuard`].
    fn release(&mut self);
}

/// Owns a [`DragCapture`] and releases it on drop
pub struct CaptureGuard {
    capture: Option<Box<dyn DragCapture>>,
}

impl CaptureGuard {
    /// Take ownership of an attached capture
    pub fn new(capture: Box<dyn DragCapture>) -> Self {
        Self {
            capture: Some(capture),
        }
    }

    /// Release now instead of on drop
    pub fn release(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            capture.release();
        }
    }

    /// Whether the capture is still held
    pub fn is_held(&self) -> bool {
        self.capture.is_some()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("held", &self.is_held())
            .finish()
    }
}

/// Live drag on one track
#[derive(Debug)]
struct DragState {
    last_value: f64,
    _capture: Option<CaptureGuard>,
}

/// Drag lifecycle for a single scrub bar
#[derive(Debug)]
pub struct ScrubTrack {
    kind: ScrubKind,
    drag: Option<DragState>,
}

impl ScrubTrack {
    /// Create an idle track
    pub fn new(kind: ScrubKind) -> Self {
        Self { kind, drag: None }
    }

    /// Which control this track drives
    pub fn kind(&self) -> ScrubKind {
        self.kind
    }

    /// Whether a drag is in progress
    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Last value reported during the current drag
    pub fn last_value(&self) -> Option<f64> {
        self.drag.as_ref().map(|d| d.last_value)
    }

    /// Press on the bar
    ///
    /// Returns the value to commit immediately. Any earlier drag is ended
    /// first.
    pub fn begin(&mut self, pointer_x: f64, bounds: TrackBounds) -> f64 {
        self.start(pointer_x, bounds, None)
    }

    /// Press on the bar while holding document-level listeners
    pub fn begin_captured(
        &mut self,
        pointer_x: f64,
        bounds: TrackBounds,
        capture: Box<dyn DragCapture>,
    ) -> f64 {
        self.start(pointer_x, bounds, Some(CaptureGuard::new(capture)))
    }

    /// Pointer moved
    ///
    /// Returns the value to commit, or `None` when no drag is active.
    pub fn update(&mut self, pointer_x: f64, bounds: TrackBounds) -> Option<f64> {
        let drag = self.drag.as_mut()?;
        let value = bounds.normalize(pointer_x);
        drag.last_value = value;
        trace!(kind = ?self.kind, value, "scrub update");
        Some(value)
    }

    /// Pointer released (anywhere)
    ///
    /// Returns whether a drag was active. Releases the capture.
    pub fn end(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) => {
                trace!(kind = ?self.kind, value = drag.last_value, "scrub end");
                true
            }
            None => false,
        }
    }

    fn start(&mut self, pointer_x: f64, bounds: TrackBounds, capture: Option<CaptureGuard>) -> f64 {
        // Drop the previous drag (and its listeners) before taking over
        self.drag = None;

        let value = bounds.normalize(pointer_x);
        trace!(kind = ?self.kind, value, "scrub begin");
        self.drag = Some(DragState {
            last_value: value,
            _capture: capture,
        });
        value
    }
}
