//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as it changes state; observers drain them after each command or
//! engine notification.
//!
//! Position and volume changes arrive at pointer-move or timer frequency.
//! Consecutive updates of the same kind are collapsed so an observer that
//! drains late only sees the latest value.

use joyful_core::TrackId;
use serde::{Deserialize, Serialize};

use crate::types::{PlaybackState, ScrubKind};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track
        previous_track_id: Option<TrackId>,
    },

    /// Elapsed time changed (engine report or seek)
    PositionChanged {
        /// Seconds from the start of the track
        position: f64,
    },

    /// Track duration became known or was reset by a track change
    DurationChanged {
        /// Seconds, `None` while unknown
        duration: Option<f64>,
    },

    /// Volume changed
    VolumeChanged {
        /// New level (0.0-1.0)
        volume: f64,
    },

    /// A scrub drag started
    ScrubStarted {
        /// Control being dragged
        kind: ScrubKind,
    },

    /// A scrub drag ended
    ScrubEnded {
        /// Control that was released
        kind: ScrubKind,
    },

    /// Engine reported a failure; playback may be silent
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Whether `self` replaces `previous` when queued right after it
    pub(crate) fn supersedes(&self, previous: &PlaybackEvent) -> bool {
        matches!(
            (self, previous),
            (
                PlaybackEvent::PositionChanged { .. },
                PlaybackEvent::PositionChanged { .. }
            ) | (
                PlaybackEvent::VolumeChanged { .. },
                PlaybackEvent::VolumeChanged { .. }
            )
        )
    }
}

/// Pending events with last-value-wins coalescing
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    pending: Vec<PlaybackEvent>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: PlaybackEvent) {
        if let Some(last) = self.pending.last_mut() {
            if event.supersedes(last) {
                *last = event;
                return;
            }
        }
        self.pending.push(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_positions_collapse() {
        let mut queue = EventQueue::default();
        queue.push(PlaybackEvent::PositionChanged { position: 1.0 });
        queue.push(PlaybackEvent::PositionChanged { position: 2.0 });
        queue.push(PlaybackEvent::PositionChanged { position: 3.0 });

        assert_eq!(
            queue.drain(),
            vec![PlaybackEvent::PositionChanged { position: 3.0 }]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn interleaved_events_keep_order() {
        let mut queue = EventQueue::default();
        queue.push(PlaybackEvent::VolumeChanged { volume: 0.2 });
        queue.push(PlaybackEvent::PositionChanged { position: 1.0 });
        queue.push(PlaybackEvent::VolumeChanged { volume: 0.4 });

        assert_eq!(queue.drain().len(), 3);
    }

    #[test]
    fn track_changes_never_collapse() {
        let mut queue = EventQueue::default();
        queue.push(PlaybackEvent::TrackChanged {
            track_id: TrackId::new("a"),
            previous_track_id: None,
        });
        queue.push(PlaybackEvent::TrackChanged {
            track_id: TrackId::new("b"),
            previous_track_id: Some(TrackId::new("a")),
        });

        assert_eq!(queue.drain().len(), 2);
    }
}
