//! Joyful Notes Core
//!
//! Platform-agnostic domain types and helpers shared by the player crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `Playlist`
//! - **Time Formatting**: `format_time` for `m:ss` clock labels
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use joyful_core::{Playlist, Track};
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("silent-night", "Silent Night", "Choir", "/audio/silent-night.mp3"),
//!     Track::new("joy", "Joy to the World", "Brass Ensemble", "/audio/joy.mp3"),
//! ])
//! .unwrap();
//!
//! assert_eq!(playlist.len(), 2);
//! assert_eq!(playlist.next_index(1), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod time;
pub mod types;

pub use error::{CoreError, Result};
pub use time::format_time;
pub use types::{Playlist, Track, TrackId};
