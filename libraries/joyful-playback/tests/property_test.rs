//! Property-based tests for the playback controller
//!
//! Uses proptest to check navigation, clamping and drag invariants across
//! random playlists and inputs.

mod common;

use common::MockEngine;
use joyful_core::{Playlist, Track};
use joyful_playback::{
    EngineEvent, PlaybackConfig, PlaybackController, ScrubKind, TrackBounds,
};
use proptest::prelude::*;

// ===== Helpers =====

fn player_with(len: usize) -> (PlaybackController<MockEngine>, std::rc::Rc<std::cell::RefCell<common::EngineState>>) {
    let tracks = (0..len)
        .map(|i| Track::new(format!("t{i}"), format!("Track {i}"), "Artist", format!("/{i}.mp3")))
        .collect();
    let (engine, state) = MockEngine::new();
    let player = PlaybackController::new(
        Playlist::new(tracks).expect("non-empty"),
        engine,
        PlaybackConfig::default(),
    )
    .expect("controller");
    (player, state)
}

fn arbitrary_bounds() -> impl Strategy<Value = TrackBounds> {
    (-500.0f64..500.0, 1.0f64..2000.0).prop_map(|(left, width)| TrackBounds::new(left, width))
}

// ===== Property Tests =====

proptest! {
    /// Property: N calls to next() return to the starting track
    #[test]
    fn next_wraps_around(len in 1usize..20, start in 0usize..20) {
        let (mut player, _) = player_with(len);
        let start = start % len;
        if start != 0 {
            player.select_index(start).unwrap();
        }

        for _ in 0..len {
            player.next();
        }

        prop_assert_eq!(player.current_index(), start);
    }

    /// Property: N calls to prev() near the start of a track return to the start
    #[test]
    fn prev_wraps_around(len in 1usize..20, start in 0usize..20) {
        let (mut player, _) = player_with(len);
        let start = start % len;
        if start != 0 {
            player.select_index(start).unwrap();
        }

        for _ in 0..len {
            player.prev();
        }

        prop_assert_eq!(player.current_index(), start);
    }

    /// Property: prev() restarts iff the engine is past the threshold
    #[test]
    fn prev_respects_restart_threshold(len in 2usize..10, position in 0.0f64..10.0) {
        let (mut player, engine) = player_with(len);
        engine.borrow_mut().current_time = position;

        player.prev();

        if position > 3.0 {
            prop_assert_eq!(player.current_index(), 0);
            prop_assert_eq!(player.position(), 0.0);
        } else {
            prop_assert_eq!(player.current_index(), len - 1);
        }
    }

    /// Property: volume always lands in 0.0-1.0
    #[test]
    fn volume_always_clamped(level in -10.0f64..10.0) {
        let (mut player, engine) = player_with(1);

        player.set_volume(level);

        prop_assert!((0.0..=1.0).contains(&player.volume()));
        prop_assert_eq!(player.volume(), level.clamp(0.0, 1.0));
        prop_assert_eq!(engine.borrow().volume, player.volume());
    }

    /// Property: seek always lands inside a known duration
    #[test]
    fn seek_always_clamped(duration in 1.0f64..3600.0, target in -5000.0f64..5000.0) {
        let (mut player, _) = player_with(1);
        player.handle_engine_event(EngineEvent::loaded_metadata(player.generation(), duration));

        player.seek(target);

        prop_assert!(player.position() >= 0.0);
        prop_assert!(player.position() <= duration);
    }

    /// Property: increasing pointer x never decreases the committed value
    #[test]
    fn drag_is_monotonic(
        bounds in arbitrary_bounds(),
        mut offsets in prop::collection::vec(0.0f64..1.0, 2..30)
    ) {
        let (mut player, _) = player_with(1);
        offsets.sort_by(|a, b| a.total_cmp(b));
        let xs: Vec<f64> = offsets.iter().map(|o| bounds.left + o * bounds.width).collect();

        player.begin_scrub(ScrubKind::Volume, xs[0], bounds);
        let mut previous = player.volume();
        for &x in &xs[1..] {
            player.update_scrub(ScrubKind::Volume, x, bounds);
            prop_assert!(player.volume() >= previous);
            previous = player.volume();
        }
        player.end_scrub(ScrubKind::Volume);
    }

    /// Property: normalized values stay in 0.0-1.0 for any pointer
    #[test]
    fn normalize_stays_in_unit_range(bounds in arbitrary_bounds(), x in -1e6f64..1e6) {
        let value = bounds.normalize(x);
        prop_assert!((0.0..=1.0).contains(&value));
    }

    /// Property: selecting the current track twice restores the play flag
    #[test]
    fn double_select_is_identity(len in 1usize..10, index in 0usize..10, start_playing: bool) {
        let (mut player, _) = player_with(len);
        let index = index % len;
        player.select_index(index).unwrap();
        if player.is_playing() != start_playing {
            player.toggle_play();
        }

        player.select_index(index).unwrap();
        player.select_index(index).unwrap();

        prop_assert_eq!(player.is_playing(), start_playing);
    }
}
