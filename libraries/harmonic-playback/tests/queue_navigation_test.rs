//! Queue navigation: play_track, next, previous, direct play
//!
//! Every test drives the public player API against a recording device.

mod common;

use common::{
    create_player, create_player_with, create_test_track, create_test_tracks, current_id,
    playing_queue,
};
use harmonic_playback::{DeviceEvent, PlaybackConfig, TransportState};
use std::time::Duration;

fn advance_to(player: &mut harmonic_playback::PlayerCore<common::FakeDevice>, secs: f64) {
    let load = player.current_load().unwrap();
    player.handle_device_event(DeviceEvent::TimeUpdate {
        load,
        position: Duration::from_secs_f64(secs),
    });
}

// ===== play_track =====

#[test]
fn test_play_track_with_queue_points_cursor_at_track() {
    let mut player = create_player();
    let tracks = create_test_tracks(&["1", "2", "3"]);

    player.play_track(tracks[1].clone(), Some(tracks));

    assert_eq!(player.current_index(), Some(1));
    assert_eq!(player.queue_len(), 3);
    assert_eq!(current_id(&player).as_deref(), Some("2"));
    assert_eq!(player.get_state(), TransportState::Playing);
    assert_eq!(
        player.device().last_locator(),
        Some("https://cdn.example/2.mp3")
    );
}

#[test]
fn test_play_track_not_in_given_queue_falls_back_to_zero() {
    let mut player = create_player();
    let tracks = create_test_tracks(&["1", "2", "3"]);

    player.play_track(create_test_track("x"), Some(tracks));

    assert_eq!(player.current_index(), Some(0));
    // The requested track plays even though the cursor points elsewhere
    assert_eq!(current_id(&player).as_deref(), Some("x"));
}

#[test]
fn test_play_track_with_duplicates_uses_first_occurrence() {
    let mut player = create_player();
    let tracks = create_test_tracks(&["1", "2", "1"]);

    player.play_track(create_test_track("1"), Some(tracks));

    assert_eq!(player.current_index(), Some(0));
}

#[test]
fn test_play_track_with_empty_queue_clears_queue() {
    let mut player = playing_queue(&["1", "2"]);

    player.play_track(create_test_track("x"), Some(Vec::new()));

    assert_eq!(player.queue_len(), 0);
    assert_eq!(player.current_index(), None);
    assert_eq!(current_id(&player).as_deref(), Some("x"));
}

#[test]
fn test_play_same_track_restarts_it() {
    let mut player = playing_queue(&["1", "2"]);
    advance_to(&mut player, 42.0);
    let first_load = player.current_load();

    player.play_track(create_test_track("1"), None);

    assert_ne!(player.current_load(), first_load);
    assert_eq!(player.get_position(), Duration::ZERO);
    assert_eq!(player.device().loads.len(), 2);
}

// ===== Scenario A: sequential next =====

#[test]
fn test_sequential_next_cycles_through_queue() {
    let mut player = playing_queue(&["1", "2", "3"]);
    assert_eq!(player.current_index(), Some(0));
    assert_eq!(player.get_state(), TransportState::Playing);

    player.play_next();
    assert_eq!(player.current_index(), Some(1));
    assert_eq!(current_id(&player).as_deref(), Some("2"));
    assert_eq!(
        player.device().last_locator(),
        Some("https://cdn.example/2.mp3")
    );

    player.play_next();
    assert_eq!(player.current_index(), Some(2));

    // Manual next wraps even with repeat off
    player.play_next();
    assert_eq!(player.current_index(), Some(0));
    assert_eq!(current_id(&player).as_deref(), Some("1"));
}

#[test]
fn test_next_and_previous_on_empty_queue_are_noops() {
    let mut player = create_player();

    player.play_next();
    player.play_previous();

    assert!(player.get_current_track().is_none());
    assert_eq!(player.get_state(), TransportState::Stopped);
    assert!(player.device().loads.is_empty());
}

#[test]
fn test_next_with_empty_queue_keeps_direct_track() {
    let mut player = create_player();
    player.play_track(create_test_track("solo"), None);

    player.play_next();

    assert_eq!(current_id(&player).as_deref(), Some("solo"));
    assert_eq!(player.device().loads.len(), 1);
}

// ===== play_previous =====

#[test]
fn test_previous_near_start_moves_back() {
    let mut player = playing_queue(&["1", "2", "3"]);
    player.play_next();
    advance_to(&mut player, 2.9);

    player.play_previous();

    assert_eq!(player.current_index(), Some(0));
    assert_eq!(current_id(&player).as_deref(), Some("1"));
}

#[test]
fn test_previous_past_threshold_restarts_track() {
    let mut player = playing_queue(&["1", "2", "3"]);
    player.play_next();
    advance_to(&mut player, 3.1);
    let loads_before = player.device().loads.len();

    player.play_previous();

    assert_eq!(player.current_index(), Some(1));
    assert_eq!(player.get_position(), Duration::ZERO);
    assert_eq!(player.device().seeks.last(), Some(&Duration::ZERO));
    assert_eq!(player.device().loads.len(), loads_before);
}

#[test]
fn test_previous_exactly_at_threshold_moves_back() {
    let mut player = playing_queue(&["1", "2", "3"]);
    player.play_next();
    advance_to(&mut player, 3.0);

    player.play_previous();

    assert_eq!(player.current_index(), Some(0));
}

#[test]
fn test_previous_at_start_wraps_to_end() {
    let mut player = playing_queue(&["1", "2", "3"]);

    player.play_previous();

    assert_eq!(player.current_index(), Some(2));
    assert_eq!(current_id(&player).as_deref(), Some("3"));
}

#[test]
fn test_previous_threshold_is_configurable() {
    let mut player = create_player_with(PlaybackConfig {
        previous_restart_threshold_ms: 10_000,
        ..PlaybackConfig::default()
    });
    let tracks = create_test_tracks(&["1", "2"]);
    player.play_track(tracks[1].clone(), Some(tracks));
    advance_to(&mut player, 5.0);

    player.play_previous();

    assert_eq!(player.current_index(), Some(0));
}

// ===== Scenario C: direct play without a queue =====

#[test]
fn test_direct_play_of_unqueued_track_leaves_queue_alone() {
    let mut player = create_player();
    let tracks = create_test_tracks(&["1", "2", "3", "4"]);
    player.play_track(tracks[2].clone(), Some(tracks));

    player.play_track(create_test_track("5"), None);

    assert_eq!(current_id(&player).as_deref(), Some("5"));
    assert_eq!(player.queue_len(), 4);
    assert_eq!(player.current_index(), Some(2));

    // Advancing resumes from the untouched cursor
    player.play_next();
    assert_eq!(current_id(&player).as_deref(), Some("4"));
}

#[test]
fn test_direct_play_of_queued_track_syncs_cursor() {
    let mut player = create_player();
    let tracks = create_test_tracks(&["1", "2", "3", "4"]);
    player.play_track(tracks[2].clone(), Some(tracks));

    player.play_track(create_test_track("1"), None);

    assert_eq!(player.current_index(), Some(0));
    player.play_next();
    assert_eq!(current_id(&player).as_deref(), Some("2"));
}

#[test]
fn test_direct_play_cursor_sync_can_be_disabled() {
    let mut player = create_player_with(PlaybackConfig {
        sync_cursor_on_direct_play: false,
        ..PlaybackConfig::default()
    });
    let tracks = create_test_tracks(&["1", "2", "3", "4"]);
    player.play_track(tracks[2].clone(), Some(tracks));

    player.play_track(create_test_track("1"), None);

    assert_eq!(current_id(&player).as_deref(), Some("1"));
    assert_eq!(player.current_index(), Some(2));
}

// ===== enqueue / skip_to / clear =====

#[test]
fn test_enqueue_keeps_cursor_and_transport() {
    let mut player = playing_queue(&["1", "2"]);
    player.play_next();

    player.enqueue(create_test_track("3"));

    assert_eq!(player.queue_len(), 3);
    assert_eq!(player.current_index(), Some(1));
    assert_eq!(current_id(&player).as_deref(), Some("2"));
    assert_eq!(player.get_state(), TransportState::Playing);
}

#[test]
fn test_enqueue_onto_empty_queue_then_next() {
    let mut player = create_player();
    player.play_track(create_test_track("solo"), None);

    player.enqueue(create_test_track("a"));
    player.enqueue(create_test_track("b"));
    assert_eq!(player.current_index(), Some(0));

    player.play_next();
    assert_eq!(current_id(&player).as_deref(), Some("b"));
}

#[test]
fn test_skip_to_plays_index() {
    let mut player = playing_queue(&["1", "2", "3"]);

    player.skip_to(2).unwrap();

    assert_eq!(player.current_index(), Some(2));
    assert_eq!(current_id(&player).as_deref(), Some("3"));
    assert!(player.skip_to(3).is_err());
    assert_eq!(player.current_index(), Some(2));
}

#[test]
fn test_clear_queue_keeps_current_track() {
    let mut player = playing_queue(&["1", "2"]);

    player.clear_queue();

    assert_eq!(player.queue_len(), 0);
    assert_eq!(player.current_index(), None);
    assert_eq!(current_id(&player).as_deref(), Some("1"));
    assert_eq!(player.get_state(), TransportState::Playing);
}

// ===== Shuffle =====

#[test]
fn test_shuffle_next_stays_in_range_and_keeps_order() {
    let mut player = playing_queue(&["1", "2", "3", "4", "5"]);
    player.toggle_shuffle();
    assert!(player.get_shuffle());

    for _ in 0..50 {
        player.play_next();
        let index = player.current_index().unwrap();
        assert!(index < 5);
        assert_eq!(
            current_id(&player),
            Some(player.get_queue()[index].id.to_string())
        );
    }

    let order: Vec<_> = player.get_queue().iter().map(|t| t.id.to_string()).collect();
    assert_eq!(order, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_shuffle_with_fixed_seed_is_reproducible() {
    let run = || {
        let mut player = playing_queue(&["1", "2", "3", "4", "5", "6"]);
        player.set_shuffle(true);
        (0..10)
            .map(|_| {
                player.play_next();
                player.current_index().unwrap()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_toggle_play_pause_cycle() {
    let mut player = playing_queue(&["1"]);

    player.toggle_play_pause();
    assert_eq!(player.get_state(), TransportState::Paused);
    assert_eq!(player.device().pauses, 1);

    player.toggle_play_pause();
    assert_eq!(player.get_state(), TransportState::Playing);
    assert_eq!(player.device().plays.len(), 2);
}

#[test]
fn test_toggle_play_pause_without_track_is_noop() {
    let mut player = create_player();
    player.toggle_play_pause();

    assert_eq!(player.get_state(), TransportState::Stopped);
    assert!(player.device().plays.is_empty());
}

#[test]
fn test_seek_moves_position() {
    let mut player = playing_queue(&["1"]);

    player.seek(Duration::from_secs(30));

    assert_eq!(player.get_position(), Duration::from_secs(30));
    assert_eq!(player.device().seeks, vec![Duration::from_secs(30)]);
}

#[test]
fn test_seek_without_track_is_noop() {
    let mut player = create_player();
    player.seek(Duration::from_secs(30));

    assert_eq!(player.get_position(), Duration::ZERO);
    assert!(player.device().seeks.is_empty());
}
