//! Deferred play settlement, volume/mute, and event delivery

mod common;

use common::{create_player, create_player_with, create_test_track, playing_queue};
use harmonic_playback::{
    DeviceError, DeviceEvent, PlayStart, PlaybackConfig, PlaybackEvent, RepeatMode,
    TransportState,
};
use std::cell::RefCell;
use std::rc::Rc;

// ===== Play settlement =====

#[test]
fn test_pending_play_confirmed() {
    let mut player = create_player();
    player.device_mut().play_script.push_back(PlayStart::Pending);

    player.play_track(create_test_track("1"), None);
    assert_eq!(player.get_state(), TransportState::Playing);

    let ticket = player.device().last_ticket().unwrap();
    player.handle_device_event(DeviceEvent::PlaySettled {
        ticket,
        outcome: Ok(()),
    });

    assert_eq!(player.get_state(), TransportState::Playing);
}

#[test]
fn test_pending_play_rejected_reverts_to_paused() {
    let mut player = create_player();
    player.device_mut().play_script.push_back(PlayStart::Pending);
    player.play_track(create_test_track("1"), None);
    player.drain_events();

    let ticket = player.device().last_ticket().unwrap();
    player.handle_device_event(DeviceEvent::PlaySettled {
        ticket,
        outcome: Err(DeviceError::AutoplayBlocked),
    });

    assert_eq!(player.get_state(), TransportState::Paused);
    assert_eq!(
        player.get_current_track().map(|t| t.id.as_str()),
        Some("1")
    );

    let events = player.drain_events();
    assert!(events.contains(&PlaybackEvent::StateChanged {
        state: TransportState::Paused
    }));
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::PlaybackFailed { track_id: Some(id), .. } if id == "1"
    )));
}

#[test]
fn test_settlement_after_pause_is_ignored() {
    let mut player = create_player();
    player.device_mut().play_script.push_back(PlayStart::Pending);
    player.play_track(create_test_track("1"), None);
    let ticket = player.device().last_ticket().unwrap();

    player.toggle_play_pause();
    player.handle_device_event(DeviceEvent::PlaySettled {
        ticket,
        outcome: Err(DeviceError::AutoplayBlocked),
    });

    assert_eq!(player.get_state(), TransportState::Paused);
    let failed = player
        .drain_events()
        .into_iter()
        .any(|e| matches!(e, PlaybackEvent::PlaybackFailed { .. }));
    assert!(!failed);
}

#[test]
fn test_settlement_for_superseded_track_is_ignored() {
    let mut player = playing_queue(&["1", "2"]);
    player.device_mut().play_script.push_back(PlayStart::Pending);
    player.play_next();
    let stale = player.device().last_ticket().unwrap();

    // Track replaced while the first play() was still pending
    player.play_next();
    player.handle_device_event(DeviceEvent::PlaySettled {
        ticket: stale,
        outcome: Err(DeviceError::Network("timeout".to_string())),
    });

    assert_eq!(player.get_state(), TransportState::Playing);
}

#[test]
fn test_older_attempt_on_same_load_is_ignored() {
    let mut player = create_player();
    player.device_mut().play_script.push_back(PlayStart::Pending);
    player.device_mut().play_script.push_back(PlayStart::Pending);
    player.play_track(create_test_track("1"), None);
    let first = player.device().last_ticket().unwrap();

    player.toggle_play_pause();
    player.toggle_play_pause();
    let second = player.device().last_ticket().unwrap();
    assert_eq!(first.load, second.load);
    assert_ne!(first, second);

    player.handle_device_event(DeviceEvent::PlaySettled {
        ticket: first,
        outcome: Err(DeviceError::AutoplayBlocked),
    });
    assert_eq!(player.get_state(), TransportState::Playing);

    player.handle_device_event(DeviceEvent::PlaySettled {
        ticket: second,
        outcome: Err(DeviceError::AutoplayBlocked),
    });
    assert_eq!(player.get_state(), TransportState::Paused);
}

#[test]
fn test_immediate_rejection_keeps_track_loaded() {
    let mut player = create_player();
    player
        .device_mut()
        .play_script
        .push_back(PlayStart::Rejected(DeviceError::Decode("bad header".into())));

    player.play_track(create_test_track("1"), None);

    assert_eq!(player.get_state(), TransportState::Paused);

    // User retries
    player.toggle_play_pause();
    assert_eq!(player.get_state(), TransportState::Playing);
}

// ===== Volume =====

#[test]
fn test_volume_set_while_muted_applies_on_unmute() {
    let mut player = create_player();

    player.set_volume(0.4);
    player.toggle_mute();
    player.set_volume(0.7);
    assert_eq!(player.output_volume(), 0.0);
    assert_eq!(player.device().last_volume(), Some(0.0));

    player.toggle_mute();

    assert_eq!(player.output_volume(), 0.7);
    assert_eq!(player.device().last_volume(), Some(0.7));
    assert!(!player.is_muted());
}

#[test]
fn test_volume_clamped() {
    let mut player = create_player();

    player.set_volume(2.0);
    assert_eq!(player.get_volume(), 1.0);

    player.set_volume(-1.0);
    assert_eq!(player.get_volume(), 0.0);
}

#[test]
fn test_initial_config_applied_to_device() {
    let player = create_player_with(PlaybackConfig {
        volume: 0.5,
        muted: true,
        repeat: RepeatMode::All,
        shuffle: true,
        ..PlaybackConfig::default()
    });

    assert_eq!(player.device().last_volume(), Some(0.0));
    assert_eq!(player.get_volume(), 0.5);
    assert_eq!(player.get_repeat(), RepeatMode::All);
    assert!(player.get_shuffle());
}

// ===== Subscription =====

#[test]
fn test_subscriber_sees_events_in_order() {
    let mut player = create_player();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    player.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    player.play_track(create_test_track("1"), None);

    let seen = seen.borrow();
    let track_changed = seen
        .iter()
        .position(|e| matches!(e, PlaybackEvent::TrackChanged { .. }))
        .unwrap();
    let playing = seen
        .iter()
        .position(|e| {
            *e == PlaybackEvent::StateChanged {
                state: TransportState::Playing,
            }
        })
        .unwrap();
    assert!(track_changed < playing);
}

#[test]
fn test_unsubscribed_listener_stops_receiving() {
    let mut player = create_player();
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let id = player.subscribe(move |_| *counter.borrow_mut() += 1);

    player.toggle_shuffle();
    assert_eq!(*count.borrow(), 1);

    assert!(player.unsubscribe(id));
    assert_eq!(player.listener_count(), 0);
    player.toggle_shuffle();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_drain_events_empties_buffer() {
    let mut player = playing_queue(&["1", "2"]);
    assert!(player.has_pending_events());

    let events = player.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::QueueChanged {
            length: 2,
            current_index: Some(0)
        }
    )));
    assert!(!player.has_pending_events());
}

#[test]
fn test_snapshot_reflects_state() {
    let mut player = playing_queue(&["1", "2", "3"]);
    player.play_next();
    player.toggle_mute();

    let snapshot = player.snapshot();
    assert_eq!(snapshot.state, TransportState::Playing);
    assert_eq!(snapshot.current_index, Some(1));
    assert_eq!(snapshot.queue_len, 3);
    assert!(snapshot.muted);
    assert_eq!(
        snapshot.current_track.map(|t| t.id.to_string()).as_deref(),
        Some("2")
    );
}
