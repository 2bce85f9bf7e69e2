//! Shared helpers for playback integration tests

#![allow(dead_code)]

use harmonic_core::Track;
use harmonic_playback::{
    LoadId, PlayStart, PlayTicket, PlaybackConfig, PlaybackDevice, PlayerCore,
};
use std::collections::VecDeque;
use std::time::Duration;

/// In-memory device that records what the player asked of it
#[derive(Debug, Default)]
pub struct FakeDevice {
    pub loads: Vec<(LoadId, String)>,
    pub plays: Vec<PlayTicket>,
    pub pauses: usize,
    pub seeks: Vec<Duration>,
    pub volumes: Vec<f32>,
    /// Answers for upcoming `play()` calls; `Started` once exhausted
    pub play_script: VecDeque<PlayStart>,
    pub position: Duration,
    pub duration: Option<Duration>,
}

impl FakeDevice {
    pub fn last_load(&self) -> Option<LoadId> {
        self.loads.last().map(|(load, _)| *load)
    }

    pub fn last_locator(&self) -> Option<&str> {
        self.loads.last().map(|(_, locator)| locator.as_str())
    }

    pub fn last_ticket(&self) -> Option<PlayTicket> {
        self.plays.last().copied()
    }

    pub fn last_volume(&self) -> Option<f32> {
        self.volumes.last().copied()
    }
}

impl PlaybackDevice for FakeDevice {
    fn load(&mut self, load: LoadId, locator: &str) {
        self.position = Duration::ZERO;
        self.duration = None;
        self.loads.push((load, locator.to_string()));
    }

    fn play(&mut self, ticket: PlayTicket) -> PlayStart {
        self.plays.push(ticket);
        self.play_script.pop_front().unwrap_or(PlayStart::Started)
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
        self.seeks.push(position);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volumes.push(volume);
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

pub fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("https://cdn.example/{}.mp3", id))
        .with_title(format!("Track {}", id))
        .with_artist("Test Artist")
}

pub fn create_test_tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| create_test_track(id)).collect()
}

/// Player with a fixed shuffle seed
pub fn create_player() -> PlayerCore<FakeDevice> {
    create_player_with(PlaybackConfig::default())
}

pub fn create_player_with(config: PlaybackConfig) -> PlayerCore<FakeDevice> {
    let config = PlaybackConfig {
        shuffle_seed: config.shuffle_seed.or(Some(7)),
        ..config
    };
    PlayerCore::new(FakeDevice::default(), config)
}

/// Player already playing the first of `ids`, with `ids` as its queue
pub fn playing_queue(ids: &[&str]) -> PlayerCore<FakeDevice> {
    let mut player = create_player();
    let tracks = create_test_tracks(ids);
    player.play_track(tracks[0].clone(), Some(tracks));
    player
}

pub fn current_id<D: PlaybackDevice>(player: &PlayerCore<D>) -> Option<String> {
    player.get_current_track().map(|t| t.id.to_string())
}
