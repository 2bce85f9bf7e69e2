//! Simulated playback device
//!
//! Stands in for a real audio output: keeps a virtual play head that only
//! moves when the session advances the clock, and queues the events a real
//! output would fire.

use harmonic_playback::{DeviceError, DeviceEvent, LoadId, PlayStart, PlayTicket, PlaybackDevice};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug)]
pub struct SimulatedDevice {
    load: Option<LoadId>,
    position: Duration,
    duration: Option<Duration>,
    playing: bool,
    volume: f32,
    fallback_duration: Duration,
    durations: HashMap<String, Duration>,
    fail_next_play: Option<DeviceError>,
    outbox: VecDeque<DeviceEvent>,
}

impl SimulatedDevice {
    pub fn new(fallback_duration: Duration) -> Self {
        Self {
            load: None,
            position: Duration::ZERO,
            duration: None,
            playing: false,
            volume: 1.0,
            fallback_duration,
            durations: HashMap::new(),
            fail_next_play: None,
            outbox: VecDeque::new(),
        }
    }

    /// Duration to report as metadata when `locator` is loaded
    pub fn register_duration(&mut self, locator: impl Into<String>, duration: Duration) {
        self.durations.insert(locator.into(), duration);
    }

    /// Reject the next `play()` with `error`
    pub fn fail_next_play(&mut self, error: DeviceError) {
        self.fail_next_play = Some(error);
    }

    /// Move the play head forward by `elapsed` if playing
    ///
    /// Queues a time update, then `Ended` if the media ran out.
    pub fn advance(&mut self, elapsed: Duration) {
        let Some(load) = self.load else {
            return;
        };
        if !self.playing {
            return;
        }

        let end = self.duration.unwrap_or(self.fallback_duration);
        self.position = (self.position + elapsed).min(end);
        self.outbox.push_back(DeviceEvent::TimeUpdate {
            load,
            position: self.position,
        });

        if self.position >= end {
            self.playing = false;
            debug!("{} reached end at {:?}", load, end);
            self.outbox.push_back(DeviceEvent::Ended { load });
        }
    }

    /// Take every event queued since the last call
    pub fn take_events(&mut self) -> Vec<DeviceEvent> {
        self.outbox.drain(..).collect()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl PlaybackDevice for SimulatedDevice {
    fn load(&mut self, load: LoadId, locator: &str) {
        let duration = self
            .durations
            .get(locator)
            .copied()
            .unwrap_or(self.fallback_duration);

        trace!("Simulated load {} of {} ({:?})", load, locator, duration);

        self.load = Some(load);
        self.position = Duration::ZERO;
        self.duration = Some(duration);
        self.playing = false;
        self.outbox.push_back(DeviceEvent::LoadedMetadata { load, duration });
    }

    fn play(&mut self, ticket: PlayTicket) -> PlayStart {
        if self.load != Some(ticket.load) {
            return PlayStart::Rejected(DeviceError::Other("no media loaded".to_string()));
        }

        if let Some(error) = self.fail_next_play.take() {
            self.playing = false;
            return PlayStart::Rejected(error);
        }

        if self.duration.is_some_and(|d| self.position >= d) {
            self.position = Duration::ZERO;
        }

        self.playing = true;
        PlayStart::Started
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        let end = self.duration.unwrap_or(self.fallback_duration);
        self.position = position.min(end);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}
