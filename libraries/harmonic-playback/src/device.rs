//! Playback device boundary
//!
//! Abstracts the single audio output the player drives (an HTML audio
//! element, a native sink, a simulated clock in tests).

use crate::error::DeviceError;
use crate::types::{LoadId, PlayTicket};
use std::time::Duration;

/// Immediate answer to [`PlaybackDevice::play`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayStart {
    /// Output is running
    Started,

    /// Outcome not known yet; the device will report it later through
    /// `DeviceEvent::PlaySettled` carrying the same ticket
    Pending,

    /// Output refused to start
    Rejected(DeviceError),
}

/// Events the device reports back to the player
///
/// The composition root forwards these to `PlayerCore::handle_device_event`
/// in the order they occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// Playback position advanced
    TimeUpdate { load: LoadId, position: Duration },

    /// Media metadata loaded; `duration` is authoritative from here on
    LoadedMetadata { load: LoadId, duration: Duration },

    /// Media played through to its end
    Ended { load: LoadId },

    /// Deferred outcome of a `play()` that answered `PlayStart::Pending`
    PlaySettled {
        ticket: PlayTicket,
        outcome: Result<(), DeviceError>,
    },
}

impl DeviceEvent {
    /// Load this event belongs to
    pub fn load(&self) -> LoadId {
        match self {
            DeviceEvent::TimeUpdate { load, .. }
            | DeviceEvent::LoadedMetadata { load, .. }
            | DeviceEvent::Ended { load } => *load,
            DeviceEvent::PlaySettled { ticket, .. } => ticket.load,
        }
    }
}

/// Platform-agnostic playback device
///
/// The player core is the only caller. Commands other than `play` are
/// fire-and-forget.
pub trait PlaybackDevice {
    /// Replace the current media with `locator`
    ///
    /// Every event produced for this media must carry `load`.
    fn load(&mut self, load: LoadId, locator: &str);

    /// Start or resume output
    fn play(&mut self, ticket: PlayTicket) -> PlayStart;

    /// Pause output
    fn pause(&mut self);

    /// Move the play head
    fn seek(&mut self, position: Duration);

    /// Set output gain (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Current play head position
    fn position(&self) -> Duration;

    /// Media duration, once metadata has loaded
    fn duration(&self) -> Option<Duration>;
}

impl<D: PlaybackDevice + ?Sized> PlaybackDevice for Box<D> {
    fn load(&mut self, load: LoadId, locator: &str) {
        (**self).load(load, locator);
    }

    fn play(&mut self, ticket: PlayTicket) -> PlayStart {
        (**self).play(ticket)
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn seek(&mut self, position: Duration) {
        (**self).seek(position);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }

    fn position(&self) -> Duration {
        (**self).position()
    }

    fn duration(&self) -> Option<Duration> {
        (**self).duration()
    }
}

/// Recording device for tests
///
/// Logs every command and answers `play()` from a scripted list (`Started`
/// once the script runs out).
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub commands: Vec<DeviceCommand>,
    pub play_script: std::collections::VecDeque<PlayStart>,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub output_volume: Option<f32>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    Load(LoadId, String),
    Play(PlayTicket),
    Pause,
    Seek(Duration),
    SetVolume(f32),
}

#[cfg(test)]
impl RecordingDevice {
    pub fn last_load(&self) -> Option<(LoadId, &str)> {
        self.commands.iter().rev().find_map(|c| match c {
            DeviceCommand::Load(id, locator) => Some((*id, locator.as_str())),
            _ => None,
        })
    }
}

#[cfg(test)]
impl PlaybackDevice for RecordingDevice {
    fn load(&mut self, load: LoadId, locator: &str) {
        self.position = Duration::ZERO;
        self.duration = None;
        self.commands.push(DeviceCommand::Load(load, locator.to_string()));
    }

    fn play(&mut self, ticket: PlayTicket) -> PlayStart {
        self.commands.push(DeviceCommand::Play(ticket));
        self.play_script.pop_front().unwrap_or(PlayStart::Started)
    }

    fn pause(&mut self) {
        self.commands.push(DeviceCommand::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
        self.commands.push(DeviceCommand::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.output_volume = Some(volume);
        self.commands.push(DeviceCommand::SetVolume(volume));
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}
