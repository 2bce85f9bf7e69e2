//! Core types for playback management

use crate::error::{PlaybackError, Result};
use harmonic_core::Track;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    /// Nothing playing; either no track, or the last track ran out
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the last track in the queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the `Off -> All -> One -> Off` cycle
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Generation tag for one `load` issued to the device
///
/// Every device event carries the tag of the load it belongs to; events whose
/// tag is not the current one are stale and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadId(pub u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Tag for one `play()` request
///
/// A load can be played several times (resume, repeat-one restart); only the
/// latest attempt's settlement is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayTicket {
    pub load: LoadId,
    pub attempt: u64,
}

/// Configuration for the player core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Start muted (default: false)
    pub muted: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// "Previous" restarts the current track past this position (default: 3000 ms)
    pub previous_restart_threshold_ms: u64,

    /// Move the cursor when a queued track is played directly (default: true)
    pub sync_cursor_on_direct_play: bool,

    /// Fixed seed for shuffle draws; entropy when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            muted: false,
            repeat: RepeatMode::Off,
            shuffle: false,
            previous_restart_threshold_ms: 3000,
            sync_cursor_on_direct_play: true,
            shuffle_seed: None,
        }
    }
}

impl PlaybackConfig {
    /// Reject values the player would otherwise have to clamp
    pub fn validate(&self) -> Result<()> {
        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume must be within 0.0..=1.0, got {}",
                self.volume
            )));
        }
        Ok(())
    }

    pub fn previous_restart_threshold(&self) -> Duration {
        Duration::from_millis(self.previous_restart_threshold_ms)
    }
}

/// Read model of the player, for UI display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub current_track: Option<Track>,
    pub state: TransportState,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
    pub muted: bool,
    pub repeat: RepeatMode,
    pub shuffle: bool,
    pub queue_len: usize,
    pub current_index: Option<usize>,
}
