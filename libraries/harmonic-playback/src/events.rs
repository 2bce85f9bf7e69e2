//! Playback Events
//!
//! Push notifications for UI synchronization. Emitted at key points:
//! - Transport changes (play/pause/stop)
//! - Track and queue changes
//! - Position and duration reports from the device
//! - Volume, repeat and shuffle changes
//! - Device failures (as a notification, never as an error return)

use crate::types::{RepeatMode, TransportState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Events emitted by the player core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// A different track was loaded (or the same one reloaded)
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Position moved, by device report or by seek
    PositionChanged {
        /// Current playback position
        position_ms: u64,
        /// Track duration, 0 while unknown
        duration_ms: u64,
    },

    /// Device reported the authoritative duration
    DurationChanged { duration_ms: u64 },

    /// Volume or mute changed
    VolumeChanged {
        /// Stored level (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        muted: bool,
        /// Level sent to the device
        output: f32,
    },

    /// Queue replaced, appended to, or cursor moved
    QueueChanged {
        /// New queue length
        length: usize,
        /// Cursor position
        current_index: Option<usize>,
    },

    /// Repeat mode changed
    RepeatChanged { mode: RepeatMode },

    /// Shuffle toggled
    ShuffleChanged { enabled: bool },

    /// Track played through to its end
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Device refused or failed to start playback
    PlaybackFailed {
        /// Track that failed to play
        track_id: Option<String>,
        /// Human-readable reason
        message: String,
    },
}

/// Handle returned by `PlayerCore::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

type Listener = Box<dyn FnMut(&PlaybackEvent)>;

/// Registered event listeners, notified in registration order
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn add(&mut self, listener: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, event: &PlaybackEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
