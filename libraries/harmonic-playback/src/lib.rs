//! Harmonic Archive Playback
//!
//! Platform-agnostic playback and queue management: one current track, a
//! play queue with a cursor, repeat/shuffle policies and volume, driving a
//! single playback device.
//!
//! # Architecture
//!
//! - **`PlayerCore`**: the state machine; sole owner of player state
//! - **`PlaybackDevice`**: trait over the audio output (browser element,
//!   native sink, simulated clock)
//! - **`Queue`**: ordered tracks plus a cursor
//! - **`Volume`**: level with independent mute
//! - **`PlaybackEvent`**: push notifications for UI synchronization
//!
//! Device events are tagged with the [`LoadId`] of the load they belong to,
//! so late events from a replaced track never touch the new one.
//!
//! # Example
//!
//! ```rust
//! use harmonic_core::Track;
//! use harmonic_playback::{
//!     LoadId, PlayStart, PlayTicket, PlaybackDevice, PlayerCore, TransportState,
//! };
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct NullDevice;
//!
//! impl PlaybackDevice for NullDevice {
//!     fn load(&mut self, _load: LoadId, _locator: &str) {}
//!     fn play(&mut self, _ticket: PlayTicket) -> PlayStart {
//!         PlayStart::Started
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: Duration) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn position(&self) -> Duration {
//!         Duration::ZERO
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         None
//!     }
//! }
//!
//! let mut player = PlayerCore::with_defaults(NullDevice);
//! let queue = vec![
//!     Track::new("a", "https://cdn.example/a.mp3"),
//!     Track::new("b", "https://cdn.example/b.mp3"),
//! ];
//!
//! player.play_track(queue[0].clone(), Some(queue));
//! assert_eq!(player.get_state(), TransportState::Playing);
//!
//! player.play_next();
//! assert_eq!(player.get_current_track().unwrap().id.as_str(), "b");
//! ```

#![forbid(unsafe_code)]

mod device;
mod error;
mod events;
mod player;
mod queue;
mod shuffle;
mod types;
mod volume;

pub use device::{DeviceEvent, PlayStart, PlaybackDevice};
pub use error::{DeviceError, PlaybackError, Result};
pub use events::{ListenerId, PlaybackEvent};
pub use player::PlayerCore;
pub use queue::Queue;
pub use types::{
    LoadId, PlayTicket, PlaybackConfig, PlayerSnapshot, RepeatMode, TransportState,
};
pub use volume::Volume;
