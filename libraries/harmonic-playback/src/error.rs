//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Routine player operations never return these: an empty queue or a track
/// missing from its queue are defined no-op/fallback paths. Errors cover
/// configuration and explicit index-based requests.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {index} (queue length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure reported by the playback device
///
/// Starting playback can fail for reasons outside the player's control.
/// These are surfaced to listeners as `PlaybackEvent::PlaybackFailed`, never
/// returned from a player operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Output refused to start without a user gesture
    #[error("Playback blocked by autoplay policy")]
    AutoplayBlocked,

    /// Media could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Media could not be fetched
    #[error("Network error: {0}")]
    Network(String),

    /// Anything else the device reports
    #[error("Device error: {0}")]
    Other(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
