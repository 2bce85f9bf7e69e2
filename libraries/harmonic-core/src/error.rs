//! Core error types for Harmonic Archive

use crate::types::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `HarmonicError`
pub type Result<T> = std::result::Result<T, HarmonicError>;

/// Core error type for Harmonic Archive
#[derive(Error, Debug)]
pub enum HarmonicError {
    /// Catalog backend errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl HarmonicError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
