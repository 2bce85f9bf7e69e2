//! Song catalog record

use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog song, in the shape served by the catalog API
///
/// Field names follow the wire format (`audioUrl`, `isCover`, ...). The
/// player only reads a handful of these; the rest pass through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: TrackId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Genre label
    #[serde(default)]
    pub genre: String,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Audio file URL
    pub audio_url: String,

    /// Cover art URL
    #[serde(default)]
    pub cover_url: String,

    /// Generation prompt shown on the detail page
    #[serde(default)]
    pub prompt: String,

    /// Whether this song is a cover of another work
    #[serde(default)]
    pub is_cover: bool,

    /// Link to the original work (covers only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,

    /// When the song was added to the archive
    pub created_at: DateTime<Utc>,

    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,

    /// Visible to non-admin visitors
    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Pinned by an admin
    #[serde(default)]
    pub pinned: bool,
}

fn default_visible() -> bool {
    true
}

impl Song {
    /// Duration as a `Duration`, if the record carries a usable value
    pub fn duration(&self) -> Option<Duration> {
        if self.duration > 0.0 {
            Duration::try_from_secs_f64(self.duration).ok()
        } else {
            None
        }
    }

    /// Case-insensitive match against title or artist
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.artist.to_lowercase().contains(needle_lower)
    }
}
