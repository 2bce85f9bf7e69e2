//! Player-facing track projection

use crate::types::{Song, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Track information for playback
///
/// A read-only snapshot of a catalog song. The player never mutates a track
/// it holds; later edits to the catalog record do not reach an enqueued
/// snapshot until the caller hands over a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier
    pub id: TrackId,

    /// Locator resolvable by the playback device
    pub audio_locator: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Cover art locator
    pub cover_locator: String,

    /// Advisory duration; the device reports the real one once media loads
    pub duration_hint: Option<Duration>,
}

impl Track {
    /// Create a track with only the fields playback needs
    pub fn new(id: impl Into<TrackId>, audio_locator: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            audio_locator: audio_locator.into(),
            title: String::new(),
            artist: String::new(),
            cover_locator: String::new(),
            duration_hint: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn with_cover(mut self, cover_locator: impl Into<String>) -> Self {
        self.cover_locator = cover_locator.into();
        self
    }

    pub fn with_duration_hint(mut self, duration: Duration) -> Self {
        self.duration_hint = Some(duration);
        self
    }
}

impl From<&Song> for Track {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.clone(),
            audio_locator: song.audio_url.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            cover_locator: song.cover_url.clone(),
            duration_hint: song.duration(),
        }
    }
}

impl From<Song> for Track {
    fn from(song: Song) -> Self {
        let duration_hint = song.duration();
        Self {
            id: song.id,
            audio_locator: song.audio_url,
            title: song.title,
            artist: song.artist,
            cover_locator: song.cover_url,
            duration_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn song() -> Song {
        Song {
            id: TrackId::new("s1"),
            title: "Lanterns".to_string(),
            artist: "Ori".to_string(),
            genre: "folk".to_string(),
            tags: vec![],
            audio_url: "https://cdn.example/s1.mp3".to_string(),
            cover_url: "https://cdn.example/s1.jpg".to_string(),
            prompt: String::new(),
            is_cover: false,
            original_url: None,
            created_at: Utc::now(),
            duration: 95.0,
            visible: false,
            pinned: false,
        }
    }

    #[test]
    fn projection_keeps_player_fields() {
        let track = Track::from(&song());
        assert_eq!(track.id.as_str(), "s1");
        assert_eq!(track.audio_locator, "https://cdn.example/s1.mp3");
        assert_eq!(track.cover_locator, "https://cdn.example/s1.jpg");
        assert_eq!(track.duration_hint, Some(Duration::from_secs(95)));
    }

    #[test]
    fn snapshot_is_independent_of_later_catalog_edits() {
        let mut record = song();
        let track = Track::from(&record);

        record.title = "Lanterns (edit)".to_string();
        record.audio_url = "https://cdn.example/s1-v2.mp3".to_string();

        assert_eq!(track.title, "Lanterns");
        assert_eq!(track.audio_locator, "https://cdn.example/s1.mp3");
    }

    #[test]
    fn builder_sets_display_fields() {
        let track = Track::new("t1", "mem://t1")
            .with_title("One")
            .with_artist("Someone")
            .with_duration_hint(Duration::from_secs(60));

        assert_eq!(track.title, "One");
        assert_eq!(track.artist, "Someone");
        assert_eq!(track.duration_hint, Some(Duration::from_secs(60)));
        assert!(track.cover_locator.is_empty());
    }
}
