//! Playlist domain type

use crate::types::{PlaylistId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Curated, ordered list of songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Description shown on the playlist page
    #[serde(default)]
    pub description: String,

    /// Cover art URL
    #[serde(default)]
    pub cover_url: String,

    /// Song ids in play order
    #[serde(default)]
    pub song_ids: Vec<TrackId>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
