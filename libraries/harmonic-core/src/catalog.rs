//! Catalog query boundary
//!
//! The player never calls the catalog itself. UI code lists or looks up
//! songs here, projects them into `Track`s and hands those to the player.

use crate::error::Result;
use crate::types::{Playlist, PlaylistId, Song, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Default page size
pub const DEFAULT_PAGE_LIMIT: u32 = 40;

/// Largest page a public listing may request
pub const PUBLIC_MAX_LIMIT: u32 = 100;

/// Largest page an admin listing may request
pub const ADMIN_MAX_LIMIT: u32 = 500;

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently added first
    #[default]
    Newest,

    /// Oldest first
    Oldest,

    /// Title A-Z
    Title,

    /// Artist A-Z
    Artist,

    /// Longest first
    Duration,
}

/// Filter applied to a song listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackFilter {
    /// Case-insensitive substring over title or artist
    pub search: Option<String>,

    /// Exact genre; `None` or `"all"` disables the filter
    pub genre: Option<String>,

    /// Only pinned songs
    pub pinned_only: bool,

    /// Include songs hidden from visitors (admin view)
    pub include_hidden: bool,

    /// Listing order
    pub sort: SortOrder,
}

impl TrackFilter {
    /// Filter matching `search` against title and artist
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Self::default()
        }
    }

    /// Largest page size this view may request
    pub fn max_limit(&self) -> u32 {
        if self.include_hidden {
            ADMIN_MAX_LIMIT
        } else {
            PUBLIC_MAX_LIMIT
        }
    }

    /// Active genre filter, if any
    pub fn genre_filter(&self) -> Option<&str> {
        self.genre
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty() && *g != "all")
    }

    /// Lowercased, trimmed search needle, if any
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Requested page (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Clamp page to at least 1 and limit to `[1, max_limit]`
    pub fn normalized(self, max_limit: u32) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, max_limit),
        }
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Slice `all` according to an already-normalized request
    pub fn from_sorted(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let limit = request.limit.max(1) as usize;
        let total_pages = total.div_ceil(limit) as u32;
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(limit)
            .collect();

        Self {
            items,
            total,
            page: request.page,
            total_pages,
        }
    }
}

/// Paginated song catalog
///
/// Implementations back onto whatever store hosts the archive. Lookups that
/// find nothing return `Ok(None)`; errors are reserved for backend failures.
pub trait Catalog {
    /// List songs matching `filter`, one page at a time
    fn list_tracks(&self, filter: &TrackFilter, page: PageRequest) -> Result<Page<Song>>;

    /// Look up a single song
    fn get_track_by_id(&self, id: &TrackId) -> Result<Option<Song>>;

    /// Look up a playlist
    fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Resolve a playlist into playable tracks, in playlist order
    ///
    /// Ids with no matching song, and songs hidden from visitors, are skipped.
    fn playlist_tracks(&self, id: &PlaylistId) -> Result<Vec<Track>>;

    /// Distinct genres of visible songs, sorted
    fn genres(&self) -> Result<Vec<String>>;
}
