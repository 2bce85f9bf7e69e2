//! In-memory catalog
//!
//! Backs the `Catalog` trait with plain vectors. Used by the CLI (loaded from
//! a JSON export) and by tests.

use crate::catalog::{Catalog, Page, PageRequest, SortOrder, TrackFilter};
use crate::error::{HarmonicError, Result};
use crate::types::{Playlist, PlaylistId, Song, Track, TrackId};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;

/// JSON export layout accepted by [`MemoryCatalog::from_json_reader`]
#[derive(Debug, Deserialize)]
struct CatalogFile {
    songs: Vec<Song>,
    #[serde(default)]
    playlists: Vec<Playlist>,
}

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    songs: Vec<Song>,
    playlists: Vec<Playlist>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from songs and playlists
    pub fn with_contents(songs: Vec<Song>, playlists: Vec<Playlist>) -> Self {
        let mut catalog = Self::new();
        for song in songs {
            catalog.insert_song(song);
        }
        catalog.playlists = playlists;
        catalog
    }

    /// Load a catalog from a JSON export (`{ "songs": [...], "playlists": [...] }`)
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let file: CatalogFile = serde_json::from_reader(reader)?;
        let catalog = Self::with_contents(file.songs, file.playlists);

        tracing::debug!(
            "Loaded catalog: {} songs, {} playlists",
            catalog.songs.len(),
            catalog.playlists.len()
        );

        Ok(catalog)
    }

    /// Insert a song, replacing any existing song with the same id
    pub fn insert_song(&mut self, song: Song) {
        if let Some(existing) = self.songs.iter_mut().find(|s| s.id == song.id) {
            *existing = song;
        } else {
            self.songs.push(song);
        }
    }

    /// Insert a playlist, replacing any existing playlist with the same id
    pub fn insert_playlist(&mut self, playlist: Playlist) {
        if let Some(existing) = self.playlists.iter_mut().find(|p| p.id == playlist.id) {
            *existing = playlist;
        } else {
            self.playlists.push(playlist);
        }
    }

    /// Number of songs (including hidden ones)
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// All playlists
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    fn find_song(&self, id: &TrackId) -> Option<&Song> {
        self.songs.iter().find(|s| &s.id == id)
    }
}

fn sort_songs(songs: &mut [Song], order: SortOrder) {
    match order {
        SortOrder::Newest => songs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => songs.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Title => songs.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOrder::Artist => songs.sort_by(|a, b| a.artist.cmp(&b.artist)),
        SortOrder::Duration => songs.sort_by(|a, b| b.duration.total_cmp(&a.duration)),
    }
}

impl Catalog for MemoryCatalog {
    fn list_tracks(&self, filter: &TrackFilter, page: PageRequest) -> Result<Page<Song>> {
        let request = page.normalized(filter.max_limit());
        let needle = filter.search_needle();
        let genre = filter.genre_filter();

        let mut matching: Vec<Song> = self
            .songs
            .iter()
            .filter(|s| filter.include_hidden || s.visible)
            .filter(|s| !filter.pinned_only || s.pinned)
            .filter(|s| needle.as_deref().map_or(true, |n| s.matches_search(n)))
            .filter(|s| genre.map_or(true, |g| s.genre == g))
            .cloned()
            .collect();

        sort_songs(&mut matching, filter.sort);

        Ok(Page::from_sorted(matching, request))
    }

    fn get_track_by_id(&self, id: &TrackId) -> Result<Option<Song>> {
        Ok(self.find_song(id).cloned())
    }

    fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        Ok(self.playlists.iter().find(|p| &p.id == id).cloned())
    }

    fn playlist_tracks(&self, id: &PlaylistId) -> Result<Vec<Track>> {
        let playlist = self
            .playlists
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| HarmonicError::PlaylistNotFound(id.clone()))?;

        let tracks: Vec<Track> = playlist
            .song_ids
            .iter()
            .filter_map(|song_id| self.find_song(song_id))
            .filter(|s| s.visible)
            .map(Track::from)
            .collect();

        if tracks.len() < playlist.song_ids.len() {
            tracing::debug!(
                "Playlist {} resolved {} of {} songs",
                id,
                tracks.len(),
                playlist.song_ids.len()
            );
        }

        Ok(tracks)
    }

    fn genres(&self) -> Result<Vec<String>> {
        let genres: BTreeSet<&str> = self
            .songs
            .iter()
            .filter(|s| s.visible && !s.genre.is_empty())
            .map(|s| s.genre.as_str())
            .collect();

        Ok(genres.into_iter().map(str::to_string).collect())
    }
}
