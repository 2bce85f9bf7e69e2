//! Play queue
//!
//! An ordered list of tracks plus a cursor. The cursor is `Some` exactly when
//! the queue is non-empty, and always indexes a real entry.

use harmonic_core::{Track, TrackId};
use rand::Rng;

/// Ordered tracks with a cursor
///
/// ```text
/// tracks:  [ T1 ][ T2 ][ T3 ][ T4 ]
/// cursor:          ^ (Some(1))
/// ```
///
/// Duplicate ids are allowed. Order never changes behind the caller's back;
/// shuffle only affects which index gets picked next.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue, pointing the cursor at `start`
    ///
    /// An out-of-range `start` falls back to 0. Tracks and cursor change
    /// together, so no caller ever sees the old cursor on the new list.
    pub fn replace(&mut self, tracks: Vec<Track>, start: usize) {
        self.cursor = if tracks.is_empty() {
            None
        } else if start < tracks.len() {
            Some(start)
        } else {
            Some(0)
        };
        self.tracks = tracks;
    }

    /// Append a track without moving the cursor
    ///
    /// The first track pushed onto an empty queue becomes the cursor target.
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Track under the cursor
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|i| self.tracks.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Move the cursor; returns false (and leaves it alone) when out of range
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    /// First position of a track id
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Index after the cursor, wrapping to the start
    pub fn next_index(&self) -> Option<usize> {
        let cursor = self.cursor?;
        Some((cursor + 1) % self.tracks.len())
    }

    /// Index before the cursor, wrapping to the end
    pub fn previous_index(&self) -> Option<usize> {
        let cursor = self.cursor?;
        Some(if cursor == 0 {
            self.tracks.len() - 1
        } else {
            cursor - 1
        })
    }

    /// Uniform draw over every index, the current one included
    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        crate::shuffle::random_index(self.tracks.len(), rng)
    }

    /// Whether the cursor sits on the last entry
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor + 1 == self.tracks.len())
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
