//! Harmonic Archive Core
//!
//! Catalog domain types, the player-facing track projection, and the
//! catalog query boundary shared by the player and its UI collaborators.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song` (catalog record), `Track` (player projection), `Playlist`
//! - **Catalog Boundary**: the `Catalog` trait and an in-memory `MemoryCatalog`
//! - **Error Handling**: unified `HarmonicError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use harmonic_core::{Catalog, MemoryCatalog, PageRequest, Track, TrackFilter};
//!
//! let json = r#"{ "songs": [{
//!     "id": "s1", "title": "Aurora", "artist": "Nova", "genre": "ambient",
//!     "tags": [], "audioUrl": "https://cdn.example/s1.mp3",
//!     "coverUrl": "https://cdn.example/s1.jpg", "prompt": "", "isCover": false,
//!     "createdAt": "2024-05-01T12:00:00Z", "duration": 212.0, "visible": true
//! }] }"#;
//!
//! let catalog = MemoryCatalog::from_json_reader(json.as_bytes()).unwrap();
//! let page = catalog
//!     .list_tracks(&TrackFilter::default(), PageRequest::default())
//!     .unwrap();
//!
//! let tracks: Vec<Track> = page.items.iter().map(Track::from).collect();
//! assert_eq!(tracks[0].audio_locator, "https://cdn.example/s1.mp3");
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod memory;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, Page, PageRequest, SortOrder, TrackFilter};
pub use error::{HarmonicError, Result};
pub use memory::MemoryCatalog;
pub use types::{Playlist, PlaylistId, Song, Track, TrackId};
