//! Domain types shared by the catalog and the player

mod ids;
mod playlist;
mod song;
mod track;

pub use ids::{PlaylistId, TrackId};
pub use playlist::Playlist;
pub use song::Song;
pub use track::Track;
