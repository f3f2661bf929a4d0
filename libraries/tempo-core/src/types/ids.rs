//! ID types for Tempo entities
//!
//! Every persisted entity is keyed by its `SQLite` row id.

/// User identifier
pub type UserId = i64;

/// Artist identifier
pub type ArtistId = i64;

/// Album identifier
pub type AlbumId = i64;

/// Track identifier
pub type TrackId = i64;

/// Playlist identifier
pub type PlaylistId = i64;
