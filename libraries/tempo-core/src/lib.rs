//! Tempo Core
//!
//! Domain types and error handling shared by every Tempo crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Catalog entities**: `Track`, `Artist`, `Album`, `Playlist`, `User`
//! - **Library entities**: `FavoriteTrack`, `HistoryEntry`
//! - **Query helpers**: `Page`, `SearchKind`, `SearchResults`
//! - **Error Handling**: unified `TempoError` and `Result` types
//!
//! It has no knowledge of SQL or HTTP; `tempo-storage` maps rows into these
//! types and `tempo-server` serializes them.
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{Page, SearchKind};
//!
//! let page = Page::new(Some(10), None);
//! assert_eq!(page.limit, 10);
//! assert_eq!(page.offset, 0);
//!
//! let kind: SearchKind = "artists".parse().unwrap();
//! assert!(kind.includes_artists());
//! assert!(!kind.includes_tracks());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{Result, TempoError};

pub use types::{
    // Catalog
    Album, AlbumDetail, AlbumId, AlbumRef, AlbumSummary, Artist, ArtistDetail, ArtistId,
    ArtistRef, Track, TrackId,
    // Playlists
    CreatePlaylist, Playlist, PlaylistDetail, PlaylistId, PlaylistOwner, PlaylistTrack,
    UpdatePlaylist,
    // Users and their library
    CreateUser, FavoriteTrack, HistoryEntry, User, UserId,
    // Queries
    Page, SearchKind, SearchResults,
};
