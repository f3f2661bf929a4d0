//! Track types
//!
//! A `Track` is immutable once fetched; the play counter is only changed by
//! the server when a play is recorded.

use crate::types::{AlbumId, ArtistId, TrackId};
use serde::{Deserialize, Serialize};

/// Reference to the performing artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRef {
    pub id: ArtistId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Reference to the album a track belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRef {
    pub id: AlbumId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// A playable track with denormalized artist/album references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    /// Length in whole seconds
    pub duration: u32,
    /// Media locator handed to the audio element
    pub file_url: String,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub play_count: i64,
    pub artist: ArtistRef,
    pub album: Option<AlbumRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
