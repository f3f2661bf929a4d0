//! Album types

use crate::types::{AlbumId, ArtistRef, Track};
use serde::{Deserialize, Serialize};

/// An album with its artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub cover_url: Option<String>,
    /// ISO date (`YYYY-MM-DD`)
    pub release_date: Option<String>,
    pub artist: ArtistRef,
    pub created_at: String,
}

/// Album as listed on an artist page (artist implied)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: AlbumId,
    pub title: String,
    pub cover_url: Option<String>,
    pub release_date: Option<String>,
}

/// Album page: the album and its tracks in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetail {
    #[serde(flatten)]
    pub album: Album,
    pub tracks: Vec<Track>,
}
