//! Artist types

use crate::types::{AlbumSummary, ArtistId, Track};
use serde::{Deserialize, Serialize};

/// An artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
}

/// Artist page: the artist, their tracks (most played first) and albums (newest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub tracks: Vec<Track>,
    pub albums: Vec<AlbumSummary>,
}
