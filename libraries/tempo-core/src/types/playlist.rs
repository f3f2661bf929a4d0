/// Playlist domain types
use crate::types::{PlaylistId, Track, UserId};
use serde::{Deserialize, Serialize};

/// Playlist summary (as listed in "my playlists")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: PlaylistId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub is_public: bool,
    pub track_count: i64,
    pub created_at: String,
}

/// Public identity of a playlist owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistOwner {
    pub username: String,
    pub display_name: Option<String>,
}

/// A track inside a playlist
///
/// `position` is the ordering key: strictly increasing in insertion order,
/// never renumbered when a track is removed, so gaps are expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTrack {
    #[serde(flatten)]
    pub track: Track,
    pub position: i64,
    pub added_at: String,
}

/// Playlist page: metadata, owner and tracks ordered by position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub owner: PlaylistOwner,
    pub tracks: Vec<PlaylistTrack>,
}

/// Data for creating a playlist
#[derive(Debug, Clone)]
pub struct CreatePlaylist {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
}

/// Partial playlist update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaylist {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

impl UpdatePlaylist {
    /// True when the update would not change anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_public.is_none()
    }
}
