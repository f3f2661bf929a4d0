//! User-scoped endpoints: playlists, favorites, history and play reporting.

use crate::error::Result;
use crate::response::{json, send_error};
use crate::types::{
    AddTrackRequest, AddTrackResponse, NewPlaylist, PlayRecorded, PlaylistChanges,
    SuccessResponse,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use tempo_core::{FavoriteTrack, HistoryEntry, Playlist, PlaylistId, TrackId};
use tracing::debug;

#[derive(Serialize)]
struct LimitQuery {
    limit: u32,
}

/// Library client carrying an access token.
///
/// Owns cheap clones of the HTTP client and credentials so that calls can be
/// retried after a token refresh.
#[derive(Clone)]
pub struct LibraryClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl LibraryClient {
    pub(crate) fn new(http: Client, base_url: String, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api{}", self.base_url, path);
        debug!(method = %method, url = %url, "Library request");
        self.http
            .request(method, url)
            .bearer_auth(&self.access_token)
    }

    /// Playlists owned by the current user.
    pub async fn my_playlists(&self) -> Result<Vec<Playlist>> {
        let response = self
            .request(Method::GET, "/playlists/my-playlists")
            .send()
            .await
            .map_err(send_error)?;
        json(response, "playlists").await
    }

    pub async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        let response = self
            .request(Method::POST, "/playlists")
            .json(playlist)
            .send()
            .await
            .map_err(send_error)?;
        json(response, "playlist").await
    }

    pub async fn update_playlist(
        &self,
        id: PlaylistId,
        changes: &PlaylistChanges,
    ) -> Result<Playlist> {
        let response = self
            .request(Method::PUT, &format!("/playlists/{}", id))
            .json(changes)
            .send()
            .await
            .map_err(send_error)?;
        json(response, "playlist").await
    }

    pub async fn delete_playlist(&self, id: PlaylistId) -> Result<SuccessResponse> {
        let response = self
            .request(Method::DELETE, &format!("/playlists/{}", id))
            .send()
            .await
            .map_err(send_error)?;
        json(response, "delete response").await
    }

    /// Append a track; the response carries its position.
    pub async fn add_track_to_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<AddTrackResponse> {
        let response = self
            .request(Method::POST, &format!("/playlists/{}/tracks", playlist_id))
            .json(&AddTrackRequest { track_id })
            .send()
            .await
            .map_err(send_error)?;
        json(response, "add track response").await
    }

    pub async fn remove_track_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<SuccessResponse> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/playlists/{}/tracks/{}", playlist_id, track_id),
            )
            .send()
            .await
            .map_err(send_error)?;
        json(response, "remove track response").await
    }

    pub async fn favorites(&self) -> Result<Vec<FavoriteTrack>> {
        let response = self
            .request(Method::GET, "/users/favorites")
            .send()
            .await
            .map_err(send_error)?;
        json(response, "favorites").await
    }

    pub async fn add_favorite(&self, track_id: TrackId) -> Result<SuccessResponse> {
        let response = self
            .request(Method::POST, &format!("/users/favorites/{}", track_id))
            .send()
            .await
            .map_err(send_error)?;
        json(response, "favorite response").await
    }

    pub async fn remove_favorite(&self, track_id: TrackId) -> Result<SuccessResponse> {
        let response = self
            .request(Method::DELETE, &format!("/users/favorites/{}", track_id))
            .send()
            .await
            .map_err(send_error)?;
        json(response, "favorite response").await
    }

    /// Most recent plays first.
    pub async fn history(&self, limit: u32) -> Result<Vec<HistoryEntry>> {
        let response = self
            .request(Method::GET, "/users/history")
            .query(&LimitQuery { limit })
            .send()
            .await
            .map_err(send_error)?;
        json(response, "history").await
    }

    /// Record one play of a track.
    pub async fn record_play(&self, track_id: TrackId) -> Result<PlayRecorded> {
        let response = self
            .request(Method::POST, &format!("/tracks/{}/play", track_id))
            .send()
            .await
            .map_err(send_error)?;
        json(response, "play response").await
    }
}
