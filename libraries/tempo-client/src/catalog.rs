//! Public catalog endpoints (no authentication).

use crate::error::Result;
use crate::response::{json, send_error};
use reqwest::Client;
use serde::Serialize;
use tempo_core::{
    Album, AlbumDetail, AlbumId, Artist, ArtistDetail, ArtistId, Page, PlaylistDetail, PlaylistId,
    SearchKind, SearchResults, Track, TrackId,
};
use tracing::debug;

#[derive(Serialize)]
struct LimitQuery {
    limit: u32,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    #[serde(rename = "type")]
    kind: SearchKind,
}

/// Catalog client: tracks, artists, albums, public playlists and search.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>, what: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}/api{}", self.base_url, path);
        debug!(url = %url, "Fetching {}", what);

        let mut request = self.http.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await.map_err(send_error)?;
        json(response, what).await
    }

    /// Newest tracks first.
    pub async fn tracks(&self, page: Page) -> Result<Vec<Track>> {
        self.get("/tracks", Some(&page), "tracks").await
    }

    /// Most played tracks first.
    pub async fn popular_tracks(&self, limit: u32) -> Result<Vec<Track>> {
        self.get("/tracks/popular", Some(&LimitQuery { limit }), "popular tracks")
            .await
    }

    pub async fn track(&self, id: TrackId) -> Result<Track> {
        self.get::<_, ()>(&format!("/tracks/{}", id), None, "track")
            .await
    }

    pub async fn artists(&self, page: Page) -> Result<Vec<Artist>> {
        self.get("/artists", Some(&page), "artists").await
    }

    /// Artist with their tracks and albums.
    pub async fn artist(&self, id: ArtistId) -> Result<ArtistDetail> {
        self.get::<_, ()>(&format!("/artists/{}", id), None, "artist")
            .await
    }

    pub async fn albums(&self, page: Page) -> Result<Vec<Album>> {
        self.get("/albums", Some(&page), "albums").await
    }

    /// Album with its tracks.
    pub async fn album(&self, id: AlbumId) -> Result<AlbumDetail> {
        self.get::<_, ()>(&format!("/albums/{}", id), None, "album")
            .await
    }

    /// Playlist with owner and tracks in position order.
    pub async fn playlist(&self, id: PlaylistId) -> Result<PlaylistDetail> {
        self.get::<_, ()>(&format!("/playlists/{}", id), None, "playlist")
            .await
    }

    /// Case-insensitive search, capped per category by the server.
    pub async fn search(&self, q: &str, kind: SearchKind) -> Result<SearchResults> {
        self.get("/search", Some(&SearchQuery { q, kind }), "search results")
            .await
    }
}
