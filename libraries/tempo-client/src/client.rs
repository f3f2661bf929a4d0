//! Main Tempo client.

use crate::auth::AuthClient;
use crate::catalog::CatalogClient;
use crate::error::{ClientError, Result};
use crate::library::LibraryClient;
use crate::response::{json, send_error};
use crate::types::{
    AddTrackResponse, AuthResponse, ClientConfig, HealthResponse, NewPlaylist, PlayRecorded,
    PlaylistChanges, RefreshTokenResponse, RegisterRequest, SuccessResponse,
};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tempo_core::{
    Album, AlbumDetail, AlbumId, Artist, ArtistDetail, ArtistId, FavoriteTrack, HistoryEntry,
    Page, Playlist, PlaylistDetail, PlaylistId, SearchKind, SearchResults, Track, TrackId, User,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Client for a Tempo server.
///
/// Holds the HTTP connection pool and the stored tokens. Cloning is cheap
/// and clones share tokens.
///
/// # Example
///
/// ```ignore
/// use tempo_client::{ClientConfig, TempoClient};
/// use tempo_core::SearchKind;
///
/// let client = TempoClient::new(ClientConfig::new("http://localhost:5000"))?;
/// client.login("demo@example.com", "password123").await?;
///
/// let results = client.search("midnight", SearchKind::Tracks).await?;
/// let favorites = client.favorites().await?;
/// ```
#[derive(Clone)]
pub struct TempoClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl TempoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed = Url::parse(&config.url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let normalized_config = ClientConfig {
            url: config.url.trim_end_matches('/').to_string(),
            ..config
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Tempo/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Check that the server is up. Does not require authentication.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/api/health", self.url().await);
        debug!(url = %url, "Checking server health");

        let response = self.http.get(&url).send().await.map_err(send_error)?;
        json(response, "health response").await
    }

    // ===== Authentication =====

    /// Login with email and password; tokens are stored on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = self.url().await;
        let response = AuthClient::new(&self.http, &url).login(email, password).await?;
        self.store_tokens(&response.token, &response.refresh_token)
            .await;
        Ok(response)
    }

    /// Register a new account; tokens are stored on success.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let url = self.url().await;
        let response = AuthClient::new(&self.http, &url).register(request).await?;
        self.store_tokens(&response.token, &response.refresh_token)
            .await;
        Ok(response)
    }

    /// Refresh the access token using the stored refresh token.
    pub async fn refresh_token(&self) -> Result<RefreshTokenResponse> {
        let config = self.config.read().await;
        let refresh_token = config
            .refresh_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = config.url.clone();
        drop(config);

        let response = AuthClient::new(&self.http, &url)
            .refresh_token(&refresh_token)
            .await?;
        self.store_tokens(&response.token, &response.refresh_token)
            .await;
        Ok(response)
    }

    /// The logged-in user.
    pub async fn current_user(&self) -> Result<User> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = config.url.clone();
        drop(config);

        AuthClient::new(&self.http, &url)
            .current_user(&access_token)
            .await
    }

    /// Set tokens directly (e.g. from stored credentials).
    pub async fn set_tokens(&self, access_token: String, refresh_token: Option<String>) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token);
        config.refresh_token = refresh_token;
    }

    /// Get the current tokens.
    pub async fn get_tokens(&self) -> (Option<String>, Option<String>) {
        let config = self.config.read().await;
        (config.access_token.clone(), config.refresh_token.clone())
    }

    /// Clear stored tokens.
    pub async fn logout(&self) {
        let mut config = self.config.write().await;
        config.access_token = None;
        config.refresh_token = None;
        info!("Logged out");
    }

    async fn store_tokens(&self, access_token: &str, refresh_token: &str) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token.to_string());
        config.refresh_token = Some(refresh_token.to_string());
    }

    // ===== Catalog =====

    /// Newest tracks first.
    pub async fn tracks(&self, page: Page) -> Result<Vec<Track>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).tracks(page).await
    }

    /// Most played tracks first.
    pub async fn popular_tracks(&self, limit: u32) -> Result<Vec<Track>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url)
            .popular_tracks(limit)
            .await
    }

    pub async fn track(&self, id: TrackId) -> Result<Track> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).track(id).await
    }

    pub async fn artists(&self, page: Page) -> Result<Vec<Artist>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).artists(page).await
    }

    pub async fn artist(&self, id: ArtistId) -> Result<ArtistDetail> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).artist(id).await
    }

    pub async fn albums(&self, page: Page) -> Result<Vec<Album>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).albums(page).await
    }

    pub async fn album(&self, id: AlbumId) -> Result<AlbumDetail> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).album(id).await
    }

    pub async fn playlist(&self, id: PlaylistId) -> Result<PlaylistDetail> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).playlist(id).await
    }

    pub async fn search(&self, q: &str, kind: SearchKind) -> Result<SearchResults> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).search(q, kind).await
    }

    // ===== Library (authenticated) =====

    /// Get a library client bound to the current access token.
    ///
    /// Returns an error if not authenticated.
    pub async fn library(&self) -> Result<LibraryClient> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;

        Ok(LibraryClient::new(
            self.http.clone(),
            config.url.clone(),
            access_token,
        ))
    }

    /// Run a library operation, refreshing the token and retrying once if
    /// the server rejects the access token.
    pub async fn with_auto_refresh<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn(LibraryClient) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match operation(self.library().await?).await {
            Err(ClientError::AuthRequired) => {
                if self.config.read().await.refresh_token.is_none() {
                    return Err(ClientError::AuthRequired);
                }

                warn!("Access token rejected, attempting refresh");
                self.refresh_token().await?;
                operation(self.library().await?).await
            }
            other => other,
        }
    }

    pub async fn my_playlists(&self) -> Result<Vec<Playlist>> {
        self.with_auto_refresh(|lib| async move { lib.my_playlists().await })
            .await
    }

    pub async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        self.with_auto_refresh(|lib| async move { lib.create_playlist(playlist).await })
            .await
    }

    pub async fn update_playlist(
        &self,
        id: PlaylistId,
        changes: &PlaylistChanges,
    ) -> Result<Playlist> {
        self.with_auto_refresh(|lib| async move { lib.update_playlist(id, changes).await })
            .await
    }

    pub async fn delete_playlist(&self, id: PlaylistId) -> Result<SuccessResponse> {
        self.with_auto_refresh(|lib| async move { lib.delete_playlist(id).await })
            .await
    }

    pub async fn add_track_to_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<AddTrackResponse> {
        self.with_auto_refresh(|lib| async move {
            lib.add_track_to_playlist(playlist_id, track_id).await
        })
        .await
    }

    pub async fn remove_track_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<SuccessResponse> {
        self.with_auto_refresh(|lib| async move {
            lib.remove_track_from_playlist(playlist_id, track_id).await
        })
        .await
    }

    pub async fn favorites(&self) -> Result<Vec<FavoriteTrack>> {
        self.with_auto_refresh(|lib| async move { lib.favorites().await })
            .await
    }

    pub async fn add_favorite(&self, track_id: TrackId) -> Result<SuccessResponse> {
        self.with_auto_refresh(|lib| async move { lib.add_favorite(track_id).await })
            .await
    }

    pub async fn remove_favorite(&self, track_id: TrackId) -> Result<SuccessResponse> {
        self.with_auto_refresh(|lib| async move { lib.remove_favorite(track_id).await })
            .await
    }

    pub async fn history(&self, limit: u32) -> Result<Vec<HistoryEntry>> {
        self.with_auto_refresh(|lib| async move { lib.history(limit).await })
            .await
    }

    /// Record one play of a track for the logged-in user.
    pub async fn record_play(&self, track_id: TrackId) -> Result<PlayRecorded> {
        self.with_auto_refresh(|lib| async move { lib.record_play(track_id).await })
            .await
    }
}
