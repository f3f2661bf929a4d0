//! Tempo Client
//!
//! HTTP client library for the Tempo server API, plus the player session
//! that connects the playback engine to play reporting.
//!
//! # Features
//!
//! - **Authentication**: register, login, token refresh, auto-retry on 401
//! - **Catalog**: tracks, artists, albums, playlists, search
//! - **Library**: playlists, favorites, listening history
//! - **Playback**: `PlayerSession` reports every started track
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tempo_client::{to_queue, ClientConfig, PlayerSession, TempoClient};
//! use tempo_playback::PlaybackConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TempoClient::new(ClientConfig::new("http://localhost:5000"))?;
//!     client.login("demo@example.com", "password123").await?;
//!
//!     let album = client.album(1).await?;
//!     let mut session = PlayerSession::new(Arc::new(client), PlaybackConfig::default());
//!     session.play_collection(to_queue(album.tracks), 0);
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
mod client;
mod error;
mod library;
mod response;
mod session;
mod types;

pub use client::TempoClient;
pub use error::{ClientError, Result};
pub use session::{clamp_volume, to_queue, to_queue_track, PlayReporter, PlayerSession};
pub use types::{
    AddTrackResponse, AuthResponse, ClientConfig, HealthResponse, NewPlaylist, PlayRecorded,
    PlaylistChanges, RefreshTokenResponse, RegisterRequest, SuccessResponse,
};

pub use auth::AuthClient;
pub use catalog::CatalogClient;
pub use library::LibraryClient;
