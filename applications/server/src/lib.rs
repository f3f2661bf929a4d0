//! Tempo Server Library
//!
//! Music streaming API: catalog browsing, playlists, favorites, listening
//! history and JWT authentication over a SQLite catalog.
//!
//! This library exposes the router and its components so the binary and
//! the integration tests build exactly the same application.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{FieldError, Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application: `/api`, static media and the web UI
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh))
        // Catalog
        .route("/tracks", get(api::tracks::list_tracks))
        .route("/tracks/popular", get(api::tracks::popular_tracks))
        .route("/tracks/:id", get(api::tracks::get_track))
        .route("/artists", get(api::artists::list_artists))
        .route("/artists/:id", get(api::artists::get_artist))
        .route("/albums", get(api::albums::list_albums))
        .route("/albums/:id", get(api::albums::get_album))
        .route("/playlists/:id", get(api::playlists::get_playlist))
        .route("/search", get(api::search::search));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/me", get(api::auth::me))
        .route("/tracks/:id/play", post(api::tracks::record_play))
        // Playlists
        .route("/playlists/my-playlists", get(api::playlists::my_playlists))
        .route("/playlists", post(api::playlists::create_playlist))
        .route("/playlists/:id", put(api::playlists::update_playlist))
        .route("/playlists/:id", delete(api::playlists::delete_playlist))
        .route(
            "/playlists/:id/tracks",
            post(api::playlists::add_track_to_playlist),
        )
        .route(
            "/playlists/:id/tracks/:track_id",
            delete(api::playlists::remove_track_from_playlist),
        )
        // Library
        .route("/users/favorites", get(api::users::list_favorites))
        .route("/users/favorites/:track_id", post(api::users::add_favorite))
        .route(
            "/users/favorites/:track_id",
            delete(api::users::remove_favorite),
        )
        .route("/users/history", get(api::users::history))
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    let api_routes = public_routes
        .merge(protected_routes)
        .fallback(api_not_found);

    // Static file serving for web UI (SPA with fallback to index.html)
    let web_dir = config.storage.web_dir.clone();
    let spa_fallback = move |req: Request<Body>| {
        let web_dir = web_dir.clone();
        async move {
            let path = req.uri().path().trim_start_matches('/');
            let file_path = web_dir.join(path);

            if !path.is_empty() && file_path.is_file() {
                match ServeDir::new(&web_dir).oneshot(req).await {
                    Ok(res) => res.into_response(),
                    Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                }
            } else {
                match tokio::fs::read(web_dir.join("index.html")).await {
                    Ok(contents) => (
                        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                        contents,
                    )
                        .into_response(),
                    // No web UI available
                    Err(_) => StatusCode::NOT_FOUND.into_response(),
                }
            }
        }
    };

    let storage = &config.storage;
    Router::new()
        .nest("/api", api_routes)
        .nest_service("/music", ServeDir::new(&storage.music_dir))
        .nest_service("/uploads", ServeDir::new(&storage.uploads_dir))
        .fallback(spa_fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(cors_layer(config.server.cors_origin.as_deref()))
        .with_state(app_state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    match origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

async fn api_not_found() -> ServerError {
    ServerError::NotFound("Route not found".to_string())
}
