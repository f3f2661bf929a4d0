/// Tracks API routes
use super::{LimitParams, PageParams};
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use tempo_core::{Track, TrackId};
use tempo_storage::tracks;

const DEFAULT_POPULAR_LIMIT: u32 = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRecorded {
    pub success: bool,
    pub play_count: i64,
}

/// GET /api/tracks
/// Newest tracks first
pub async fn list_tracks(
    State(app_state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Track>>> {
    let tracks = tracks::list(&app_state.db, params.into()).await?;
    Ok(Json(tracks))
}

/// GET /api/tracks/popular
pub async fn popular_tracks(
    State(app_state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<Track>>> {
    let limit = params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    let tracks = tracks::popular(&app_state.db, limit).await?;
    Ok(Json(tracks))
}

/// GET /api/tracks/:id
pub async fn get_track(
    Path(id): Path<TrackId>,
    State(app_state): State<AppState>,
) -> Result<Json<Track>> {
    let track = tracks::get_by_id(&app_state.db, id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Track not found".to_string()))?;

    Ok(Json(track))
}

/// POST /api/tracks/:id/play
/// Count one play and add it to the caller's history
pub async fn record_play(
    Path(id): Path<TrackId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<PlayRecorded>> {
    let play_count = tracks::record_play(&app_state.db, id, auth.user_id()).await?;

    Ok(Json(PlayRecorded {
        success: true,
        play_count,
    }))
}
