/// Per-user library routes: favorites and listening history
use super::{LimitParams, Success};
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tempo_core::{FavoriteTrack, HistoryEntry, TrackId};
use tempo_storage::{favorites, history};

/// GET /api/users/favorites
pub async fn list_favorites(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<FavoriteTrack>>> {
    Ok(Json(favorites::list(&app_state.db, auth.user_id()).await?))
}

/// POST /api/users/favorites/:track_id
pub async fn add_favorite(
    Path(track_id): Path<TrackId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Success>> {
    favorites::add(&app_state.db, auth.user_id(), track_id).await?;
    Ok(Json(Success::ok()))
}

/// DELETE /api/users/favorites/:track_id
pub async fn remove_favorite(
    Path(track_id): Path<TrackId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Success>> {
    favorites::remove(&app_state.db, auth.user_id(), track_id).await?;
    Ok(Json(Success::ok()))
}

/// GET /api/users/history
pub async fn history(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<HistoryEntry>>> {
    let limit = params.limit.unwrap_or(history::DEFAULT_LIMIT);
    Ok(Json(history::recent(&app_state.db, auth.user_id(), limit).await?))
}
