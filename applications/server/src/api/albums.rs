/// Albums API routes
use super::PageParams;
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tempo_core::{Album, AlbumDetail, AlbumId};
use tempo_storage::albums;

/// GET /api/albums
pub async fn list_albums(
    State(app_state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Album>>> {
    Ok(Json(albums::list(&app_state.db, params.into()).await?))
}

/// GET /api/albums/:id
pub async fn get_album(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<AlbumDetail>> {
    let album = albums::get_detail(&app_state.db, id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Album not found".to_string()))?;

    Ok(Json(album))
}
