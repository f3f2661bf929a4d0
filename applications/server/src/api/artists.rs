/// Artists API routes
use super::PageParams;
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tempo_core::{Artist, ArtistDetail, ArtistId};
use tempo_storage::artists;

/// GET /api/artists
pub async fn list_artists(
    State(app_state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Artist>>> {
    Ok(Json(artists::list(&app_state.db, params.into()).await?))
}

/// GET /api/artists/:id
/// Artist with their tracks (most played first) and albums (newest first)
pub async fn get_artist(
    Path(id): Path<ArtistId>,
    State(app_state): State<AppState>,
) -> Result<Json<ArtistDetail>> {
    let artist = artists::get_detail(&app_state.db, id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Artist not found".to_string()))?;

    Ok(Json(artist))
}
