/// Playlists API routes
use super::Success;
use crate::{
    error::{FieldError, Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
    validation::Validator,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tempo_core::{CreatePlaylist, Playlist, PlaylistDetail, PlaylistId, TrackId, UpdatePlaylist};
use tempo_storage::playlists;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTrackRequest {
    pub track_id: Option<TrackId>,
}

#[derive(Debug, Serialize)]
pub struct TrackAdded {
    pub success: bool,
    pub position: i64,
}

const NAME_REQUIRED: &str = "Playlist name is required";

/// GET /api/playlists/my-playlists
/// Playlists owned by the caller, newest first
pub async fn my_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Playlist>>> {
    let playlists = playlists::list_for_user(&app_state.db, auth.user_id()).await?;
    Ok(Json(playlists))
}

/// POST /api/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Playlist>)> {
    Validator::new()
        .required("name", &req.name, NAME_REQUIRED)
        .finish()?;

    let playlist = playlists::create(
        &app_state.db,
        CreatePlaylist {
            user_id: auth.user_id(),
            name: req.name.trim().to_string(),
            description: req.description,
            is_public: req.is_public,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/playlists/:id
/// Playlist details with owner and tracks in position order
pub async fn get_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
) -> Result<Json<PlaylistDetail>> {
    let playlist = playlists::get_detail(&app_state.db, id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(playlist))
}

/// PUT /api/playlists/:id
/// Fields left out of the body keep their current value
pub async fn update_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(mut changes): Json<UpdatePlaylist>,
) -> Result<Json<Playlist>> {
    if let Some(name) = &changes.name {
        Validator::new()
            .required("name", name, NAME_REQUIRED)
            .finish()?;
        changes.name = Some(name.trim().to_string());
    }

    let playlist = playlists::update(&app_state.db, id, auth.user_id(), changes).await?;
    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Success>> {
    playlists::delete(&app_state.db, id, auth.user_id()).await?;
    Ok(Json(Success::ok()))
}

/// POST /api/playlists/:id/tracks
/// Append a track; adding one already present reports its existing position
pub async fn add_track_to_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<AddTrackRequest>,
) -> Result<Json<TrackAdded>> {
    let Some(track_id) = req.track_id else {
        return Err(ServerError::Validation(vec![FieldError::new(
            "trackId",
            "Track ID is required",
        )]));
    };

    let outcome = playlists::add_track(&app_state.db, id, track_id, auth.user_id()).await?;

    Ok(Json(TrackAdded {
        success: true,
        position: outcome.position(),
    }))
}

/// DELETE /api/playlists/:id/tracks/:track_id
pub async fn remove_track_from_playlist(
    Path((id, track_id)): Path<(PlaylistId, TrackId)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Success>> {
    playlists::remove_track(&app_state.db, id, track_id, auth.user_id()).await?;
    Ok(Json(Success::ok()))
}
