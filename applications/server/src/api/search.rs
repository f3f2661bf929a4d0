/// Search API route
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tempo_core::{SearchKind, SearchResults};
use tempo_storage::search;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/search?q=&type=all
pub async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>> {
    let term = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Search query is required".to_string()))?;

    let kind: SearchKind = match params.kind.as_deref() {
        Some(kind) => kind.parse()?,
        None => SearchKind::All,
    };

    Ok(Json(search::search(&app_state.db, term, kind).await?))
}
