//! Catalog search across tracks, artists and albums

use crate::{albums, artists, tracks};
use sqlx::SqlitePool;
use tempo_core::{error::Result, SearchKind, SearchResults};

/// Maximum results returned per category
pub const RESULTS_PER_CATEGORY: u32 = 20;

/// Case-insensitive substring search
///
/// Categories excluded by `kind` come back empty.
pub async fn search(pool: &SqlitePool, term: &str, kind: SearchKind) -> Result<SearchResults> {
    let mut results = SearchResults::default();

    if kind.includes_tracks() {
        results.tracks = tracks::search(pool, term, RESULTS_PER_CATEGORY).await?;
    }
    if kind.includes_artists() {
        results.artists = artists::search(pool, term, RESULTS_PER_CATEGORY).await?;
    }
    if kind.includes_albums() {
        results.albums = albums::search(pool, term, RESULTS_PER_CATEGORY).await?;
    }

    tracing::debug!(
        term,
        tracks = results.tracks.len(),
        artists = results.artists.len(),
        albums = results.albums.len(),
        "Search completed"
    );

    Ok(results)
}
