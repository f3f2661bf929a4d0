//! Favorites slice
//!
//! Adding and removing are idempotent.

use crate::rows::{track_query, TrackRow};
use sqlx::{FromRow, SqlitePool};
use tempo_core::{error::Result, FavoriteTrack, TempoError, TrackId, UserId};

#[derive(Debug, FromRow)]
struct FavoriteRow {
    #[sqlx(flatten)]
    track: TrackRow,
    favorited_at: String,
}

/// A user's favorite tracks, most recently favorited first
pub async fn list(pool: &SqlitePool, user_id: UserId) -> Result<Vec<FavoriteTrack>> {
    let sql = track_query(
        "uf.created_at AS favorited_at",
        "INNER JOIN user_favorites uf ON uf.track_id = t.id \
         WHERE uf.user_id = ? ORDER BY uf.created_at DESC, uf.id DESC",
    );
    let rows: Vec<FavoriteRow> = sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| FavoriteTrack {
            track: row.track.into_domain(),
            favorited_at: row.favorited_at,
        })
        .collect())
}

/// Mark a track as favorite; returns `false` if it already was
pub async fn add(pool: &SqlitePool, user_id: UserId, track_id: TrackId) -> Result<bool> {
    if !crate::tracks::exists(pool, track_id).await? {
        return Err(TempoError::not_found("Track", track_id));
    }

    let result = sqlx::query(
        "INSERT INTO user_favorites (user_id, track_id) VALUES (?, ?) \
         ON CONFLICT (user_id, track_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(track_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Unmark a favorite; returns `false` if it was not a favorite
pub async fn remove(pool: &SqlitePool, user_id: UserId, track_id: TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_favorites WHERE user_id = ? AND track_id = ?")
        .bind(user_id)
        .bind(track_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
