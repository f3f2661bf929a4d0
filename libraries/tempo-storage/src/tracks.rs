//! Track slice: catalog listing, lookups and play recording

use crate::rows::{like_pattern, track_query, TrackRow};
use sqlx::SqlitePool;
use tempo_core::{error::Result, AlbumId, ArtistId, Page, TempoError, Track, TrackId, UserId};

/// Newest tracks first
pub async fn list(pool: &SqlitePool, page: Page) -> Result<Vec<Track>> {
    let sql = track_query("", "ORDER BY t.created_at DESC, t.id DESC LIMIT ? OFFSET ?");
    let rows: Vec<TrackRow> = sqlx::query_as(&sql)
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(TrackRow::into_domain).collect())
}

/// Most played tracks first
pub async fn popular(pool: &SqlitePool, limit: u32) -> Result<Vec<Track>> {
    let sql = track_query("", "ORDER BY t.play_count DESC, t.id ASC LIMIT ?");
    let rows: Vec<TrackRow> = sqlx::query_as(&sql)
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(TrackRow::into_domain).collect())
}

/// Get track by ID
pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let sql = track_query("", "WHERE t.id = ?");
    let row: Option<TrackRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;

    Ok(row.map(TrackRow::into_domain))
}

/// Tracks of one artist, most played first
pub async fn by_artist(pool: &SqlitePool, artist_id: ArtistId) -> Result<Vec<Track>> {
    let sql = track_query("", "WHERE t.artist_id = ? ORDER BY t.play_count DESC, t.id ASC");
    let rows: Vec<TrackRow> = sqlx::query_as(&sql)
        .bind(artist_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(TrackRow::into_domain).collect())
}

/// Tracks of one album in catalog (id) order
pub async fn by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Track>> {
    let sql = track_query("", "WHERE t.album_id = ? ORDER BY t.id ASC");
    let rows: Vec<TrackRow> = sqlx::query_as(&sql)
        .bind(album_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(TrackRow::into_domain).collect())
}

/// Case-insensitive title match, most played first
pub async fn search(pool: &SqlitePool, term: &str, limit: u32) -> Result<Vec<Track>> {
    let sql = track_query(
        "",
        "WHERE LOWER(t.title) LIKE LOWER(?) ORDER BY t.play_count DESC, t.id ASC LIMIT ?",
    );
    let rows: Vec<TrackRow> = sqlx::query_as(&sql)
        .bind(like_pattern(term))
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(TrackRow::into_domain).collect())
}

/// Record one play of a track by a user
///
/// Increments the track's play counter and appends a listening-history row
/// in a single transaction; neither change is visible unless both succeed.
/// Returns the new play count.
pub async fn record_play(pool: &SqlitePool, track_id: TrackId, user_id: UserId) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let play_count: Option<i64> = sqlx::query_scalar(
        "UPDATE tracks SET play_count = play_count + 1 WHERE id = ? RETURNING play_count",
    )
    .bind(track_id)
    .fetch_optional(&mut *tx)
    .await?;

    // Dropping the transaction rolls it back
    let Some(play_count) = play_count else {
        return Err(TempoError::not_found("Track", track_id));
    };

    sqlx::query("INSERT INTO listening_history (user_id, track_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(track_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(track_id, user_id, play_count, "Recorded play");
    Ok(play_count)
}

/// Data for inserting a catalog track
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub title: String,
    pub artist_id: ArtistId,
    pub album_id: Option<AlbumId>,
    pub duration: u32,
    pub file_url: String,
    pub cover_url: Option<String>,
    pub play_count: i64,
}

/// Insert a catalog track
pub async fn create(pool: &SqlitePool, track: NewTrack) -> Result<TrackId> {
    let result = sqlx::query(
        r#"
        INSERT INTO tracks (title, artist_id, album_id, duration, file_url, cover_url, play_count)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&track.title)
    .bind(track.artist_id)
    .bind(track.album_id)
    .bind(i64::from(track.duration))
    .bind(&track.file_url)
    .bind(&track.cover_url)
    .bind(track.play_count)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Whether a track with this id exists
pub async fn exists(pool: &SqlitePool, id: TrackId) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM tracks WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}
