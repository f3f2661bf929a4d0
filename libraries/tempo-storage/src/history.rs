//! Listening history slice
//!
//! Rows are written by [`crate::tracks::record_play`]; this module only reads.

use crate::rows::{track_query, TrackRow};
use sqlx::{FromRow, SqlitePool};
use tempo_core::{error::Result, HistoryEntry, UserId};

/// Default number of history entries returned
pub const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, FromRow)]
struct HistoryRow {
    #[sqlx(flatten)]
    track: TrackRow,
    played_at: String,
}

/// A user's most recent plays, newest first
///
/// A track played several times appears once per play.
pub async fn recent(pool: &SqlitePool, user_id: UserId, limit: u32) -> Result<Vec<HistoryEntry>> {
    let sql = track_query(
        "lh.played_at",
        "INNER JOIN listening_history lh ON lh.track_id = t.id \
         WHERE lh.user_id = ? ORDER BY lh.played_at DESC, lh.id DESC LIMIT ?",
    );
    let rows: Vec<HistoryRow> = sqlx::query_as(&sql)
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| HistoryEntry {
            track: row.track.into_domain(),
            played_at: row.played_at,
        })
        .collect())
}
