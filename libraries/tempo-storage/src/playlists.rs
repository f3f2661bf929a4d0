//! Playlist slice
//!
//! Track order inside a playlist is carried by `position`: a new track goes
//! to `1 + max(position)` (1 for an empty playlist), reads order by position
//! ascending, and removing a track leaves a gap rather than renumbering.

use crate::rows::{track_query, TrackRow};
use crate::tracks;
use sqlx::{FromRow, SqlitePool};
use tempo_core::{
    error::Result, CreatePlaylist, Playlist, PlaylistDetail, PlaylistId, PlaylistOwner,
    PlaylistTrack, TempoError, TrackId, UpdatePlaylist, UserId,
};

/// Attempts made when a concurrent append wins the same position
const MAX_APPEND_ATTEMPTS: u32 = 5;

const PLAYLIST_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.name, p.description, p.cover_url, p.is_public, p.created_at,
           COUNT(pt.id) AS track_count
    FROM playlists p
    LEFT JOIN playlist_tracks pt ON pt.playlist_id = p.id
"#;

#[derive(Debug, FromRow)]
struct PlaylistRow {
    id: i64,
    user_id: i64,
    name: String,
    description: Option<String>,
    cover_url: Option<String>,
    is_public: bool,
    created_at: String,
    track_count: i64,
}

impl PlaylistRow {
    fn into_domain(self) -> Playlist {
        Playlist {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            cover_url: self.cover_url,
            is_public: self.is_public,
            track_count: self.track_count,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct PlaylistTrackRow {
    #[sqlx(flatten)]
    track: TrackRow,
    position: i64,
    added_at: String,
}

#[derive(Debug, FromRow)]
struct OwnerRow {
    username: String,
    display_name: Option<String>,
}

/// Result of appending a track to a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddTrackOutcome {
    /// The track was appended at `position`
    Added { position: i64 },
    /// The track was already in the playlist; nothing changed
    AlreadyPresent { position: i64 },
}

impl AddTrackOutcome {
    pub fn position(self) -> i64 {
        match self {
            Self::Added { position } | Self::AlreadyPresent { position } => position,
        }
    }
}

/// Playlists owned by a user, newest first, with their track counts
pub async fn list_for_user(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Playlist>> {
    let sql = format!(
        "{PLAYLIST_SELECT} WHERE p.user_id = ? GROUP BY p.id ORDER BY p.created_at DESC, p.id DESC"
    );
    let rows: Vec<PlaylistRow> = sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?;

    Ok(rows.into_iter().map(PlaylistRow::into_domain).collect())
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let sql = format!("{PLAYLIST_SELECT} WHERE p.id = ? GROUP BY p.id");
    let row: Option<PlaylistRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;

    Ok(row.map(PlaylistRow::into_domain))
}

/// Playlist page: metadata, owner and tracks in position order
pub async fn get_detail(pool: &SqlitePool, id: PlaylistId) -> Result<Option<PlaylistDetail>> {
    let Some(playlist) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let owner: OwnerRow = sqlx::query_as("SELECT username, display_name FROM users WHERE id = ?")
        .bind(playlist.user_id)
        .fetch_one(pool)
        .await?;

    let sql = track_query(
        "pt.position, pt.added_at",
        "INNER JOIN playlist_tracks pt ON pt.track_id = t.id \
         WHERE pt.playlist_id = ? ORDER BY pt.position ASC",
    );
    let rows: Vec<PlaylistTrackRow> = sqlx::query_as(&sql).bind(id).fetch_all(pool).await?;

    Ok(Some(PlaylistDetail {
        playlist,
        owner: PlaylistOwner {
            username: owner.username,
            display_name: owner.display_name,
        },
        tracks: rows
            .into_iter()
            .map(|row| PlaylistTrack {
                track: row.track.into_domain(),
                position: row.position,
                added_at: row.added_at,
            })
            .collect(),
    }))
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let result = sqlx::query(
        "INSERT INTO playlists (user_id, name, description, is_public) VALUES (?, ?, ?, ?)",
    )
    .bind(playlist.user_id)
    .bind(&playlist.name)
    .bind(&playlist.description)
    .bind(playlist.is_public)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(playlist_id = id, user_id = playlist.user_id, "Created playlist");

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| TempoError::database("Failed to retrieve created playlist"))
}

/// Fail unless the playlist exists (`NotFound`) and `user_id` owns it
/// (`PermissionDenied`)
pub async fn ensure_owner(pool: &SqlitePool, id: PlaylistId, user_id: UserId) -> Result<()> {
    let owner: Option<i64> = sqlx::query_scalar("SELECT user_id FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match owner {
        None => Err(TempoError::not_found("Playlist", id)),
        Some(owner) if owner != user_id => Err(TempoError::permission_denied(
            "Not authorized to modify this playlist",
        )),
        Some(_) => Ok(()),
    }
}

/// Partially update a playlist owned by `user_id`; absent fields keep their value
pub async fn update(
    pool: &SqlitePool,
    id: PlaylistId,
    user_id: UserId,
    changes: UpdatePlaylist,
) -> Result<Playlist> {
    ensure_owner(pool, id, user_id).await?;

    sqlx::query(
        r#"
        UPDATE playlists
        SET name = COALESCE(?, name),
            description = COALESCE(?, description),
            is_public = COALESCE(?, is_public),
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(changes.name)
    .bind(changes.description)
    .bind(changes.is_public)
    .bind(id)
    .execute(pool)
    .await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| TempoError::not_found("Playlist", id))
}

/// Delete a playlist owned by `user_id` (its track links cascade)
pub async fn delete(pool: &SqlitePool, id: PlaylistId, user_id: UserId) -> Result<()> {
    ensure_owner(pool, id, user_id).await?;

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    tracing::debug!(playlist_id = id, "Deleted playlist");
    Ok(())
}

/// Append a track to a playlist owned by `user_id`
///
/// The next position is computed and written by one statement. If another
/// append claims the same position first, the unique constraint on
/// `(playlist_id, position)` rejects ours and the append is retried.
pub async fn add_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
    user_id: UserId,
) -> Result<AddTrackOutcome> {
    ensure_owner(pool, playlist_id, user_id).await?;

    if !tracks::exists(pool, track_id).await? {
        return Err(TempoError::not_found("Track", track_id));
    }

    let mut attempt = 1;
    let outcome = loop {
        match append(pool, playlist_id, track_id).await {
            Ok(Some(position)) => break AddTrackOutcome::Added { position },
            Ok(None) => {
                let position = position_of(pool, playlist_id, track_id)
                    .await?
                    .ok_or_else(|| TempoError::not_found("Track", track_id))?;
                break AddTrackOutcome::AlreadyPresent { position };
            }
            Err(sqlx::Error::Database(db))
                if db.is_unique_violation() && attempt < MAX_APPEND_ATTEMPTS =>
            {
                tracing::warn!(playlist_id, track_id, attempt, "Playlist position taken, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    };

    if let AddTrackOutcome::Added { .. } = outcome {
        touch(pool, playlist_id).await?;
    }

    Ok(outcome)
}

/// Insert at `1 + max(position)`; `None` when the track is already linked
async fn append(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
) -> std::result::Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO playlist_tracks (playlist_id, track_id, position)
        SELECT ?, ?, COALESCE(MAX(position), 0) + 1
        FROM playlist_tracks
        WHERE playlist_id = ?
        ON CONFLICT (playlist_id, track_id) DO NOTHING
        RETURNING position
        "#,
    )
    .bind(playlist_id)
    .bind(track_id)
    .bind(playlist_id)
    .fetch_optional(pool)
    .await
}

async fn position_of(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
) -> Result<Option<i64>> {
    let position = sqlx::query_scalar(
        "SELECT position FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?",
    )
    .bind(playlist_id)
    .bind(track_id)
    .fetch_optional(pool)
    .await?;

    Ok(position)
}

/// Remove a track from a playlist owned by `user_id`
///
/// Remaining positions are left untouched. Removing a track that is not in
/// the playlist succeeds without changes.
pub async fn remove_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
    user_id: UserId,
) -> Result<()> {
    ensure_owner(pool, playlist_id, user_id).await?;

    let result = sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(playlist_id)
        .bind(track_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        touch(pool, playlist_id).await?;
    }

    Ok(())
}

async fn touch(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<()> {
    sqlx::query("UPDATE playlists SET updated_at = datetime('now') WHERE id = ?")
        .bind(playlist_id)
        .execute(pool)
        .await?;
    Ok(())
}
