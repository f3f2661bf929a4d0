//! Album slice

use crate::rows::like_pattern;
use crate::tracks;
use sqlx::{FromRow, SqlitePool};
use tempo_core::{error::Result, Album, AlbumDetail, AlbumId, ArtistId, ArtistRef, Page};

const ALBUM_SELECT: &str = r#"
    SELECT al.id, al.title, al.cover_url, al.release_date, al.created_at,
           ar.id AS artist_id, ar.name AS artist_name, ar.image_url AS artist_image_url
    FROM albums al
    INNER JOIN artists ar ON al.artist_id = ar.id
"#;

#[derive(Debug, FromRow)]
struct AlbumRow {
    id: i64,
    title: String,
    cover_url: Option<String>,
    release_date: Option<String>,
    created_at: String,
    artist_id: i64,
    artist_name: String,
    artist_image_url: Option<String>,
}

impl AlbumRow {
    fn into_domain(self) -> Album {
        Album {
            id: self.id,
            title: self.title,
            cover_url: self.cover_url,
            release_date: self.release_date,
            artist: ArtistRef {
                id: self.artist_id,
                name: self.artist_name,
                image_url: self.artist_image_url,
            },
            created_at: self.created_at,
        }
    }
}

/// Albums, newest release first
pub async fn list(pool: &SqlitePool, page: Page) -> Result<Vec<Album>> {
    let sql = format!("{ALBUM_SELECT} ORDER BY al.release_date DESC, al.id DESC LIMIT ? OFFSET ?");
    let rows: Vec<AlbumRow> = sqlx::query_as(&sql)
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(AlbumRow::into_domain).collect())
}

/// Get album by ID
pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let sql = format!("{ALBUM_SELECT} WHERE al.id = ?");
    let row: Option<AlbumRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;

    Ok(row.map(AlbumRow::into_domain))
}

/// Album page: the album and its tracks in catalog order
pub async fn get_detail(pool: &SqlitePool, id: AlbumId) -> Result<Option<AlbumDetail>> {
    let Some(album) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let tracks = tracks::by_album(pool, id).await?;

    Ok(Some(AlbumDetail { album, tracks }))
}

/// Case-insensitive title match
pub async fn search(pool: &SqlitePool, term: &str, limit: u32) -> Result<Vec<Album>> {
    let sql = format!(
        "{ALBUM_SELECT} WHERE LOWER(al.title) LIKE LOWER(?) ORDER BY al.release_date DESC, al.id DESC LIMIT ?"
    );
    let rows: Vec<AlbumRow> = sqlx::query_as(&sql)
        .bind(like_pattern(term))
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(AlbumRow::into_domain).collect())
}

/// Insert an album
pub async fn create(
    pool: &SqlitePool,
    title: &str,
    artist_id: ArtistId,
    cover_url: Option<&str>,
    release_date: Option<&str>,
) -> Result<AlbumId> {
    let result = sqlx::query(
        "INSERT INTO albums (title, artist_id, cover_url, release_date) VALUES (?, ?, ?, ?)",
    )
    .bind(title)
    .bind(artist_id)
    .bind(cover_url)
    .bind(release_date)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
