//! Artist slice

use crate::rows::like_pattern;
use crate::tracks;
use sqlx::{FromRow, SqlitePool};
use tempo_core::{error::Result, AlbumSummary, Artist, ArtistDetail, ArtistId, Page};

#[derive(Debug, FromRow)]
struct ArtistRow {
    id: i64,
    name: String,
    bio: Option<String>,
    image_url: Option<String>,
    created_at: String,
}

impl ArtistRow {
    fn into_domain(self) -> Artist {
        Artist {
            id: self.id,
            name: self.name,
            bio: self.bio,
            image_url: self.image_url,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct AlbumSummaryRow {
    id: i64,
    title: String,
    cover_url: Option<String>,
    release_date: Option<String>,
}

/// Artists ordered by name
pub async fn list(pool: &SqlitePool, page: Page) -> Result<Vec<Artist>> {
    let rows: Vec<ArtistRow> = sqlx::query_as(
        r#"
        SELECT id, name, bio, image_url, created_at
        FROM artists
        ORDER BY name COLLATE NOCASE ASC, id ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(i64::from(page.limit))
    .bind(i64::from(page.offset))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ArtistRow::into_domain).collect())
}

/// Get artist by ID
pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row: Option<ArtistRow> =
        sqlx::query_as("SELECT id, name, bio, image_url, created_at FROM artists WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(ArtistRow::into_domain))
}

/// Artist page: the artist, their tracks (most played first) and their
/// albums (newest release first)
pub async fn get_detail(pool: &SqlitePool, id: ArtistId) -> Result<Option<ArtistDetail>> {
    let Some(artist) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let tracks = tracks::by_artist(pool, id).await?;

    let albums: Vec<AlbumSummaryRow> = sqlx::query_as(
        r#"
        SELECT id, title, cover_url, release_date
        FROM albums
        WHERE artist_id = ?
        ORDER BY release_date DESC, id DESC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(ArtistDetail {
        artist,
        tracks,
        albums: albums
            .into_iter()
            .map(|row| AlbumSummary {
                id: row.id,
                title: row.title,
                cover_url: row.cover_url,
                release_date: row.release_date,
            })
            .collect(),
    }))
}

/// Case-insensitive name match
pub async fn search(pool: &SqlitePool, term: &str, limit: u32) -> Result<Vec<Artist>> {
    let rows: Vec<ArtistRow> = sqlx::query_as(
        r#"
        SELECT id, name, bio, image_url, created_at
        FROM artists
        WHERE LOWER(name) LIKE LOWER(?)
        ORDER BY name COLLATE NOCASE ASC, id ASC
        LIMIT ?
        "#,
    )
    .bind(like_pattern(term))
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ArtistRow::into_domain).collect())
}

/// Insert an artist
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    bio: Option<&str>,
    image_url: Option<&str>,
) -> Result<ArtistId> {
    let result = sqlx::query("INSERT INTO artists (name, bio, image_url) VALUES (?, ?, ?)")
        .bind(name)
        .bind(bio)
        .bind(image_url)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}
