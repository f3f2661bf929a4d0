//! Row shapes shared by several slices
//!
//! Every query that returns tracks selects `TRACK_COLUMNS` over `TRACK_FROM`
//! so the same `TrackRow` decodes them all.

use sqlx::FromRow;
use tempo_core::{AlbumRef, ArtistRef, Track};

/// Columns decoded by [`TrackRow`]; the track table is aliased `t`.
pub(crate) const TRACK_COLUMNS: &str = r#"
    t.id, t.title, t.duration, t.file_url, t.cover_url, t.play_count, t.created_at,
    ar.id AS artist_id, ar.name AS artist_name, ar.image_url AS artist_image_url,
    al.id AS album_id, al.title AS album_title, al.cover_url AS album_cover_url
"#;

/// Joins needed by [`TRACK_COLUMNS`].
pub(crate) const TRACK_FROM: &str = r#"
    tracks t
    INNER JOIN artists ar ON t.artist_id = ar.id
    LEFT JOIN albums al ON t.album_id = al.id
"#;

#[derive(Debug, FromRow)]
pub(crate) struct TrackRow {
    id: i64,
    title: String,
    duration: i64,
    file_url: String,
    cover_url: Option<String>,
    play_count: i64,
    created_at: String,
    artist_id: i64,
    artist_name: String,
    artist_image_url: Option<String>,
    album_id: Option<i64>,
    album_title: Option<String>,
    album_cover_url: Option<String>,
}

impl TrackRow {
    pub(crate) fn into_domain(self) -> Track {
        let album = match (self.album_id, self.album_title) {
            (Some(id), Some(title)) => Some(AlbumRef {
                id,
                title,
                cover_url: self.album_cover_url,
            }),
            _ => None,
        };

        Track {
            id: self.id,
            title: self.title,
            duration: u32::try_from(self.duration).unwrap_or(0),
            file_url: self.file_url,
            cover_url: self.cover_url,
            play_count: self.play_count,
            artist: ArtistRef {
                id: self.artist_id,
                name: self.artist_name,
                image_url: self.artist_image_url,
            },
            album,
            created_at: Some(self.created_at),
        }
    }
}

/// Build `SELECT <track columns>, <extra> FROM <track joins> <rest>`.
pub(crate) fn track_query(extra_columns: &str, joins_and_filters: &str) -> String {
    let extra = if extra_columns.is_empty() {
        String::new()
    } else {
        format!(", {extra_columns}")
    };
    format!("SELECT {TRACK_COLUMNS}{extra} FROM {TRACK_FROM} {joins_and_filters}")
}

/// `%term%` substring pattern
///
/// Case folding is left to SQLite (`LOWER(col) LIKE LOWER(?)`) so the term
/// and the column are folded by the same rules.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}
