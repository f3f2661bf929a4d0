//! Demo data: two users and a small catalog
//!
//! Seeding is idempotent: existing users are skipped by email, and the
//! catalog is only inserted into an empty `artists` table.

use crate::tracks::{self, NewTrack};
use crate::{albums, artists};
use sqlx::SqlitePool;
use tempo_core::error::Result;

/// Password of the seeded demo accounts
pub const DEMO_PASSWORD: &str = "password123";

const DEMO_USERS: [(&str, &str, &str, &str); 2] = [
    ("demo@example.com", "demouser", "Demo User", "https://i.pravatar.cc/300?img=1"),
    ("john@example.com", "johndoe", "John Doe", "https://i.pravatar.cc/300?img=2"),
];

const DEMO_ARTISTS: [(&str, &str); 5] = [
    ("The Midnight", "Synthwave duo creating nostalgic electronic music"),
    ("Chillhop Beats", "Lo-fi hip hop for study and relaxation"),
    ("Neon Dreams", "Retro-futuristic electronic music collective"),
    ("Jazz Café", "Smooth jazz for any occasion"),
    ("Electric Avenue", "Modern electronic and house music"),
];

// (title, release date), one per artist
const DEMO_ALBUMS: [(&str, &str); 5] = [
    ("Endless Summer", "2023-06-15"),
    ("Nocturnal", "2023-03-20"),
    ("Neon Nights", "2023-09-10"),
    ("Smooth Sessions", "2023-01-05"),
    ("Digital Dreams", "2023-11-22"),
];

// (title, artist/album index, duration seconds, play count)
const DEMO_TRACKS: [(&str, usize, u32, i64); 12] = [
    ("Sunset Drive", 0, 245, 8421),
    ("Ocean Breeze", 0, 198, 5310),
    ("Midnight City", 0, 267, 9702),
    ("Lofi Beats 1", 1, 180, 2288),
    ("Study Session", 1, 195, 4176),
    ("Rainy Day", 1, 210, 3950),
    ("Neon Lights", 2, 234, 6634),
    ("Cyber Dreams", 2, 256, 1207),
    ("Smooth Jazz", 3, 290, 745),
    ("Evening Mood", 3, 315, 2019),
    ("Electric Feel", 4, 223, 7563),
    ("Digital Love", 4, 241, 5898),
];

/// What a seed run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
}

/// Insert the demo users (with `password_hash`) and the demo catalog
pub async fn seed_demo(pool: &SqlitePool, password_hash: &str) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for (email, username, display_name, avatar_url) in DEMO_USERS {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, username, display_name, avatar_url)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(username)
        .bind(display_name)
        .bind(avatar_url)
        .execute(pool)
        .await?;
        summary.users += result.rows_affected() as usize;
    }

    let existing_artists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?;
    if existing_artists > 0 {
        tracing::info!("Catalog already present, skipping demo catalog");
        return Ok(summary);
    }

    let mut album_ids = Vec::with_capacity(DEMO_ALBUMS.len());
    let mut artist_ids = Vec::with_capacity(DEMO_ARTISTS.len());

    for (n, ((name, bio), (title, release_date))) in
        DEMO_ARTISTS.into_iter().zip(DEMO_ALBUMS).enumerate()
    {
        let seed = n + 1;
        let artist_image = format!("https://picsum.photos/seed/artist{seed}/400/400");
        let artist_id = artists::create(pool, name, Some(bio), Some(&artist_image)).await?;

        let cover = format!("https://picsum.photos/seed/album{seed}/400/400");
        let album_id =
            albums::create(pool, title, artist_id, Some(&cover), Some(release_date)).await?;

        artist_ids.push(artist_id);
        album_ids.push(album_id);
    }
    summary.artists = artist_ids.len();
    summary.albums = album_ids.len();

    for (n, (title, owner, duration, play_count)) in DEMO_TRACKS.into_iter().enumerate() {
        let seed = n + 1;
        tracks::create(
            pool,
            NewTrack {
                title: title.to_string(),
                artist_id: artist_ids[owner],
                album_id: Some(album_ids[owner]),
                duration,
                file_url: format!(
                    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-{}.mp3",
                    n % 10 + 1
                ),
                cover_url: Some(format!("https://picsum.photos/seed/track{seed}/400/400")),
                play_count,
            },
        )
        .await?;
        summary.tracks += 1;
    }

    tracing::info!(?summary, "Seeded demo data");
    Ok(summary)
}
