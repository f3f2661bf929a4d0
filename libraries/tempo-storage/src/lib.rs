//! Tempo Storage
//!
//! `SQLite` catalog store for the Tempo streaming server: users, the
//! artist/album/track catalog, playlists, favorites and listening history.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity owns its queries in its own module
//! - **Free functions over a pool**: every query takes `&SqlitePool`
//! - **Row structs**: one `sqlx::FromRow` struct per query shape, mapped to
//!   `tempo_core` types
//!
//! # Example
//!
//! ```rust,no_run
//! use tempo_core::Page;
//! use tempo_storage::{create_pool, run_migrations, tracks};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://tempo.db").await?;
//! run_migrations(&pool).await?;
//!
//! let newest = tracks::list(&pool, Page::default()).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod rows;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod favorites;
pub mod history;
pub mod playlists;
pub mod search;
pub mod seed;
pub mod tracks;
pub mod users;

pub use error::StorageError;
pub use playlists::AddTrackOutcome;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use std::time::Duration;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at startup (and by the `migrate` command) to bring the schema
/// up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// The database file (and its parent directory) is created if missing.
/// WAL journaling and a busy timeout let concurrent requests share the file.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://./data/tempo.db`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::InvalidUrl(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30));

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    tracing::info!(url = %database_url, "SQLite pool ready");
    Ok(pool)
}
