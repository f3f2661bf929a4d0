use thiserror::Error;

/// Failure while opening or migrating the database
///
/// Queries report through `tempo_core::TempoError` instead.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Malformed connection string
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Creating the directory that holds the database file
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for tempo_core::TempoError {
    fn from(err: StorageError) -> Self {
        tempo_core::TempoError::database(err.to_string())
    }
}
