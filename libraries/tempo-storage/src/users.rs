//! User slice
//!
//! Emails are stored and matched lowercased. The password hash never leaves
//! this module except through [`find_credentials_by_email`].

use sqlx::{FromRow, SqlitePool};
use tempo_core::{error::Result, CreateUser, User, UserId};

const USER_COLUMNS: &str = "id, email, username, display_name, avatar_url, created_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
    created_at: String,
}

impl UserRow {
    fn into_domain(self) -> User {
        User {
            id: self.id,
            email: self.email,
            username: self.username,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

/// A user together with the stored password hash, for login checks
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Create a user
///
/// Returns `TempoError::Duplicate` when the email or username is taken.
pub async fn create(pool: &SqlitePool, new_user: CreateUser) -> Result<User> {
    let display_name = new_user
        .display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| new_user.username.clone());

    let sql = format!(
        "INSERT INTO users (email, username, display_name, password_hash) VALUES (?, ?, ?, ?) \
         RETURNING {USER_COLUMNS}"
    );
    let row: UserRow = sqlx::query_as(&sql)
        .bind(new_user.email.to_lowercase())
        .bind(&new_user.username)
        .bind(display_name)
        .bind(&new_user.password_hash)
        .fetch_one(pool)
        .await?;

    tracing::info!(user_id = row.id, username = %row.username, "Created user");
    Ok(row.into_domain())
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let row: Option<UserRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;

    Ok(row.map(UserRow::into_domain))
}

/// Look up a user and their password hash by email
pub async fn find_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserCredentials>> {
    let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = ?");
    let row: Option<CredentialsRow> = sqlx::query_as(&sql)
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| UserCredentials {
        user: row.user.into_domain(),
        password_hash: row.password_hash,
    }))
}

/// Whether the email or the username is already registered
pub async fn email_or_username_taken(pool: &SqlitePool, email: &str, username: &str) -> Result<bool> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM users WHERE email = ? OR username = ? LIMIT 1")
            .bind(email.to_lowercase())
            .bind(username)
            .fetch_optional(pool)
            .await?;

    Ok(found.is_some())
}

/// All users, oldest first
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC");
    let rows: Vec<UserRow> = sqlx::query_as(&sql).fetch_all(pool).await?;

    Ok(rows.into_iter().map(UserRow::into_domain).collect())
}

