//! Account creation shared by registration and the admin CLI.

use crate::{error::Result, services::AuthService, validation::normalize_email};
use sqlx::SqlitePool;
use tempo_core::{CreateUser, User};
use tempo_storage::users;

/// Sign-up input before normalization and hashing
#[derive(Debug)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub display_name: Option<String>,
}

/// Store a user with the email normalized the way login looks it up
pub async fn create_account(
    db: &SqlitePool,
    auth_service: &AuthService,
    account: NewAccount<'_>,
) -> Result<User> {
    let password_hash = auth_service.hash_password(account.password)?;
    let user = users::create(
        db,
        CreateUser {
            email: normalize_email(account.email),
            username: account.username.trim().to_string(),
            display_name: account.display_name,
            password_hash,
        },
    )
    .await?;
    Ok(user)
}
