/// User domain type
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// User account (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login email, stored lowercased
    pub email: String,

    /// Unique handle
    pub username: String,

    /// Name shown in the UI, defaults to the username
    pub display_name: Option<String>,

    /// Avatar image locator
    pub avatar_url: Option<String>,

    /// Account creation timestamp (`SQLite` datetime string)
    pub created_at: String,
}

/// Data for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    /// Already-hashed password
    pub password_hash: String,
}
