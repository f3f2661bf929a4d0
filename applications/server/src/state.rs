use crate::services::AuthService;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handles every handler needs: the catalog database and token/password service
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: SqlitePool, auth_service: Arc<AuthService>) -> Self {
        Self { db, auth_service }
    }
}
