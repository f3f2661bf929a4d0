//! Common test utilities and fixtures
//!
//! Every test app gets its own temp dir holding the SQLite file and the
//! static directories, so tests can run in parallel.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tempo_core::{CreateUser, TrackId, UserId};
use tempo_server::{create_router, state::AppState, AuthService, ServerConfig};
use tempo_storage::tracks::NewTrack;
use tower::util::ServiceExt;

pub mod fixtures {
    pub const TEST_EMAIL: &str = "test@example.com";
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "password123";

    pub const OTHER_EMAIL: &str = "other@example.com";
    pub const OTHER_USERNAME: &str = "otheruser";

    pub const JWT_SECRET: &str = "test-secret-key";
}

pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    pub db: SqlitePool,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("tempo.db");
        let db = tempo_storage::create_pool(&format!("sqlite://{}", db_path.display()))
            .await
            .unwrap();
        tempo_storage::run_migrations(&db).await.unwrap();

        let mut config = ServerConfig::default();
        config.auth.jwt_secret = fixtures::JWT_SECRET.to_string();
        config.auth.bcrypt_cost = 4;
        config.storage.music_dir = temp_dir.path().join("music");
        config.storage.uploads_dir = temp_dir.path().join("uploads");
        config.storage.web_dir = temp_dir.path().join("web");
        for dir in [
            &config.storage.music_dir,
            &config.storage.uploads_dir,
            &config.storage.web_dir,
        ] {
            std::fs::create_dir_all(dir).unwrap();
        }

        let auth_service = Arc::new(AuthService::from_settings(&config.auth));
        let app_state = AppState::new(db.clone(), Arc::clone(&auth_service));
        let router = create_router(app_state, &config);

        Self {
            router,
            auth_service,
            db,
            temp_dir,
        }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Insert a user directly and return its id and an access token
    pub async fn create_user(&self, email: &str, username: &str) -> (UserId, String) {
        let user = tempo_storage::users::create(
            &self.db,
            CreateUser {
                email: email.to_string(),
                username: username.to_string(),
                display_name: None,
                password_hash: self
                    .auth_service
                    .hash_password(fixtures::TEST_PASSWORD)
                    .unwrap(),
            },
        )
        .await
        .unwrap();

        let token = self.auth_service.create_access_token(user.id).unwrap();
        (user.id, token)
    }

    /// Insert one artist, one album and `count` tracks titled "Track 1".."Track N"
    pub async fn create_catalog(&self, count: usize) -> Vec<TrackId> {
        let artist_id = tempo_storage::artists::create(&self.db, "The Midnight", None, None)
            .await
            .unwrap();
        let album_id = tempo_storage::albums::create(
            &self.db,
            "Endless Summer",
            artist_id,
            None,
            Some("2016-08-05"),
        )
        .await
        .unwrap();

        let mut ids = Vec::with_capacity(count);
        for n in 1..=count {
            let id = tempo_storage::tracks::create(
                &self.db,
                NewTrack {
                    title: format!("Track {}", n),
                    artist_id,
                    album_id: Some(album_id),
                    duration: 200,
                    file_url: format!("/music/track-{}.mp3", n),
                    cover_url: None,
                    play_count: n as i64,
                },
            )
            .await
            .unwrap();
            ids.push(id);
        }
        ids
    }
}
