/// API integration tests
/// Tests complete HTTP request/response cycles with real database
mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use serde_json::{json, Value};
use tempo_storage::tracks::NewTrack;

fn ids(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

fn positions(tracks: &Value) -> Vec<i64> {
    tracks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["position"].as_i64().unwrap())
        .collect()
}

// =============================================================================
// Health & routing
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_spa_fallback_and_static_music() {
    let app = TestApp::new().await;
    std::fs::write(
        app.temp_dir.path().join("web/index.html"),
        "<html>tempo</html>",
    )
    .unwrap();
    std::fs::write(app.temp_dir.path().join("music/a.mp3"), b"ID3").unwrap();

    let request = axum::http::Request::builder()
        .uri("/library/favorites")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<html>tempo</html>");

    let request = axum::http::Request::builder()
        .uri("/music/a.mp3")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_then_me() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "email": "New.User@Example.com",
                "password": "secret1",
                "username": "newuser"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "new.user@example.com");
    assert_eq!(body["user"]["displayName"], "newuser");
    assert!(body["refreshToken"].is_string());
    assert!(body["user"].get("passwordHash").is_none());

    let token = body["token"].as_str().unwrap();
    let (status, me) = app.get("/api/auth/me", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "newuser");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({"email": "not-an-email", "password": "123", "username": " ab "}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password", "username"]);
}

#[tokio::test]
async fn test_register_duplicate() {
    let app = TestApp::new().await;
    app.create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "email": "TEST@example.com",
                "password": "password123",
                "username": "someoneelse"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email or username already exists");
}

#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::new().await;
    app.create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": fixtures::TEST_EMAIL, "password": fixtures::TEST_PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], fixtures::TEST_USERNAME);

    let token = body["token"].as_str().unwrap();
    let (status, _) = app.get("/api/users/favorites", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new().await;
    app.create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": fixtures::TEST_EMAIL, "password": "wrong-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "nobody@example.com", "password": "password123"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/auth/login", None, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new().await;
    let (user_id, access_token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    let refresh_token = app.auth_service.create_refresh_token(user_id).unwrap();

    let (status, body) = app
        .post(
            "/api/auth/refresh",
            None,
            json!({"refreshToken": refresh_token}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .get("/api/auth/me", Some(body["token"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);

    // An access token is not a refresh token
    let (status, _) = app
        .post(
            "/api/auth/refresh",
            None,
            json!({"refreshToken": access_token}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/users/favorites", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.get("/api/users/history", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/api/playlists", None, json!({"name": "Nope"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_for_deleted_user() {
    let app = TestApp::new().await;
    let (user_id, token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&app.db)
        .await
        .unwrap();

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_track_listings() {
    let app = TestApp::new().await;
    let tracks = app.create_catalog(3).await;

    let (status, body) = app.get("/api/tracks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![tracks[2], tracks[1], tracks[0]]);
    assert_eq!(body[0]["artist"]["name"], "The Midnight");
    assert_eq!(body[0]["album"]["title"], "Endless Summer");

    let (_, body) = app.get("/api/tracks?limit=1&offset=1", None).await;
    assert_eq!(ids(&body), vec![tracks[1]]);

    let (_, body) = app.get("/api/tracks/popular?limit=2", None).await;
    assert_eq!(ids(&body), vec![tracks[2], tracks[1]]);

    let (status, body) = app.get(&format!("/api/tracks/{}", tracks[0]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Track 1");
    assert_eq!(body["fileUrl"], "/music/track-1.mp3");

    let (status, body) = app.get("/api/tracks/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Track not found");
}

#[tokio::test]
async fn test_artist_and_album_pages() {
    let app = TestApp::new().await;
    let tracks = app.create_catalog(2).await;

    let (_, artists) = app.get("/api/artists", None).await;
    let artist_id = artists[0]["id"].as_i64().unwrap();
    let (status, artist) = app.get(&format!("/api/artists/{}", artist_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(artist["name"], "The Midnight");
    assert_eq!(ids(&artist["tracks"]), vec![tracks[1], tracks[0]]);
    assert_eq!(artist["albums"][0]["title"], "Endless Summer");

    let (_, albums) = app.get("/api/albums", None).await;
    let album_id = albums[0]["id"].as_i64().unwrap();
    let (status, album) = app.get(&format!("/api/albums/{}", album_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(album["artist"]["name"], "The Midnight");
    assert_eq!(ids(&album["tracks"]), tracks);

    let (status, _) = app.get("/api/artists/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get("/api/albums/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_record_play() {
    let app = TestApp::new().await;
    let tracks = app.create_catalog(1).await;
    let (_, token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    let uri = format!("/api/tracks/{}/play", tracks[0]);

    let (status, body) = app.post(&uri, Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "playCount": 2}));

    let (_, history) = app.get("/api/users/history", Some(&token)).await;
    assert_eq!(ids(&history), vec![tracks[0]]);
    assert!(history[0]["playedAt"].is_string());

    let (status, _) = app
        .post("/api/tracks/9999/play", Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post(&uri, None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new().await;
    app.create_catalog(2).await;

    let (status, body) = app.get("/api/search?q=TRACK", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tracks"].as_array().unwrap().len(), 2);

    let (_, body) = app.get("/api/search?q=midnight&type=artists", None).await;
    assert_eq!(body["artists"][0]["name"], "The Midnight");
    assert!(body["tracks"].as_array().unwrap().is_empty());
    assert!(body["albums"].as_array().unwrap().is_empty());

    let (status, body) = app.get("/api/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query is required");

    let (status, _) = app.get("/api/search?q=x&type=podcasts", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_non_ascii_titles() {
    let app = TestApp::new().await;
    let artist = tempo_storage::artists::create(&app.db, "Ärzte", None, None)
        .await
        .unwrap();
    tempo_storage::tracks::create(
        &app.db,
        NewTrack {
            title: "Über Alles".to_string(),
            artist_id: artist,
            album_id: None,
            duration: 180,
            file_url: "/music/uber-alles.mp3".to_string(),
            cover_url: None,
            play_count: 0,
        },
    )
    .await
    .unwrap();

    let (status, body) = app.get("/api/search?q=%C3%9Cber&type=tracks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tracks"][0]["title"], "Über Alles");

    let (_, body) = app.get("/api/search?q=%C3%84rzte&type=artists", None).await;
    assert_eq!(body["artists"][0]["name"], "Ärzte");
}

// =============================================================================
// Playlists
// =============================================================================

async fn create_playlist(app: &TestApp, token: &str, name: &str) -> i64 {
    let (status, body) = app
        .post("/api/playlists", Some(token), json!({"name": name}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_playlist_positions_append_without_renumbering() {
    let app = TestApp::new().await;
    let tracks = app.create_catalog(4).await;
    let (_, token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    let playlist = create_playlist(&app, &token, "Road Trip").await;
    let tracks_uri = format!("/api/playlists/{}/tracks", playlist);

    for (expected, track) in (1..=3).zip(&tracks[..3]) {
        let (status, body) = app
            .post(&tracks_uri, Some(&token), json!({"trackId": track}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "position": expected}));
    }

    let (status, _) = app
        .delete(&format!("{}/{}", tracks_uri, tracks[1]), &token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .post(&tracks_uri, Some(&token), json!({"trackId": tracks[3]}))
        .await;
    assert_eq!(body["position"], 4);

    let (status, detail) = app.get(&format!("/api/playlists/{}", playlist), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(positions(&detail["tracks"]), vec![1, 3, 4]);
    assert_eq!(
        ids(&detail["tracks"]),
        vec![tracks[0], tracks[2], tracks[3]]
    );
    assert_eq!(detail["owner"]["username"], fixtures::TEST_USERNAME);
    assert_eq!(detail["name"], "Road Trip");

    // Adding a track already present keeps its slot
    let (_, body) = app
        .post(&tracks_uri, Some(&token), json!({"trackId": tracks[2]}))
        .await;
    assert_eq!(body["position"], 3);

    let (_, mine) = app.get("/api/playlists/my-playlists", Some(&token)).await;
    assert_eq!(mine[0]["trackCount"], 3);
}

#[tokio::test]
async fn test_playlist_requires_name() {
    let app = TestApp::new().await;
    let (_, token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;

    let (status, body) = app
        .post("/api/playlists", Some(&token), json!({"name": "   "}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
}

#[tokio::test]
async fn test_add_track_requires_track_id() {
    let app = TestApp::new().await;
    let (_, token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    let playlist = create_playlist(&app, &token, "Empty").await;

    let (status, body) = app
        .post(
            &format!("/api/playlists/{}/tracks", playlist),
            Some(&token),
            json!({}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "trackId");
    assert_eq!(body["errors"][0]["message"], "Track ID is required");
}

#[tokio::test]
async fn test_playlist_ownership_enforced() {
    let app = TestApp::new().await;
    let tracks = app.create_catalog(1).await;
    let (_, owner) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    let (_, other) = app
        .create_user(fixtures::OTHER_EMAIL, fixtures::OTHER_USERNAME)
        .await;
    let playlist = create_playlist(&app, &owner, "Mine").await;
    let uri = format!("/api/playlists/{}", playlist);

    let (status, body) = app.put(&uri, &other, json!({"name": "Stolen"})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized to modify this playlist");

    let (status, _) = app.delete(&uri, &other).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            &format!("{}/tracks", uri),
            Some(&other),
            json!({"trackId": tracks[0]}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .delete(&format!("{}/tracks/{}", uri, tracks[0]), &other)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Missing playlist and missing track
    let (status, _) = app.delete("/api/playlists/9999", &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = app
        .post(
            &format!("{}/tracks", uri),
            Some(&owner),
            json!({"trackId": 9999}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Track not found");
}

#[tokio::test]
async fn test_playlist_partial_update_and_delete() {
    let app = TestApp::new().await;
    let (_, token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    let (_, body) = app
        .post(
            "/api/playlists",
            Some(&token),
            json!({"name": "Chill", "description": "Evening", "isPublic": true}),
        )
        .await;
    let uri = format!("/api/playlists/{}", body["id"]);

    let (status, updated) = app.put(&uri, &token, json!({"isPublic": false})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Chill");
    assert_eq!(updated["description"], "Evening");
    assert_eq!(updated["isPublic"], false);

    let (status, body) = app.delete(&uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Favorites & history
// =============================================================================

#[tokio::test]
async fn test_favorites_are_idempotent() {
    let app = TestApp::new().await;
    let tracks = app.create_catalog(2).await;
    let (_, token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    let uri = format!("/api/users/favorites/{}", tracks[0]);

    for _ in 0..2 {
        let (status, body) = app.post(&uri, Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    let (_, favorites) = app.get("/api/users/favorites", Some(&token)).await;
    assert_eq!(ids(&favorites), vec![tracks[0]]);
    assert!(favorites[0]["favoritedAt"].is_string());

    for _ in 0..2 {
        let (status, _) = app.delete(&uri, &token).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, favorites) = app.get("/api/users/favorites", Some(&token)).await;
    assert!(favorites.as_array().unwrap().is_empty());

    let (status, _) = app
        .post("/api/users/favorites/9999", Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_is_per_user_and_limited() {
    let app = TestApp::new().await;
    let tracks = app.create_catalog(3).await;
    let (_, token) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;
    let (_, other) = app
        .create_user(fixtures::OTHER_EMAIL, fixtures::OTHER_USERNAME)
        .await;

    for track in &tracks {
        app.post(&format!("/api/tracks/{}/play", track), Some(&token), json!({}))
            .await;
    }

    let (_, history) = app.get("/api/users/history?limit=2", Some(&token)).await;
    assert_eq!(ids(&history), vec![tracks[2], tracks[1]]);

    let (_, history) = app.get("/api/users/history", Some(&other)).await;
    assert!(history.as_array().unwrap().is_empty());
}
