/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::{create_account, NewAccount},
    state::AppState,
    validation::{normalize_email, Validator, MIN_PASSWORD_LEN, MIN_USERNAME_LEN},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tempo_core::User;
use tempo_storage::users;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub username: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    pub refresh_token: String,
}

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let username = req.username.trim().to_string();
    Validator::new()
        .email("email", &req.email)
        .min_chars(
            "password",
            &req.password,
            MIN_PASSWORD_LEN,
            "Password must be at least 6 characters",
        )
        .min_chars(
            "username",
            &username,
            MIN_USERNAME_LEN,
            "Username must be at least 3 characters",
        )
        .finish()?;

    let email = normalize_email(&req.email);
    if users::email_or_username_taken(&app_state.db, &email, &username).await? {
        return Err(ServerError::BadRequest(
            "Email or username already exists".to_string(),
        ));
    }

    let user = create_account(
        &app_state.db,
        &app_state.auth_service,
        NewAccount {
            email: &email,
            username: &username,
            password: &req.password,
            display_name: req.display_name,
        },
    )
    .await
    .map_err(|e| match e {
        // Lost a race with a concurrent registration
        ServerError::BadRequest(_) => {
            ServerError::BadRequest("Email or username already exists".to_string())
        }
        other => other,
    })?;

    let tokens = app_state.auth_service.issue_tokens(user.id)?;
    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    Validator::new()
        .email("email", &req.email)
        .required("password", &req.password, "Password is required")
        .finish()?;

    let credentials = users::find_credentials_by_email(&app_state.db, &normalize_email(&req.email))
        .await?
        .ok_or_else(|| ServerError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &credentials.password_hash)?
    {
        return Err(ServerError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let user = credentials.user;
    let tokens = app_state.auth_service.issue_tokens(user.id)?;
    tracing::debug!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user,
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)
        .map_err(|_| ServerError::Unauthorized("Invalid refresh token".to_string()))?;

    if users::get_by_id(&app_state.db, user_id).await?.is_none() {
        return Err(ServerError::Unauthorized("User no longer exists".to_string()));
    }

    let tokens = app_state.auth_service.issue_tokens(user_id)?;

    Ok(Json(RefreshResponse {
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<User>> {
    let user = users::get_by_id(&app_state.db, auth.user_id())
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
