//! Authentication methods for the Tempo server.

use crate::error::{ClientError, Result};
use crate::response::{json, send_error};
use crate::types::{
    AuthResponse, LoginRequest, RefreshTokenRequest, RefreshTokenResponse, RegisterRequest,
};
use reqwest::Client;
use tempo_core::User;
use tracing::{debug, info, warn};

/// Authentication client for the Tempo server.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(send_error)?;

        if response.status().as_u16() == 401 {
            warn!("Login failed: invalid credentials");
            return Err(ClientError::AuthFailed("Invalid credentials".to_string()));
        }

        let auth: AuthResponse = json(response, "login response").await?;
        info!(user_id = auth.user.id, username = %auth.user.username, "Login successful");
        Ok(auth)
    }

    /// Create an account; the response carries tokens for the new user.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let url = format!("{}/api/auth/register", self.base_url);
        debug!(url = %url, username = %request.username, "Registering account");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        let auth: AuthResponse = json(response, "registration response").await?;
        info!(user_id = auth.user.id, "Registration successful");
        Ok(auth)
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshTokenResponse> {
        let url = format!("{}/api/auth/refresh", self.base_url);
        debug!(url = %url, "Refreshing access token");

        let response = self
            .http
            .post(&url)
            .json(&RefreshTokenRequest { refresh_token })
            .send()
            .await
            .map_err(send_error)?;

        if response.status().as_u16() == 401 {
            warn!("Token refresh failed: refresh token expired or invalid");
            return Err(ClientError::TokenRefreshFailed(
                "Refresh token expired or invalid".to_string(),
            ));
        }

        let tokens = json(response, "refresh response").await?;
        debug!("Token refresh successful");
        Ok(tokens)
    }

    /// The user owning `access_token`.
    pub async fn current_user(&self, access_token: &str) -> Result<User> {
        let url = format!("{}/api/auth/me", self.base_url);
        debug!(url = %url, "Getting current user");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(send_error)?;

        json(response, "user").await
    }
}
