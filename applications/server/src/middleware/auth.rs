//! Bearer-token authentication for protected routes.

use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tempo_core::UserId;

/// The caller of a protected route
///
/// Inserted by [`auth_middleware`]; handlers take it as an extractor.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject requests without a valid access token (401); otherwise record the
/// caller and continue
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ServerError::Unauthorized("Access token required".to_string()))?;

    let user_id = match auth_service.verify_access_token(token) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::warn!(path = %request.uri().path(), error = %e, "Rejected access token");
            return Err(ServerError::Unauthorized(
                "Invalid or expired token".to_string(),
            ));
        }
    };

    request.extensions_mut().insert(AuthenticatedUser(user_id));
    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or_else(|| ServerError::Unauthorized("Authentication required".to_string()))
    }
}
