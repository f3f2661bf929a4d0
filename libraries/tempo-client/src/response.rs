//! Shared response handling for the sub-clients.

use crate::error::{ClientError, Result};
use crate::types::ErrorBody;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Classify a transport failure.
pub(crate) fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Decode a successful JSON body, or turn the error status into a `ClientError`.
pub(crate) async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if response.status().is_success() {
        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
    } else {
        Err(error_from(response).await)
    }
}

/// Map an error response to the matching variant.
///
/// 401 becomes `AuthRequired` so that callers can refresh and retry.
pub(crate) async fn error_from(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or(text);

    match status.as_u16() {
        400 => ClientError::BadRequest(message),
        401 => ClientError::AuthRequired,
        403 => ClientError::Forbidden(message),
        404 => ClientError::NotFound(message),
        code => ClientError::ServerError {
            status: code,
            message,
        },
    }
}
