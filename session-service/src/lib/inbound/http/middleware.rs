use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// User resolved from a valid access token, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Authorization header did not carry a usable bearer token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerTokenError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header is not valid ASCII")]
    InvalidEncoding,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    WrongScheme,

    #[error("Bearer token is empty")]
    Empty,
}

/// Token carried by `Authorization: Bearer <token>`.
///
/// # Errors
/// * `Missing` - No Authorization header
/// * `InvalidEncoding` - Header value is not visible ASCII
/// * `WrongScheme` - Header does not start with `Bearer `
/// * `Empty` - Nothing after the scheme
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerTokenError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerTokenError::Missing)?
        .to_str()
        .map_err(|_| BearerTokenError::InvalidEncoding)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerTokenError::WrongScheme)?
        .trim();

    if token.is_empty() {
        return Err(BearerTokenError::Empty);
    }

    Ok(token)
}

/// Middleware that validates the access token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers()).map_err(|e| {
        tracing::warn!(reason = %e, "Rejected request without bearer token");
        ApiError::Unauthorized(e.to_string())
    })?;

    let subject = state.authenticator.validate_access_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Access token rejected");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let user_id = UserId::from_string(&subject).map_err(|e| {
        tracing::error!(error = %e, "Access token subject is not a user id");
        ApiError::Unauthorized("Invalid token format".to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}
