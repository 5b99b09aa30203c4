use auth::AccessTokenError;
use thiserror::Error;

use crate::domain::errors::StoreError;

/// Why a refresh token could not be resolved or revoked.
///
/// The first three variants stay distinct inside the service for logging; callers of
/// the session service only ever see them as `SessionError::InvalidRefreshToken`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token revoked")]
    Revoked,

    #[error("Refresh token expired")]
    Expired,

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

/// Top-level error for login, refresh and revoke.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Unknown username and wrong password are deliberately indistinguishable.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Password processing failed: {0}")]
    HashingFailure(String),

    #[error("Access token error: {0}")]
    AccessToken(#[from] AccessTokenError),

    #[error("Invalid or missing refresh token")]
    InvalidRefreshToken(RefreshTokenError),

    #[error("Refresh token not found")]
    TokenNotFound,

    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        SessionError::StoreFailure(err.to_string())
    }
}
