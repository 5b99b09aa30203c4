use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::errors::StoreError;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::RefreshOutcome;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::SaveId;
use crate::domain::user::models::UserId;

/// Port for the authentication gateway: login, refresh and revoke.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Exchange a username and password for an access token and a refresh token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `HashingFailure` - Password verification failed internally
    /// * `AccessToken` - Access token could not be signed
    /// * `StoreFailure` - Refresh token not persisted or save lookup failed
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, SessionError>;

    /// Mint a new access token from a refresh token. The refresh token is not rotated.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token unknown, revoked or expired
    /// * `StoreFailure` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, SessionError>;

    /// Revoke a refresh token. Revoking twice succeeds.
    ///
    /// # Errors
    /// * `TokenNotFound` - Token does not exist
    /// * `StoreFailure` - Database operation failed
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new refresh token record.
    async fn store(&self, token: RefreshToken) -> Result<RefreshToken, StoreError>;

    /// Look up a refresh token record (None if not found).
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, StoreError>;

    /// Set `revoked_at` unless it is already set.
    ///
    /// # Errors
    /// * `NotFound` - Token does not exist
    /// * `Database` - Database operation failed
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), StoreError>;
}

/// Read access to save records, limited to what login needs.
#[async_trait]
pub trait SaveRepository: Send + Sync + 'static {
    /// Identifier of the user's save record (None for a user that never saved).
    async fn find_id_by_user(&self, user_id: &UserId) -> Result<Option<SaveId>, StoreError>;
}
