use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::errors::StoreError;
use crate::domain::session::errors::RefreshTokenError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

/// Issues, resolves and revokes opaque refresh tokens on top of a repository.
pub struct RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    repository: Arc<RR>,
}

impl<RR> RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }

    /// Fresh 256-bit token, hex encoded.
    pub fn generate() -> String {
        auth::refresh_token::generate()
    }

    /// Store `token` for `user_id` until `expires_at`.
    ///
    /// # Errors
    /// * Any `StoreError` from the repository
    pub async fn persist(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, StoreError> {
        let record = RefreshToken {
            token: token.to_string(),
            user_id,
            expires_at,
            revoked_at: None,
            created_at: Utc::now(),
        };

        self.repository.store(record).await
    }

    /// Owner of a usable token.
    ///
    /// # Errors
    /// * `NotFound` - Token does not exist
    /// * `Revoked` - Token was revoked
    /// * `Expired` - Token is past its expiry
    /// * `Store` - Database operation failed
    pub async fn resolve(&self, token: &str) -> Result<UserId, RefreshTokenError> {
        self.resolve_at(token, Utc::now()).await
    }

    pub async fn resolve_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<UserId, RefreshTokenError> {
        let record = self
            .repository
            .find(token)
            .await?
            .ok_or(RefreshTokenError::NotFound)?;

        if record.is_revoked() {
            return Err(RefreshTokenError::Revoked);
        }

        if record.is_expired(now) {
            return Err(RefreshTokenError::Expired);
        }

        Ok(record.user_id)
    }

    /// Revoke `token`. Revoking an already revoked token succeeds and keeps the
    /// original revocation time.
    ///
    /// # Errors
    /// * `NotFound` - Token does not exist
    /// * `Store` - Database operation failed
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        self.repository
            .revoke(token, Utc::now())
            .await
            .map_err(|e| match e {
                StoreError::NotFound => RefreshTokenError::NotFound,
                other => RefreshTokenError::Store(other),
            })
    }
}
