use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::errors::StoreError;
use crate::domain::session::errors::RefreshTokenError;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::access_token_ttl;
use crate::domain::session::models::refresh_token_lifetime;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::RefreshOutcome;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SaveRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::session::refresh_tokens::RefreshTokenStore;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Authentication gateway: ties password checks, access tokens and refresh tokens
/// together. Holds no mutable state of its own.
pub struct SessionService<UR, RR, SR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    SR: SaveRepository,
{
    users: Arc<UR>,
    saves: Arc<SR>,
    refresh_tokens: RefreshTokenStore<RR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, RR, SR> SessionService<UR, RR, SR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    SR: SaveRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User lookup
    /// * `refresh_tokens` - Refresh token persistence
    /// * `saves` - Save id lookup
    /// * `authenticator` - Password verification and access token signing
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        saves: Arc<SR>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            users,
            saves,
            refresh_tokens: RefreshTokenStore::new(refresh_tokens),
            authenticator,
        }
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, SessionError> {
        // A name that could never have been registered is just an unknown user.
        let Ok(username) = Username::new(username.to_string()) else {
            return Ok(None);
        };

        self.users
            .find_by_username(&username)
            .await
            .map_err(|e| store_failure(e, "Failed to look up user"))
    }

    async fn verify_password(&self, password: &str, user: &User) -> Result<(), SessionError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();

        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &stored_hash))
            .await
            .map_err(|e| SessionError::HashingFailure(e.to_string()))?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
                AuthenticationError::Password(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Password verification failed");
                    SessionError::HashingFailure(err.to_string())
                }
                AuthenticationError::AccessToken(err) => SessionError::AccessToken(err),
            })
    }

    /// Same password work as a wrong password, so response time does not reveal
    /// whether the username exists.
    async fn reject_unknown_user(&self, password: &str) -> SessionError {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();

        match tokio::task::spawn_blocking(move || authenticator.reject_unknown_account(&password))
            .await
        {
            Ok(AuthenticationError::InvalidCredentials) => {}
            Ok(err) => tracing::error!(error = %err, "Unknown account verification failed"),
            Err(e) => tracing::error!(error = %e, "Unknown account verification task failed"),
        }

        SessionError::InvalidCredentials
    }
}

fn store_failure(err: StoreError, context: &'static str) -> SessionError {
    tracing::error!(error = %err, "{}", context);
    SessionError::from(err)
}

#[async_trait]
impl<UR, RR, SR> SessionServicePort for SessionService<UR, RR, SR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    SR: SaveRepository,
{
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, SessionError> {
        let Some(user) = self.find_user(username).await? else {
            return Err(self.reject_unknown_user(password).await);
        };

        self.verify_password(password, &user).await?;

        let access_token = self
            .authenticator
            .issue_access_token(user.id, access_token_ttl())?;

        // If this write fails the access token above is dropped, never returned.
        let refresh_token = RefreshTokenStore::<RR>::generate();
        let expires_at = Utc::now() + refresh_token_lifetime();
        self.refresh_tokens
            .persist(&refresh_token, user.id, expires_at)
            .await
            .map_err(|e| store_failure(e, "Failed to store refresh token"))?;

        let save_id = self
            .saves
            .find_id_by_user(&user.id)
            .await
            .map_err(|e| store_failure(e, "Failed to look up save id"))?;

        tracing::info!(user_id = %user.id, new_player = save_id.is_none(), "User logged in");

        Ok(LoginOutcome {
            user,
            access_token,
            refresh_token,
            save_id,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, SessionError> {
        let user_id = self
            .refresh_tokens
            .resolve(refresh_token)
            .await
            .map_err(|e| match e {
                RefreshTokenError::Store(err) => store_failure(err, "Failed to resolve refresh token"),
                other => {
                    tracing::info!(reason = %other, "Refresh token rejected");
                    SessionError::InvalidRefreshToken(other)
                }
            })?;

        let access_token = self
            .authenticator
            .issue_access_token(user_id, access_token_ttl())?;

        Ok(RefreshOutcome { access_token })
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        self.refresh_tokens
            .revoke(refresh_token)
            .await
            .map_err(|e| match e {
                RefreshTokenError::Store(err) => store_failure(err, "Failed to revoke refresh token"),
                RefreshTokenError::NotFound => SessionError::TokenNotFound,
                other => SessionError::InvalidRefreshToken(other),
            })
    }
}
