use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::errors::StoreError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let hasher = self.password_hasher;
        let password = command.password;

        // Argon2 is CPU bound; hash on the blocking pool.
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::HashingFailure(e.to_string()))?
            .map_err(|e| UserError::HashingFailure(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let username = user.username.to_string();
        let created_user = self.repository.create(user).await.map_err(|e| match e {
            StoreError::Conflict(_) => UserError::UsernameAlreadyExists(username),
            other => {
                tracing::error!(error = %other, "Failed to persist new user");
                UserError::Store(other)
            }
        })?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
