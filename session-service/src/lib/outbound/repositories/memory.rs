use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::StoreError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::SaveId;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SaveRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Process-local store implementing every repository port. Nothing survives a restart;
/// used by tests and local runs without a database.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    refresh_tokens: RwLock<HashMap<String, RefreshToken>>,
    saves: RwLock<HashMap<UserId, SaveId>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a save record to `user_id` and return its id.
    pub async fn insert_save(&self, user_id: UserId) -> SaveId {
        let save_id = SaveId(Uuid::new_v4());
        self.saves.write().await.insert(user_id, save_id);
        save_id
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("users_username_key".to_string()));
        }
        if users.contains_key(&user.id) {
            return Err(StoreError::Conflict("users_pkey".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryStore {
    async fn store(&self, token: RefreshToken) -> Result<RefreshToken, StoreError> {
        let mut refresh_tokens = self.refresh_tokens.write().await;

        if refresh_tokens.contains_key(&token.token) {
            return Err(StoreError::Conflict("refresh_tokens_pkey".to_string()));
        }

        refresh_tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
        Ok(self.refresh_tokens.read().await.get(token).cloned())
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut refresh_tokens = self.refresh_tokens.write().await;
        let record = refresh_tokens.get_mut(token).ok_or(StoreError::NotFound)?;

        record.revoked_at.get_or_insert(revoked_at);
        Ok(())
    }
}

#[async_trait]
impl SaveRepository for InMemoryStore {
    async fn find_id_by_user(&self, user_id: &UserId) -> Result<Option<SaveId>, StoreError> {
        Ok(self.saves.read().await.get(user_id).copied())
    }
}
