use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::StoreError;
use crate::domain::session::models::SaveId;
use crate::domain::session::ports::SaveRepository;
use crate::domain::user::models::UserId;

/// Read-only view of the `saves` table. Save data itself is owned elsewhere.
pub struct PostgresSaveRepository {
    pool: PgPool,
}

impl PostgresSaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaveRepository for PostgresSaveRepository {
    async fn find_id_by_user(&self, user_id: &UserId) -> Result<Option<SaveId>, StoreError> {
        let id: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id
            FROM saves
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.map(SaveId))
    }
}
