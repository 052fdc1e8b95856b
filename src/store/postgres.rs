use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::{Principal, ProfileUpdate};

// Never select password_hash here.
const PRINCIPAL_COLUMNS: &str =
    "id, name, email, role, phone, location, profile_image, created_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_principal(&self, id: Uuid) -> Result<Option<Principal>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", PRINCIPAL_COLUMNS);
        let principal = sqlx::query_as::<_, Principal>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(principal)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<Principal>, StoreError> {
        let sql = format!(
            "UPDATE users \
             SET name = COALESCE($2, name), \
                 phone = COALESCE($3, phone), \
                 location = COALESCE($4, location), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            PRINCIPAL_COLUMNS
        );
        let principal = sqlx::query_as::<_, Principal>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(&update.phone)
            .bind(&update.location)
            .fetch_optional(&self.pool)
            .await?;
        Ok(principal)
    }

    async fn ping(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Database ping failed: {}", e);
                false
            }
        }
    }
}
