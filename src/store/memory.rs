use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::{Principal, ProfileUpdate, UserRecord};

/// Keeps user records in process memory.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record, returning its id.
    pub async fn insert(&self, record: UserRecord) -> Uuid {
        let id = record.id;
        self.users.write().await.insert(id, record);
        id
    }

    pub async fn remove(&self, id: Uuid) -> Option<UserRecord> {
        self.users.write().await.remove(&id)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_principal(&self, id: Uuid) -> Result<Option<Principal>, StoreError> {
        Ok(self.users.read().await.get(&id).map(UserRecord::to_principal))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<Principal>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|record| {
            record.apply(update);
            record.to_principal()
        }))
    }

    async fn ping(&self) -> bool {
        true
    }
}
