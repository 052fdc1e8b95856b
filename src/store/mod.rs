//! User-record storage.
//!
//! The authenticator and the profile routes only talk to [`UserStore`]. Production
//! runs on [`PgUserStore`]; [`MemoryUserStore`] backs tests and local experiments.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Principal, ProfileUpdate};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by id, returning only non-secret fields.
    async fn find_principal(&self, id: Uuid) -> Result<Option<Principal>, StoreError>;

    /// Writes the present fields of `update`. `None` when the user does not exist.
    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<Principal>, StoreError>;

    /// Whether the backing storage is reachable.
    async fn ping(&self) -> bool;
}
