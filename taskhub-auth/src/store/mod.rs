//! Persistence interface for user accounts.
//!
//! The production store is an external collaborator; this crate only
//! needs lookup by id/email and a non-destructive partial update. The
//! in-memory implementation backs tests and local development.

pub mod memory;

pub use memory::MemoryUserStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{User, UserPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn create(&self, user: User) -> Result<User, StoreError>;

    /// Merge the patch into the stored record. Untouched fields keep their
    /// values. Returns the updated record, or `None` if the id is unknown.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, StoreError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
