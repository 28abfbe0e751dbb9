use crate::domain::user::User;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

pub mod memory;
pub mod mongo;
pub mod records;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Runs a store operation, failing with `StorageError::Timeout` once `limit` elapses.
///
/// # Errors
/// Returns the operation's own error, or `StorageError::Timeout`.
pub async fn within<T>(limit: Duration, op: impl Future<Output = Result<T>>) -> Result<T> {
    timeout(limit, op).await.map_err(|_| StorageError::Timeout(limit))?
}

/// Persistence gateway for user documents.
///
/// Implementations must be safe to share across concurrent requests; callers
/// apply their own timeouts around every call.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Persists a new user as a single insert.
    ///
    /// # Errors
    /// Returns a `StorageError` if the write is rejected or the store is unreachable.
    async fn insert(&self, user: &User) -> Result<()>;

    /// Point lookup by id. `Ok(None)` means no such user.
    ///
    /// # Errors
    /// Returns a `StorageError` if the lookup fails or the document cannot be decoded.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>>;

    /// Returns every user, ordered by id.
    ///
    /// # Errors
    /// Returns a `StorageError` if the scan fails or any document cannot be decoded.
    async fn find_all(&self) -> Result<Vec<User>>;

    /// Round-trips a no-op command to check connectivity.
    ///
    /// # Errors
    /// Returns a `StorageError` if the store is unreachable.
    async fn ping(&self) -> Result<()>;
}
