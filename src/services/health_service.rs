use crate::storage::UserStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn UserStore>,
    db_timeout: Duration,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, db_timeout: Duration) -> Self {
        Self { store, db_timeout }
    }

    /// Checks database connectivity.
    ///
    /// # Errors
    /// Returns a string describing the failure if the database is unreachable.
    pub async fn check_db(&self) -> Result<(), String> {
        match timeout(self.db_timeout, self.store.ping()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("Database connection failed: {e}")),
            Err(_) => Err(format!("Database connection timed out after {:?}", self.db_timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;
    use crate::storage::memory::MemoryUserStore;
    use crate::storage::{Result, StorageError};
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;

    #[derive(Debug)]
    struct UnreachableStore;

    #[async_trait]
    impl UserStore for UnreachableStore {
        async fn insert(&self, _user: &User) -> Result<()> {
            Err(StorageError::Timeout(Duration::from_secs(60)))
        }

        async fn find_by_id(&self, _id: ObjectId) -> Result<Option<User>> {
            Err(StorageError::Timeout(Duration::from_secs(60)))
        }

        async fn find_all(&self) -> Result<Vec<User>> {
            Err(StorageError::Timeout(Duration::from_secs(60)))
        }

        async fn ping(&self) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_check_db_ok() {
        let service = HealthService::new(Arc::new(MemoryUserStore::new()), Duration::from_secs(1));
        assert!(service.check_db().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_db_timeout() {
        let service = HealthService::new(Arc::new(UnreachableStore), Duration::from_secs(10));

        let err = service.check_db().await.unwrap_err();
        assert!(err.contains("timed out"));
    }
}
