use crate::domain::user::User;
use crate::storage::{Result, UserStore};
use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

/// Process-local store used in tests and local runs without a database.
#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<ObjectId, User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> Result<()> {
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
