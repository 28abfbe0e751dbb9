use crate::domain::user::User;
use crate::error::{AppError, Result};
use crate::storage::{self, UserStore};
use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    op_timeout: Duration,
}

impl UserService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, op_timeout: Duration) -> Self {
        Self { store, op_timeout }
    }

    /// Assigns an id and creation time, then persists the user.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the insert fails or times out.
    #[tracing::instrument(
        skip(self, password),
        fields(user.id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn create(&self, username: String, password: String) -> Result<User> {
        let user = User::new(username, password);
        tracing::Span::current().record("user.id", tracing::field::display(user.id));

        self.bounded(self.store.insert(&user)).await.map_err(|e| AppError::storage("failed to create user", e))?;

        tracing::info!("User created");
        Ok(user)
    }

    /// Looks up a single user by the hex form of its id.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if `raw_id` is not a valid object id,
    /// `AppError::NotFound` if no user has that id, and `AppError::Storage` on
    /// any other failure.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get(&self, raw_id: &str) -> Result<User> {
        let id = ObjectId::parse_str(raw_id).map_err(|_| AppError::BadRequest("invalid user id".into()))?;

        self.bounded(self.store.find_by_id(id))
            .await
            .map_err(|e| AppError::storage("failed to fetch user", e))?
            .ok_or_else(|| AppError::NotFound("user not found".into()))
    }

    /// Returns every stored user.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the scan fails, times out, or hits an undecodable document.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = self.bounded(self.store.find_all()).await.map_err(|e| AppError::storage("failed to fetch users", e))?;

        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    async fn bounded<T>(&self, op: impl Future<Output = storage::Result<T>>) -> storage::Result<T> {
        storage::within(self.op_timeout, op).await
    }
}
