use crate::domain::user::User;
use crate::storage::StorageError;
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Shape of a user document in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub password: String,
    pub created_at: DateTime,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        let millis = user.created_at.unix_timestamp() * 1000 + i64::from(user.created_at.millisecond());
        Self {
            id: user.id,
            username: user.username.clone(),
            password: user.password.clone(),
            created_at: DateTime::from_millis(millis),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = StorageError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let nanos = i128::from(document.created_at.timestamp_millis()) * 1_000_000;
        let created_at = OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map_err(|e| StorageError::Corrupt(format!("user {} has an invalid created_at: {e}", document.id)))?;

        Ok(Self { id: document.id, username: document.username, password: document.password, created_at })
    }
}
