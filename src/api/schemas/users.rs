use crate::domain::user::User as DomainUser;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Body of `POST /users`. Any other fields, including a client supplied
/// `id` or `created_at`, are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<DomainUser> for User {
    fn from(user: DomainUser) -> Self {
        Self { id: user.id.to_hex(), username: user.username, password: user.password, created_at: user.created_at }
    }
}
