use mongodb::bson::oid::ObjectId;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ObjectId,
    pub username: String,
    /// Kept exactly as submitted. Passwords are not hashed by this service.
    pub password: String,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Builds a fresh user with a newly generated id and the current time.
    #[must_use]
    pub fn new(username: String, password: String) -> Self {
        Self { id: ObjectId::new(), username, password, created_at: now_millis() }
    }
}

/// Current UTC time truncated to whole milliseconds, the precision of a BSON date.
#[must_use]
pub fn now_millis() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(u32::from(now.millisecond()) * 1_000_000).unwrap_or(now)
}
