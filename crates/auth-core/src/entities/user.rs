//! User entity - a registered account
//!
//! The password hash is deliberately not part of the entity. It only ever
//! leaves the credential store through `UserRepository::get_password_hash`.

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a freshly generated ID
    pub fn new(username: String, email: String) -> Self {
        Self::with_id(UserId::generate(), username, email)
    }

    /// Create a new User with a known ID
    pub fn with_id(id: UserId, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            created_at: now,
            updated_at: now,
        }
    }
}
