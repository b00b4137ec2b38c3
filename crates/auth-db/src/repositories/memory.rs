//! In-memory implementation of UserRepository
//!
//! Backed by two `DashMap`s: accounts keyed by id, and an email index that
//! doubles as the uniqueness constraint.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use auth_core::entities::User;
use auth_core::error::DomainError;
use auth_core::traits::{RepoResult, UserRepository};
use auth_core::value_objects::UserId;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// Process-local credential store
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, StoredUser>,
    emails: DashMap<String, UserId>,
}

impl InMemoryUserRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no account has been registered yet
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.user.clone()))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.emails.contains_key(email))
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        // The email claim and the insert happen while the index shard is locked.
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                self.users.insert(
                    user.id,
                    StoredUser {
                        user: user.clone(),
                        password_hash: password_hash.to_string(),
                    },
                );
                slot.insert(user.id);
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.users.get(&id).map(|entry| entry.password_hash.clone()))
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
