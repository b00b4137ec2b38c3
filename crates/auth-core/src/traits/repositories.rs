//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the credential store, and the
//! infrastructure layer provides the implementation.

use async_trait::async_trait;

use crate::entities::User;
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Credential store.
///
/// Implementations must enforce email uniqueness themselves: `create` returns
/// `DomainError::EmailAlreadyExists` when the email is already taken, even if
/// a concurrent caller passed the `email_exists` check at the same time.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email (exact, case-sensitive match)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user with its password hash
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Check that the store is reachable
    async fn health_check(&self) -> RepoResult<()>;
}
