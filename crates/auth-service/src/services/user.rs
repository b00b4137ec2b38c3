//! User service
//!
//! Resolves the authenticated identity to its stored account.

use auth_core::{DomainError, UserId};
use tracing::instrument;

use crate::dto::{CurrentUserResponse, UserProfileResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get current authenticated user
    ///
    /// A valid token for an account that no longer exists yields
    /// `DomainError::UserNotFound`.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: UserId) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(CurrentUserResponse::new(UserProfileResponse::from(&user)))
    }
}
