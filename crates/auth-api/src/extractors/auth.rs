//! Authenticated user extractor
//!
//! Reads the `AuthContext` the auth gate stored in the request extensions.

use auth_common::AppError;
use auth_core::UserId;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::middleware::AuthContext;
use crate::response::ApiError;

/// Authenticated user for the current request
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: UserId,
}

impl From<AuthContext> for AuthUser {
    fn from(ctx: AuthContext) -> Self {
        Self {
            user_id: ctx.user_id,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Routes without the auth gate never carry a context
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthUser::from)
            .ok_or(ApiError::App(AppError::MissingAuth))
    }
}
