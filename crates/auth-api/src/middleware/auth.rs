//! Bearer-token auth gate
//!
//! Route layer that turns the `Authorization` header into an [`AuthContext`]
//! or rejects the request before the handler runs.

use auth_common::{AppError, Claims, TokenError};
use auth_core::UserId;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::warn;

use crate::response::ApiError;
use crate::state::AppState;

/// Identity established by the auth gate for one request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: UserId,
    pub claims: Claims,
}

/// Require a valid bearer token
///
/// A missing header or a non-Bearer scheme is `MISSING_AUTH`. Every token
/// failure is `INVALID_TOKEN`; the specific kind only goes to the log.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>()
    else {
        return Err(AppError::MissingAuth.into());
    };

    let claims = state
        .token_service()
        .validate(bearer.token())
        .map_err(reject)?;
    let user_id = claims.user_id().map_err(reject)?;

    request
        .extensions_mut()
        .insert(AuthContext { user_id, claims });

    Ok(next.run(request).await)
}

fn reject(kind: TokenError) -> ApiError {
    warn!(reason = %kind, "Rejected bearer token");
    AppError::InvalidToken(kind).into()
}
