//! Authentication service
//!
//! Handles user registration and login. Argon2 work runs on the blocking
//! thread pool so it never stalls the async workers.

use auth_common::AppError;
use auth_core::entities::User;
use auth_core::DomainError;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// The email pre-check gives an early error; the store's unique
    /// constraint still decides concurrent registrations.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        request.validate()?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            warn!("Registration rejected: email already registered");
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.hash_password(request.password).await?;

        let user = User::new(request.username, request.email);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(RegisterResponse::new(UserResponse::from(&user)))
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password fail with the same error.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        request.validate()?;

        let Some(user) = self.ctx.user_repo().find_by_email(&request.email).await? else {
            warn!("Login failed: user not found");
            return Err(AppError::InvalidCredentials.into());
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Err(AppError::InvalidCredentials.into());
        };

        if !self.verify_password(request.password, password_hash).await? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let issued = self.ctx.token_service().issue(&user)?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginResponse::new(
            issued.token,
            issued.token_type,
            issued.expires_in,
        ))
    }

    async fn hash_password(&self, password: String) -> ServiceResult<String> {
        let hasher = self.ctx.password_service().clone();

        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(AppError::from)?;

        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: String) -> ServiceResult<bool> {
        let hasher = self.ctx.password_service().clone();

        let is_valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| {
                ServiceError::internal(format!("Password verification task failed: {e}"))
            })?
            .map_err(AppError::from)?;

        Ok(is_valid)
    }
}
