//! # auth-service
//!
//! Application layer containing the registration, login and identity lookup
//! use cases plus their request/response DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    CurrentUserResponse, HealthChecks, HealthResponse, LoginRequest, LoginResponse,
    ReadinessResponse, RegisterRequest, RegisterResponse, UserProfileResponse, UserResponse,
};
pub use services::{
    AuthService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
