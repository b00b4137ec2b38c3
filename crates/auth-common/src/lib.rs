//! # auth-common
//!
//! Shared utilities including configuration, error handling, password hashing,
//! bearer tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, HashingError, IssuedToken, PasswordService, TokenError, TokenService};
pub use config::{
    parse_duration_secs, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, HashingConfig, JwtConfig, ServerConfig,
};
pub use error::{AppError, AppResult, ErrorResponse, INTERNAL_ERROR_MESSAGE};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError,
};
