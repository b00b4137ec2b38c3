//! # auth-db
//!
//! Credential store implementations of the `UserRepository` trait defined in
//! `auth-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `PgUserRepository` (PostgreSQL) and `InMemoryUserRepository` (tests and
//!   local runs without a database)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_db::{create_pool, ensure_schema, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     ensure_schema(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ensure_schema, DatabaseConfig, PgPool};
pub use repositories::{InMemoryUserRepository, PgUserRepository};
