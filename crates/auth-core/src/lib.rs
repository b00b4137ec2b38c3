//! # auth-core
//!
//! Domain layer containing the user entity, identifiers, domain errors, and the
//! credential store trait. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::User;
pub use error::DomainError;
pub use traits::{RepoResult, UserRepository};
pub use value_objects::{UserId, UserIdParseError};
