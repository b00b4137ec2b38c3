//! Repository implementations
//!
//! Implementations of the `UserRepository` trait defined in auth-core.

mod error;
mod memory;
mod user;

pub use memory::InMemoryUserRepository;
pub use user::PgUserRepository;
