//! Authentication utilities

mod password;
mod token;

pub use password::{HashingError, PasswordService};
pub use token::{Claims, IssuedToken, TokenError, TokenService};
