//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{AccessToken, Claims, JwtService, TokenType};
pub use password::{hash_password, verify_against_dummy, verify_password};
