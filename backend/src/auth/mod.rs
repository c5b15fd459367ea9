//! Authentication
//!
//! - Email/password accounts with bcrypt password hashes
//! - Stateless JWT access tokens carrying the user's role
//! - Admin user management

mod jwt;
mod service;

pub use jwt::{generate_access_token, verify_token, Claims, JwtError};
pub use service::{AuthError, AuthService};
