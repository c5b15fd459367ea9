//! HTTP middleware: request logging, security headers and auth extractors

pub mod auth;
mod security;
mod tracing;

pub use auth::{AdminUser, AuthenticatedUser, OptionalUser, PublisherUser};
pub use security::security_headers;
pub use tracing::{request_tracing, REQUEST_ID_HEADER};
