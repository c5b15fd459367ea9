//! API handlers for the backlink marketplace

pub mod auth;
pub mod content;
pub mod health;
pub mod import;
pub mod listing;
pub mod marketplace;
pub mod order;
pub mod user;

pub use health::health_check;

// Re-export extractors from middleware for handler use
pub use crate::middleware::auth::{AdminUser, AuthenticatedUser, OptionalUser, PublisherUser};
