//! Marketplace listings: model, invariants and persistence

pub mod model;
mod service;

pub use model::*;
pub use service::ListingService;
