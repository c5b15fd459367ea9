//! Marketplace browsing: in-memory filtering and page windows over approved listings

mod filter;
mod pagination;
mod service;

pub use filter::*;
pub use pagination::*;
pub use service::{browse, MarketplaceService};
