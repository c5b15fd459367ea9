//! Orders: buyer purchases of a listing's backlink placement

pub mod model;
mod service;

pub use model::*;
pub use service::{check_transition, OrderService, StatusActor};
