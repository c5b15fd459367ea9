//! Order routes

use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::order;
use crate::state::AppState;

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(order::list_orders).post(order::create_order))
        .route("/api/orders/:id", get(order::get_order))
        .route("/api/orders/:id/status", put(order::update_order_status))
}
