//! Listing, import and marketplace routes

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{import, listing, marketplace};
use crate::state::AppState;

pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/listings",
            get(listing::list_listings).post(listing::create_listing),
        )
        .route("/api/listings/import", post(import::import_listings))
        .route("/api/listings/import/validate", post(import::validate_import))
        .route(
            "/api/listings/:id",
            get(listing::get_listing)
                .put(listing::update_listing)
                .delete(listing::delete_listing),
        )
        .route("/api/listings/:id/status", put(listing::update_listing_status))
}

pub fn marketplace_routes() -> Router<AppState> {
    Router::new().route("/api/marketplace", get(marketplace::browse_marketplace))
}
