//! Route definitions for the backlink marketplace API

mod auth;
mod content;
mod listing;
mod order;
mod user;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

pub use auth::auth_routes;
pub use content::content_routes;
pub use listing::{listing_routes, marketplace_routes};
pub use order::order_routes;
pub use user::user_routes;

/// Full application router with middleware applied
pub fn app_router(state: AppState) -> Router {
    let cors = configure_cors(&state.config);
    let body_limit = state.config.import_max_bytes;

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(listing_routes())
        .merge(marketplace_routes())
        .merge(content_routes())
        .merge(order_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn root() -> &'static str {
    "Backlink Marketplace API"
}

/// Allow configured origins; with none configured any origin is accepted outside production
fn configure_cors(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        if config.environment.is_production() {
            tracing::warn!("No CORS origins configured; cross-origin requests will be refused");
            cors
        } else {
            cors.allow_origin(Any)
        }
    } else {
        cors.allow_origin(origins)
    }
}
