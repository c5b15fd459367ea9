//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::AuthService;
use crate::config::Config;
use crate::content::PageService;
use crate::listing::ListingService;
use crate::marketplace::MarketplaceService;
use crate::order::OrderService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub auth_service: Arc<AuthService>,
    pub listing_service: Arc<ListingService>,
    pub marketplace_service: Arc<MarketplaceService>,
    pub page_service: Arc<PageService>,
    pub order_service: Arc<OrderService>,
}

impl AppState {
    /// Wire every service onto one pool
    pub fn new(db_pool: PgPool, config: Config) -> Self {
        let auth_service = Arc::new(AuthService::new(
            db_pool.clone(),
            config.jwt_secret.clone(),
            config.jwt_access_token_ttl_seconds,
        ));
        let listing_service = Arc::new(ListingService::new(db_pool.clone()));
        let marketplace_service = Arc::new(MarketplaceService::new(
            listing_service.clone(),
            config.marketplace_page_size,
        ));
        let page_service = Arc::new(PageService::new(db_pool.clone()));
        let order_service = Arc::new(OrderService::new(db_pool.clone(), listing_service.clone()));

        Self {
            db_pool,
            config: Arc::new(config),
            auth_service,
            listing_service,
            marketplace_service,
            page_service,
            order_service,
        }
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<ListingService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.listing_service.clone()
    }
}

impl FromRef<AppState> for Arc<MarketplaceService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.marketplace_service.clone()
    }
}

impl FromRef<AppState> for Arc<PageService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.page_service.clone()
    }
}

impl FromRef<AppState> for Arc<OrderService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.order_service.clone()
    }
}
