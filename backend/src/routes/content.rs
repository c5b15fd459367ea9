//! CMS content routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::content;
use crate::state::AppState;

pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/content",
            get(content::list_pages).post(content::create_page),
        )
        .route("/api/content/preview", post(content::preview_section))
        .route(
            "/api/content/:id",
            get(content::get_page)
                .put(content::update_page)
                .delete(content::delete_page),
        )
        .route("/api/pages/:slug/render", get(content::render_published_page))
}
