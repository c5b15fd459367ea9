//! Admin user management routes

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::handlers::user;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(user::list_users))
        .route("/api/users/:id/role", put(user::update_user_role))
        .route("/api/users/:id", delete(user::delete_user))
}
