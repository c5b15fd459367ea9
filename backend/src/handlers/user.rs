//! Admin user management handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::AdminUser;
use crate::error::ApiError;
use crate::models::{PaginatedResponse, PaginationParams, UpdateRoleRequest, UserResponse};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiError> {
    let users = state.auth_service.list_users(params).await?;

    Ok(Json(users))
}

/// PUT /api/users/:id/role
pub async fn update_user_role(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth_service.update_role(user_id, req.role).await?;

    Ok(Json(user.into()))
}

/// DELETE /api/users/:id - An admin cannot delete their own account
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .auth_service
        .delete_user(admin.user_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
