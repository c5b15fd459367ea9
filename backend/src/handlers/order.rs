//! Order handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::order::{
    CreateOrderRequest, Order, OrderListQuery, StatusActor, UpdateOrderStatusRequest,
};
use crate::state::AppState;

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    req.validate()?;
    let order = state.order_service.create_order(user.user_id, req).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - The caller's orders; admins see every order
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<PaginatedResponse<Order>>, ApiError> {
    let buyer = if user.is_admin() {
        None
    } else {
        Some(user.user_id)
    };
    let orders = state.order_service.list_orders(buyer, query).await?;

    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = state.order_service.get_order(id).await?;

    if !user.is_admin() && order.buyer_id != user.user_id {
        return Err(ApiError::NotFound("Order not found".to_string()));
    }

    Ok(Json(order))
}

/// PUT /api/orders/:id/status - Buyers may only cancel; illegal transitions are 409
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let actor = if user.is_admin() {
        StatusActor::Admin
    } else {
        StatusActor::Buyer(user.user_id)
    };
    let order = state
        .order_service
        .update_status(id, req.status, actor)
        .await?;

    Ok(Json(order))
}
