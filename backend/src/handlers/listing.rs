//! Listing CRUD and moderation handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::{AdminUser, OptionalUser, PublisherUser};
use crate::error::ApiError;
use crate::listing::{
    Listing, ListingDraft, ListingFilterQuery, ListingStatus, UpdateListingRequest,
    UpdateListingStatusRequest,
};
use crate::models::PaginatedResponse;
use crate::state::AppState;

/// GET /api/listings - All listings, filterable by status and seller
pub async fn list_listings(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(filter): Query<ListingFilterQuery>,
) -> Result<Json<PaginatedResponse<Listing>>, ApiError> {
    let listings = state.listing_service.list_listings(filter).await?;

    Ok(Json(listings))
}

/// POST /api/listings - New listings start out pending moderation
pub async fn create_listing(
    State(state): State<AppState>,
    PublisherUser(user): PublisherUser,
    Json(draft): Json<ListingDraft>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let listing = state
        .listing_service
        .create_listing(Some(user.user_id), draft)
        .await?;

    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/listings/:id - Unapproved listings are visible to their seller and admins only
pub async fn get_listing(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Listing>, ApiError> {
    let listing = state.listing_service.get_listing(id).await?;

    let visible = listing.status == ListingStatus::Approved
        || user.is_some_and(|u| u.is_admin() || listing.seller_id == Some(u.user_id));
    if !visible {
        return Err(ApiError::NotFound("Listing not found".to_string()));
    }

    Ok(Json(listing))
}

/// PUT /api/listings/:id
pub async fn update_listing(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateListingRequest>,
) -> Result<Json<Listing>, ApiError> {
    let listing = state.listing_service.update_listing(id, req).await?;

    Ok(Json(listing))
}

/// PUT /api/listings/:id/status
pub async fn update_listing_status(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateListingStatusRequest>,
) -> Result<Json<Listing>, ApiError> {
    let listing = state.listing_service.update_status(id, req.status).await?;

    Ok(Json(listing))
}

/// DELETE /api/listings/:id
pub async fn delete_listing(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.listing_service.delete_listing(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
