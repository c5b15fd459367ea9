use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::ApiError;
use crate::listing::Listing;
use crate::marketplace::{MarketplaceQuery, Page};
use crate::state::AppState;

/// GET /api/marketplace - Approved listings matching every supplied filter
pub async fn browse_marketplace(
    State(state): State<AppState>,
    Query(query): Query<MarketplaceQuery>,
) -> Result<Json<Page<Listing>>, ApiError> {
    let page = state.marketplace_service.search(&query).await?;

    Ok(Json(page))
}
