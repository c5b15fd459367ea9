use std::sync::Arc;

use super::filter::{ListingFilter, MarketplaceQuery};
use super::pagination::{paginate, Page};
use crate::error::ApiError;
use crate::listing::{Listing, ListingService};

/// Filter approved listings and cut one page out of the result
pub fn browse(listings: Vec<Listing>, query: &MarketplaceQuery, page_size: usize) -> Page<Listing> {
    let filter = ListingFilter::from(query);
    let matched = filter.apply(listings);
    paginate(matched, query.page.unwrap_or(1), page_size)
}

#[derive(Clone)]
pub struct MarketplaceService {
    listing_service: Arc<ListingService>,
    page_size: usize,
}

impl MarketplaceService {
    pub fn new(listing_service: Arc<ListingService>, page_size: usize) -> Self {
        Self {
            listing_service,
            page_size: page_size.max(1),
        }
    }

    pub async fn search(&self, query: &MarketplaceQuery) -> Result<Page<Listing>, ApiError> {
        let listings = self.listing_service.list_approved().await?;
        let loaded = listings.len();
        let page = browse(listings, query, self.page_size);

        tracing::debug!(
            loaded,
            matched = page.total,
            page = page.page,
            "Marketplace query served"
        );

        Ok(page)
    }
}
