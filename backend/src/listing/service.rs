use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::import::ListingSink;
use crate::listing::model::{
    Listing, ListingDraft, ListingFilterQuery, ListingRow, ListingStatus, UpdateListingRequest,
};
use crate::models::{PaginatedResponse, PaginationParams};

#[derive(Clone)]
pub struct ListingService {
    db_pool: PgPool,
}

impl ListingService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn create_listing(
        &self,
        seller_id: Option<Uuid>,
        draft: ListingDraft,
    ) -> Result<Listing, ApiError> {
        draft.validate().map_err(ApiError::validation)?;

        let now = Utc::now();
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            INSERT INTO listings (
                id, seller_id, price, offer_rate, category, website, terms,
                language, metrics, niches, accepted_content, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(seller_id)
        .bind(draft.price)
        .bind(draft.offer_rate)
        .bind(&draft.category)
        .bind(Json(&draft.website))
        .bind(Json(&draft.terms))
        .bind(Json(&draft.language))
        .bind(Json(&draft.metrics))
        .bind(Json(&draft.niches))
        .bind(Json(&draft.accepted_content))
        .bind(ListingStatus::Pending)
        .bind(now)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(listing_id = %row.id, domain = %draft.website.domain, "Listing created");

        Ok(row.into())
    }

    pub async fn get_listing(&self, id: Uuid) -> Result<Listing, ApiError> {
        let row = sqlx::query_as::<_, ListingRow>("SELECT * FROM listings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Listing not found".to_string()))?;

        Ok(row.into())
    }

    pub async fn list_listings(
        &self,
        filter: ListingFilterQuery,
    ) -> Result<PaginatedResponse<Listing>, ApiError> {
        let (page, limit, offset) = PaginationParams {
            page: filter.page,
            limit: filter.limit,
        }
        .resolve();

        let mut query_builder = sqlx::QueryBuilder::new("SELECT * FROM listings WHERE 1=1");
        let mut count_builder = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM listings WHERE 1=1");

        if let Some(status) = filter.status {
            query_builder.push(" AND status = ");
            query_builder.push_bind(status);
            count_builder.push(" AND status = ");
            count_builder.push_bind(status);
        }

        if let Some(seller_id) = filter.seller_id {
            query_builder.push(" AND seller_id = ");
            query_builder.push_bind(seller_id);
            count_builder.push(" AND seller_id = ");
            count_builder.push_bind(seller_id);
        }

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.db_pool)
            .await?;

        query_builder.push(" ORDER BY created_at DESC LIMIT ");
        query_builder.push_bind(limit);
        query_builder.push(" OFFSET ");
        query_builder.push_bind(offset);

        let rows = query_builder
            .build_query_as::<ListingRow>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(Listing::from).collect(),
            total,
            page,
            limit,
        })
    }

    /// Every approved listing, newest first; the marketplace filters these in memory
    pub async fn list_approved(&self) -> Result<Vec<Listing>, ApiError> {
        let rows = sqlx::query_as::<_, ListingRow>(
            "SELECT * FROM listings WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(ListingStatus::Approved)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    pub async fn update_listing(
        &self,
        id: Uuid,
        request: UpdateListingRequest,
    ) -> Result<Listing, ApiError> {
        let existing = self.get_listing(id).await?;
        let draft = request.apply_to(&existing);
        draft.validate().map_err(ApiError::validation)?;

        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            UPDATE listings SET
                price = $1, offer_rate = $2, category = $3, website = $4, terms = $5,
                language = $6, metrics = $7, niches = $8, accepted_content = $9,
                updated_at = $10
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(draft.price)
        .bind(draft.offer_rate)
        .bind(&draft.category)
        .bind(Json(&draft.website))
        .bind(Json(&draft.terms))
        .bind(Json(&draft.language))
        .bind(Json(&draft.metrics))
        .bind(Json(&draft.niches))
        .bind(Json(&draft.accepted_content))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Listing not found".to_string()))?;

        tracing::info!(listing_id = %id, "Listing updated");

        Ok(row.into())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ListingStatus,
    ) -> Result<Listing, ApiError> {
        let row = sqlx::query_as::<_, ListingRow>(
            "UPDATE listings SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Listing not found".to_string()))?;

        tracing::info!(listing_id = %id, status = ?status, "Listing status changed");

        Ok(row.into())
    }

    pub async fn delete_listing(&self, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Listing with ID {} not found", id)));
        }

        tracing::info!(listing_id = %id, "Listing deleted");

        Ok(())
    }
}

#[axum::async_trait]
impl ListingSink for ListingService {
    async fn create_listing(
        &self,
        seller_id: Option<Uuid>,
        draft: ListingDraft,
    ) -> Result<Listing, ApiError> {
        ListingService::create_listing(self, seller_id, draft).await
    }
}
