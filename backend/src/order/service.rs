use std::sync::Arc;

use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::listing::{ListingService, ListingStatus};
use crate::models::{PaginatedResponse, PaginationParams};
use crate::order::model::{CreateOrderRequest, Order, OrderListQuery, OrderRow, OrderStatus};

/// Who is asking to change an order's status
#[derive(Debug, Clone, Copy)]
pub enum StatusActor {
    Admin,
    Buyer(Uuid),
}

/// Check a requested transition before it reaches the database
pub fn check_transition(
    order: &Order,
    next: OrderStatus,
    actor: StatusActor,
) -> Result<(), ApiError> {
    if let StatusActor::Buyer(buyer_id) = actor {
        if order.buyer_id != buyer_id {
            return Err(ApiError::NotFound("Order not found".to_string()));
        }
        if next != OrderStatus::Cancelled {
            return Err(ApiError::Forbidden(
                "Buyers may only cancel their orders".to_string(),
            ));
        }
    }

    if !order.status.can_transition_to(next) {
        return Err(ApiError::Conflict(format!(
            "Cannot move order from {} to {}",
            order.status, next
        )));
    }

    Ok(())
}

#[derive(Clone)]
pub struct OrderService {
    db_pool: PgPool,
    listing_service: Arc<ListingService>,
}

impl OrderService {
    pub fn new(db_pool: PgPool, listing_service: Arc<ListingService>) -> Self {
        Self {
            db_pool,
            listing_service,
        }
    }

    pub async fn create_order(
        &self,
        buyer_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<Order, ApiError> {
        let listing = self.listing_service.get_listing(request.listing_id).await?;
        if listing.status != ListingStatus::Approved {
            return Err(ApiError::BadRequest(
                "Listing is not available for orders".to_string(),
            ));
        }

        let now = Utc::now();
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (id, listing_id, buyer_id, price, content, notes, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(listing.id)
        .bind(buyer_id)
        .bind(listing.effective_price())
        .bind(Json(&request.content))
        .bind(&request.notes)
        .bind(OrderStatus::Pending)
        .bind(now)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(order_id = %row.id, listing_id = %listing.id, buyer_id = %buyer_id, price = row.price, "Order placed");

        Ok(row.into())
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Order, ApiError> {
        let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

        Ok(row.into())
    }

    /// Orders visible to the caller; `buyer_id = None` lists every order
    pub async fn list_orders(
        &self,
        buyer_id: Option<Uuid>,
        query: OrderListQuery,
    ) -> Result<PaginatedResponse<Order>, ApiError> {
        let (page, limit, offset) = PaginationParams {
            page: query.page,
            limit: query.limit,
        }
        .resolve();

        let mut query_builder = sqlx::QueryBuilder::new("SELECT * FROM orders WHERE 1=1");
        let mut count_builder = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM orders WHERE 1=1");

        if let Some(buyer_id) = buyer_id {
            query_builder.push(" AND buyer_id = ");
            query_builder.push_bind(buyer_id);
            count_builder.push(" AND buyer_id = ");
            count_builder.push_bind(buyer_id);
        }

        if let Some(status) = query.status {
            query_builder.push(" AND status = ");
            query_builder.push_bind(status);
            count_builder.push(" AND status = ");
            count_builder.push_bind(status);
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
            .build_query_as::<OrderRow>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(Order::from).collect(),
            total,
            page,
            limit,
        })
    }

    /// Apply a status transition; a concurrent change to the same order yields a conflict
    pub async fn update_status(
        &self,
        id: Uuid,
        next: OrderStatus,
        actor: StatusActor,
    ) -> Result<Order, ApiError> {
        let order = self.get_order(id).await?;
        check_transition(&order, next, actor)?;

        let row = sqlx::query_as::<_, OrderRow>(
            "UPDATE orders SET status = $1, updated_at = $2 WHERE id = $3 AND status = $4 RETURNING *",
        )
        .bind(next)
        .bind(Utc::now())
        .bind(id)
        .bind(order.status)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::Conflict("Order status changed concurrently".to_string()))?;

        tracing::info!(order_id = %id, from = %order.status, to = %next, "Order status changed");

        Ok(row.into())
    }
}
