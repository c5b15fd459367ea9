use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::{self, DbError, DbStatus};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_listings: Option<i64>,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn from_check(check: Result<DbStatus, DbError>) -> (StatusCode, Self) {
        match check {
            Ok(db) => (
                StatusCode::OK,
                Self {
                    status: "healthy",
                    database: "connected".to_string(),
                    schema_version: db.schema_version,
                    approved_listings: Some(db.approved_listings),
                    version: env!("CARGO_PKG_VERSION"),
                },
            ),
            Err(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Self {
                    status: "unhealthy",
                    database: format!("error: {}", e),
                    schema_version: None,
                    approved_listings: None,
                    version: env!("CARGO_PKG_VERSION"),
                },
            ),
        }
    }
}

/// GET /health - Database connectivity, schema version and catalogue size
pub async fn health_check(State(pool): State<PgPool>) -> (StatusCode, Json<HealthResponse>) {
    let (code, body) = HealthResponse::from_check(db::check_health(&pool).await);
    (code, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_reports_catalogue() {
        let (code, body) = HealthResponse::from_check(Ok(DbStatus {
            schema_version: Some(20240101000000),
            approved_listings: 42,
        }));

        assert_eq!(code, StatusCode::OK);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["schemaVersion"], 20240101000000_i64);
        assert_eq!(json["approvedListings"], 42);
    }

    #[test]
    fn test_unreachable_database_is_503() {
        let (code, body) = HealthResponse::from_check(Err(DbError::HealthCheckError(
            "connection refused".to_string(),
        )));

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "unhealthy");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("approvedListings").is_none());
    }
}
