//! Bulk CSV import handlers
//!
//! The CSV arrives either as the raw request body or as the `file` field of a
//! multipart form.

use axum::{
    body::{to_bytes, Bytes},
    extract::{multipart::MultipartError, FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use serde::Serialize;

use super::AdminUser;
use crate::error::ApiError;
use crate::import::{import_csv, validate_csv, ImportReport, ValidatedRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ValidateImportResponse {
    pub valid: bool,
    pub rows: usize,
    pub listings: Vec<ValidatedRow>,
}

fn too_large(limit: usize) -> ApiError {
    ApiError::PayloadTooLarge(format!("CSV exceeds {} bytes", limit))
}

fn multipart_error(e: MultipartError, limit: usize) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(limit)
    } else {
        ApiError::BadRequest(e.body_text())
    }
}

async fn read_csv_body(state: &AppState, request: Request) -> Result<Bytes, ApiError> {
    let limit = state.config.import_max_bytes;
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let bytes = if is_multipart {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let mut file = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, limit))?
        {
            if field.name() == Some("file") {
                file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error(e, limit))?,
                );
                break;
            }
        }
        file.ok_or_else(|| ApiError::BadRequest("Multipart field 'file' is required".to_string()))?
    } else {
        to_bytes(request.into_body(), limit)
            .await
            .map_err(|_| too_large(limit))?
    };

    if bytes.len() > limit {
        return Err(too_large(limit));
    }
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("CSV body is empty".to_string()));
    }

    Ok(bytes)
}

/// POST /api/listings/import/validate - Check every row without creating anything
pub async fn validate_import(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    request: Request,
) -> Result<Json<ValidateImportResponse>, ApiError> {
    let bytes = read_csv_body(&state, request).await?;
    let validated = validate_csv(&bytes)?;

    Ok(Json(ValidateImportResponse {
        valid: true,
        rows: validated.rows.len(),
        listings: validated.rows,
    }))
}

/// POST /api/listings/import - Validate the whole file, then create rows one by one
pub async fn import_listings(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    request: Request,
) -> Result<Json<ImportReport>, ApiError> {
    let bytes = read_csv_body(&state, request).await?;

    tracing::info!(admin_id = %admin.user_id, bytes = bytes.len(), "Listing import started");
    let report = import_csv(state.listing_service.as_ref(), None, &bytes).await?;

    Ok(Json(report))
}
