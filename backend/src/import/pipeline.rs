//! Validate-then-create import flow
//!
//! Validation is all-or-nothing: any failing row rejects the whole file
//! before a single listing is created. Creation is sequential and not
//! transactional; a failed row is recorded and the loop moves on, so a
//! report may mix successes and failures.

use serde::Serialize;
use uuid::Uuid;

use super::parse::parse_csv;
use super::transform::record_to_draft;
use super::validate::{validate_rows, RowError};
use super::ImportError;
use crate::error::ApiError;
use crate::listing::{Listing, ListingDraft};

/// Destination for imported listings
#[axum::async_trait]
pub trait ListingSink: Send + Sync {
    async fn create_listing(
        &self,
        seller_id: Option<Uuid>,
        draft: ListingDraft,
    ) -> Result<Listing, ApiError>;
}

/// Rows that passed validation, in file order
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedImport {
    pub rows: Vec<ValidatedRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidatedRow {
    pub row: usize,
    pub listing: ListingDraft,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedRow {
    pub row: usize,
    pub id: Uuid,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedRow {
    pub row: usize,
    pub domain: String,
    pub message: String,
}

/// Outcome of the create phase
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub created: Vec<CreatedRow>,
    pub errors: Vec<FailedRow>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.created.len() == self.total
    }
}

/// Parse, validate and transform every row without side effects
pub fn validate_csv(bytes: &[u8]) -> Result<ValidatedImport, ImportError> {
    let parsed = parse_csv(bytes)?;

    let errors = validate_rows(&parsed.records);
    if !errors.is_empty() {
        return Err(ImportError::Validation(errors));
    }

    let mut rows = Vec::with_capacity(parsed.records.len());
    let mut transform_errors = Vec::new();
    for record in &parsed.records {
        match record_to_draft(record) {
            Ok(listing) => rows.push(ValidatedRow {
                row: record.row,
                listing,
            }),
            Err(ImportError::Transform { row, message }) => transform_errors.push(RowError {
                row,
                field: "row".to_string(),
                message,
            }),
            Err(other) => return Err(other),
        }
    }

    if !transform_errors.is_empty() {
        return Err(ImportError::Validation(transform_errors));
    }

    Ok(ValidatedImport { rows })
}

/// Create each validated row in order, recording failures without stopping
pub async fn run_import<S>(sink: &S, seller_id: Option<Uuid>, import: ValidatedImport) -> ImportReport
where
    S: ListingSink + ?Sized,
{
    let mut report = ImportReport {
        total: import.rows.len(),
        ..Default::default()
    };

    for ValidatedRow { row, listing } in import.rows {
        let domain = listing.website.domain.clone();
        match sink.create_listing(seller_id, listing).await {
            Ok(created) => {
                tracing::debug!(row, listing_id = %created.id, domain = %domain, "Imported listing");
                report.created.push(CreatedRow {
                    row,
                    id: created.id,
                    domain,
                });
            }
            Err(e) => {
                tracing::warn!(row, domain = %domain, error = %e, "Failed to import listing");
                report.errors.push(FailedRow {
                    row,
                    domain,
                    message: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        total = report.total,
        created = report.created.len(),
        failed = report.errors.len(),
        "Listing import finished"
    );

    report
}

pub async fn import_csv<S>(
    sink: &S,
    seller_id: Option<Uuid>,
    bytes: &[u8],
) -> Result<ImportReport, ImportError>
where
    S: ListingSink + ?Sized,
{
    let validated = validate_csv(bytes)?;
    Ok(run_import(sink, seller_id, validated).await)
}
