//! Bulk listing import from CSV
//!
//! parse -> per-row validation -> transform -> sequential create.

mod parse;
mod pipeline;
mod transform;
mod validate;

use serde_json::json;
use thiserror::Error;

use crate::error::ApiError;

pub use parse::{parse_csv, CsvRecord, ParsedCsv};
pub use pipeline::{
    import_csv, run_import, validate_csv, CreatedRow, FailedRow, ImportReport, ListingSink,
    ValidatedImport, ValidatedRow,
};
pub use transform::{record_to_draft, split_list};
pub use validate::{
    parse_bool_flag, validate_row, validate_rows, RowError, ValidationSummary, DISPLAY_LIMIT,
    REQUIRED_FIELDS,
};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Could not read CSV: {0}")]
    Csv(String),

    #[error("CSV file has no data rows")]
    Empty,

    #[error("{} validation errors in CSV", .0.len())]
    Validation(Vec<RowError>),

    #[error("Row {row}: {message}")]
    Transform { row: usize, message: String },
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Validation(errors) => {
                let summary = ValidationSummary::new(&errors);
                ApiError::ValidationError {
                    message: format!("{} validation errors in CSV", errors.len()),
                    details: Some(json!({
                        "summary": summary.lines(),
                        "totalErrors": summary.total_errors,
                        "errors": errors,
                    })),
                }
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}
