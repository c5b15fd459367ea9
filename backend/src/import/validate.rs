//! Per-row validation of listing CSV imports
//!
//! Rows are checked independently. A required field that is absent or blank
//! produces exactly one error; type and range checks only run on values that
//! are present, so a missing field is never reported twice.

use serde::Serialize;

use super::parse::CsvRecord;
use crate::listing::{ContentCategory, ContentPolicy, ContentWriter, ListingType};

/// Columns every row must carry
pub const REQUIRED_FIELDS: [&str; 19] = [
    "domain",
    "price",
    "listing_type",
    "is_permanent",
    "word_count",
    "working_days",
    "content_writer",
    "primary_language",
    "native_language",
    "category",
    "country_code",
    "da",
    "dr_value",
    "dr_percentage",
    "as_value",
    "traffic",
    "keywords",
    "ref_domains",
    "niches",
];

/// Optional per-country traffic columns: `country1_*` .. `country5_*`
pub const MAX_COUNTRY_COLUMNS: usize = 5;

/// How many errors a validation summary spells out
pub const DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl RowError {
    fn new(row: usize, field: &str, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {} - {}", self.row, self.field, self.message)
    }
}

/// Capped view of a validation failure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_errors: usize,
    pub shown: Vec<RowError>,
    pub remaining: usize,
}

impl ValidationSummary {
    pub fn new(errors: &[RowError]) -> Self {
        let shown: Vec<RowError> = errors.iter().take(DISPLAY_LIMIT).cloned().collect();
        Self {
            total_errors: errors.len(),
            remaining: errors.len() - shown.len(),
            shown,
        }
    }

    /// One line per shown error, plus a trailing count of the rest
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.shown.iter().map(|e| e.to_string()).collect();
        if self.remaining > 0 {
            lines.push(format!("...and {} more errors", self.remaining));
        }
        lines
    }
}

/// Accepts true/false, yes/no, 1/0 in any case
pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "y" => Some(true),
        "false" | "no" | "0" | "n" => Some(false),
        _ => None,
    }
}

/// Non-negative and within the `i64` range metrics are stored in
fn is_count(value: &str) -> bool {
    value.parse::<i64>().is_ok_and(|v| v >= 0)
}

pub fn validate_rows(records: &[CsvRecord]) -> Vec<RowError> {
    records.iter().flat_map(validate_row).collect()
}

pub fn validate_row(record: &CsvRecord) -> Vec<RowError> {
    let row = record.row;
    let mut errors = Vec::new();

    for field in REQUIRED_FIELDS {
        if record.get(field).is_none() {
            errors.push(RowError::new(row, field, format!("{} is required", field)));
        }
    }

    if let Some(price) = record.get("price") {
        match price.parse::<f64>() {
            Ok(p) if !p.is_finite() => {
                errors.push(RowError::new(row, "price", "Price must be a number"))
            }
            Ok(p) if p < 0.0 => {
                errors.push(RowError::new(row, "price", "Price cannot be negative"))
            }
            Ok(_) => {}
            Err(_) => errors.push(RowError::new(row, "price", "Price must be a number")),
        }
    }

    if let Some(rate) = record.get("offer_rate") {
        match rate.parse::<f64>() {
            Ok(r) if (0.0..=100.0).contains(&r) => {}
            Ok(_) => errors.push(RowError::new(
                row,
                "offer_rate",
                "Offer rate must be between 0 and 100",
            )),
            Err(_) => errors.push(RowError::new(row, "offer_rate", "Offer rate must be a number")),
        }
    }

    if let Some(listing_type) = record.get("listing_type") {
        if ListingType::parse(listing_type).is_none() {
            let allowed: Vec<&str> = ListingType::ALL.iter().map(|t| t.as_str()).collect();
            errors.push(RowError::new(
                row,
                "listing_type",
                format!("Listing type must be one of: {}", allowed.join(", ")),
            ));
        }
    }

    let permanent = match record.get("is_permanent") {
        Some(value) => {
            let flag = parse_bool_flag(value);
            if flag.is_none() {
                errors.push(RowError::new(
                    row,
                    "is_permanent",
                    "Is permanent must be true or false",
                ));
            }
            flag
        }
        None => None,
    };

    match (permanent, record.get("months")) {
        (Some(false), None) => errors.push(RowError::new(
            row,
            "months",
            "Months is required for non-permanent links",
        )),
        (_, Some(months)) => match months.parse::<u32>() {
            Ok(m) if m > 0 => {}
            _ => errors.push(RowError::new(
                row,
                "months",
                "Months must be a positive whole number",
            )),
        },
        _ => {}
    }

    if let Some(writer) = record.get("content_writer") {
        if ContentWriter::parse(writer).is_none() {
            errors.push(RowError::new(
                row,
                "content_writer",
                "Content writer must be one of: buyer, publisher, both",
            ));
        }
    }

    for field in ["word_count", "working_days"] {
        if let Some(value) = record.get(field) {
            if value.parse::<u32>().is_err() {
                errors.push(RowError::new(
                    row,
                    field,
                    format!("{} must be a whole number up to {}", field, u32::MAX),
                ));
            }
        }
    }

    for field in ["traffic", "keywords", "ref_domains"] {
        if let Some(value) = record.get(field) {
            if !is_count(value) {
                errors.push(RowError::new(
                    row,
                    field,
                    format!("{} must be a non-negative whole number", field),
                ));
            }
        }
    }

    for field in ["da", "dr_value", "as_value"] {
        if let Some(value) = record.get(field) {
            match value.parse::<u32>() {
                Ok(v) if v <= 100 => {}
                _ => errors.push(RowError::new(
                    row,
                    field,
                    format!("{} must be a whole number between 0 and 100", field),
                )),
            }
        }
    }

    if let Some(value) = record.get("dr_percentage") {
        if value.parse::<f64>().map_or(true, |v| !v.is_finite()) {
            errors.push(RowError::new(row, "dr_percentage", "DR percentage must be a number"));
        }
    }

    for n in 1..=MAX_COUNTRY_COLUMNS {
        validate_country_columns(record, n, &mut errors);
    }

    for category in ContentCategory::ALL {
        if let Some(value) = record.get(category.as_str()) {
            if ContentPolicy::parse(value).is_none() {
                errors.push(RowError::new(
                    row,
                    category.as_str(),
                    "Must be one of: accepted, not-accepted, prohibited",
                ));
            }
        }
    }

    if let Some(verified) = record.get("verified") {
        if parse_bool_flag(verified).is_none() {
            errors.push(RowError::new(row, "verified", "Verified must be true or false"));
        }
    }

    errors
}

fn validate_country_columns(record: &CsvRecord, n: usize, errors: &mut Vec<RowError>) {
    let code_field = format!("country{}_code", n);
    let percentage_field = format!("country{}_percentage", n);
    let traffic_field = format!("country{}_traffic", n);

    let code = record.get(&code_field);
    let percentage = record.get(&percentage_field);
    let traffic = record.get(&traffic_field);

    if code.is_none() {
        if percentage.is_some() || traffic.is_some() {
            errors.push(RowError::new(
                record.row,
                &code_field,
                "Country code is required when country traffic is given",
            ));
        }
        return;
    }

    match percentage.map(|p| p.parse::<f64>()) {
        Some(Ok(p)) if (0.0..=100.0).contains(&p) => {}
        Some(_) => errors.push(RowError::new(
            record.row,
            &percentage_field,
            "Percentage must be a number between 0 and 100",
        )),
        None => errors.push(RowError::new(
            record.row,
            &percentage_field,
            "Percentage is required when a country code is given",
        )),
    }

    if let Some(traffic) = traffic {
        if !is_count(traffic) {
            errors.push(RowError::new(
                record.row,
                &traffic_field,
                "Traffic must be a non-negative whole number",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, &str)]) -> CsvRecord {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CsvRecord::new(2, fields)
    }

    #[test]
    fn test_parse_bool_flag() {
        assert_eq!(parse_bool_flag("TRUE"), Some(true));
        assert_eq!(parse_bool_flag("no"), Some(false));
        assert_eq!(parse_bool_flag("0"), Some(false));
        assert_eq!(parse_bool_flag("maybe"), None);
    }

    #[test]
    fn test_empty_row_reports_each_required_field_once() {
        let errors = validate_row(&record(&[]));
        assert_eq!(errors.len(), REQUIRED_FIELDS.len());
        for field in REQUIRED_FIELDS {
            assert_eq!(errors.iter().filter(|e| e.field == field).count(), 1);
        }
    }

    #[test]
    fn test_months_checked_even_when_permanent() {
        let errors = validate_row(&record(&[("is_permanent", "true"), ("months", "abc")]));
        assert!(errors.iter().any(|e| e.field == "months"));
    }

    #[test]
    fn test_counts_checked_against_stored_width() {
        let errors = validate_row(&record(&[
            ("word_count", "99999999999"),
            ("working_days", "5"),
            ("traffic", "9223372036854775808"),
            ("keywords", "-1"),
            ("ref_domains", "320"),
        ]));

        let fields: Vec<&str> = errors
            .iter()
            .filter(|e| !e.message.ends_with("is required"))
            .map(|e| e.field.as_str())
            .collect();
        assert_eq!(fields, vec!["word_count", "traffic", "keywords"]);
    }

    #[test]
    fn test_non_finite_price_is_not_a_number() {
        for value in ["NaN", "inf", "-inf"] {
            let errors = validate_row(&record(&[("price", value)]));
            let price = errors.iter().find(|e| e.field == "price").unwrap();
            assert_eq!(price.message, "Price must be a number", "{}", value);
        }

        let errors = validate_row(&record(&[("price", "-5")]));
        assert!(errors
            .iter()
            .any(|e| e.field == "price" && e.message == "Price cannot be negative"));
    }

    #[test]
    fn test_country_percentage_required_with_code() {
        let errors = validate_row(&record(&[("country1_code", "US")]));
        assert!(errors.iter().any(|e| e.field == "country1_percentage"));
    }

    #[test]
    fn test_summary_caps_display() {
        let errors: Vec<RowError> = (0..13)
            .map(|i| RowError::new(i + 2, "price", "Price must be a number"))
            .collect();
        let summary = ValidationSummary::new(&errors);

        assert_eq!(summary.total_errors, 13);
        assert_eq!(summary.shown.len(), DISPLAY_LIMIT);
        assert_eq!(summary.remaining, 3);

        let lines = summary.lines();
        assert_eq!(lines.len(), DISPLAY_LIMIT + 1);
        assert_eq!(lines.last().unwrap(), "...and 3 more errors");
    }
}
