//! CSV reading: header row plus data rows mapped header -> value

use std::collections::HashMap;

use super::ImportError;

/// One data row keyed by lowercased header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRecord {
    /// Line number in the file; the first data row is row 2
    pub row: usize,
    pub fields: HashMap<String, String>,
}

impl CsvRecord {
    pub fn new(row: usize, fields: HashMap<String, String>) -> Self {
        Self { row, fields }
    }

    /// Value for `field`, `None` when the column is absent or blank
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub records: Vec<CsvRecord>,
}

pub fn parse_csv(bytes: &[u8]) -> Result<ParsedCsv, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::Empty);
    }

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ImportError::Csv(e.to_string()))?;
        if record.iter().all(|v| v.is_empty()) {
            continue;
        }

        let fields = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();

        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        records.push(CsvRecord::new(row, fields));
    }

    if records.is_empty() {
        return Err(ImportError::Empty);
    }

    Ok(ParsedCsv { headers, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_maps_headers_to_values() {
        let csv = "Domain, Price\nexample.com, 100\n\nother.org,50\n";
        let parsed = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed.headers, vec!["domain", "price"]);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].row, 2);
        assert_eq!(parsed.records[0].get("domain"), Some("example.com"));
        assert_eq!(parsed.records[1].get("price"), Some("50"));
    }

    #[test]
    fn test_short_rows_leave_fields_absent() {
        let parsed = parse_csv(b"domain,price,months\nexample.com,100\n").unwrap();
        assert_eq!(parsed.records[0].get("months"), None);
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(
            parse_csv(b"domain,price\n"),
            Err(ImportError::Empty)
        ));
        assert!(matches!(parse_csv(b""), Err(ImportError::Empty)));
    }
}
