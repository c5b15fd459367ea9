//! Turns a validated CSV row into a listing draft

use super::parse::CsvRecord;
use super::validate::{parse_bool_flag, MAX_COUNTRY_COLUMNS};
use super::ImportError;
use crate::listing::{
    AcceptedContent, ContentCategory, ContentPolicy, ContentWriter, CountryTraffic, DomainRating,
    Languages, ListingDraft, ListingTerms, ListingType, Metrics, Website,
};

/// Split a multi-value cell on `,`, `;` or `|`
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| matches!(c, ',' | ';' | '|'))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn required<'a>(record: &'a CsvRecord, field: &str) -> Result<&'a str, ImportError> {
    record.get(field).ok_or_else(|| ImportError::Transform {
        row: record.row,
        message: format!("{} is required", field),
    })
}

fn number<T: std::str::FromStr>(record: &CsvRecord, field: &str) -> Result<T, ImportError> {
    required(record, field)?
        .parse::<T>()
        .map_err(|_| ImportError::Transform {
            row: record.row,
            message: format!("{} is not a valid number", field),
        })
}

fn optional_number<T: std::str::FromStr>(
    record: &CsvRecord,
    field: &str,
) -> Result<Option<T>, ImportError> {
    match record.get(field) {
        Some(_) => number(record, field).map(Some),
        None => Ok(None),
    }
}

pub fn record_to_draft(record: &CsvRecord) -> Result<ListingDraft, ImportError> {
    let invalid = |message: &str| ImportError::Transform {
        row: record.row,
        message: message.to_string(),
    };

    let listing_type = ListingType::parse(required(record, "listing_type")?)
        .ok_or_else(|| invalid("unknown listing_type"))?;
    let content_writer = ContentWriter::parse(required(record, "content_writer")?)
        .ok_or_else(|| invalid("unknown content_writer"))?;
    let permanent = parse_bool_flag(required(record, "is_permanent")?)
        .ok_or_else(|| invalid("is_permanent is not a boolean"))?;
    let months: Option<u32> = optional_number(record, "months")?;

    let mut country_traffic = Vec::new();
    for n in 1..=MAX_COUNTRY_COLUMNS {
        let Some(code) = record.get(&format!("country{}_code", n)) else {
            continue;
        };
        country_traffic.push(CountryTraffic {
            country_code: code.to_uppercase(),
            percentage: number(record, &format!("country{}_percentage", n))?,
            traffic: optional_number(record, &format!("country{}_traffic", n))?.unwrap_or(0),
        });
    }

    let mut accepted_content = AcceptedContent::default();
    for category in ContentCategory::ALL {
        if let Some(value) = record.get(category.as_str()) {
            let policy = ContentPolicy::parse(value)
                .ok_or_else(|| invalid("unknown accepted-content policy"))?;
            accepted_content.set(category, policy);
        }
    }

    let extra = record
        .get("extra_languages")
        .map(split_list)
        .filter(|langs| !langs.is_empty());

    Ok(ListingDraft {
        price: number(record, "price")?,
        offer_rate: optional_number(record, "offer_rate")?,
        category: required(record, "category")?.to_string(),
        website: Website {
            domain: required(record, "domain")?.to_lowercase(),
            verified: record
                .get("verified")
                .and_then(parse_bool_flag)
                .unwrap_or(false),
            tags: record.get("tags").map(split_list).unwrap_or_default(),
        },
        terms: ListingTerms {
            listing_type,
            permanent,
            months: if permanent { None } else { months },
            word_count: number(record, "word_count")?,
            working_days: number(record, "working_days")?,
            content_writer,
        },
        language: Languages {
            primary: required(record, "primary_language")?.to_string(),
            native: required(record, "native_language")?.to_string(),
            extra,
        },
        metrics: Metrics {
            country_code: required(record, "country_code")?.to_uppercase(),
            country_traffic,
            da: number(record, "da")?,
            dr: DomainRating {
                value: number(record, "dr_value")?,
                percentage: number(record, "dr_percentage")?,
            },
            authority_score: number(record, "as_value")?,
            traffic: number(record, "traffic")?,
            keywords: number(record, "keywords")?,
            ref_domains: number(record, "ref_domains")?,
        },
        niches: split_list(required(record, "niches")?),
        accepted_content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("tech; finance | health,  "),
            vec!["tech", "finance", "health"]
        );
        assert!(split_list(" , ").is_empty());
    }
}
