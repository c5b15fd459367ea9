//! Fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::{Duration, Utc};
use uuid::Uuid;

use backlink_market::listing::{
    AcceptedContent, ContentWriter, DomainRating, Languages, Listing, ListingStatus,
    ListingTerms, ListingType, Metrics, Website,
};

pub const CSV_HEADER: &str = "domain,price,offer_rate,listing_type,is_permanent,months,word_count,working_days,content_writer,primary_language,native_language,category,country_code,da,dr_value,dr_percentage,as_value,traffic,keywords,ref_domains,niches,tags,casino";

/// A CSV data row that passes validation, with the given domain
pub fn valid_row(domain: &str) -> String {
    format!(
        "{},150,10,guest-post,true,,1000,5,publisher,en,en,technology,US,55,60,12.5,40,25000,4000,320,software;saas,tech,prohibited",
        domain
    )
}

pub fn csv(rows: &[String]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}

pub struct ListingSpec<'a> {
    pub domain: &'a str,
    pub category: &'a str,
    pub price: f64,
    pub da: i32,
    pub traffic: i64,
    pub language: &'a str,
    pub country: &'a str,
    pub niches: &'a [&'a str],
    pub age_days: i64,
}

impl Default for ListingSpec<'_> {
    fn default() -> Self {
        Self {
            domain: "example.com",
            category: "technology",
            price: 100.0,
            da: 30,
            traffic: 10_000,
            language: "en",
            country: "US",
            niches: &[],
            age_days: 0,
        }
    }
}

pub fn listing(spec: ListingSpec<'_>) -> Listing {
    let created_at = Utc::now() - Duration::days(spec.age_days);
    Listing {
        id: Uuid::new_v4(),
        seller_id: None,
        price: spec.price,
        offer_rate: None,
        category: spec.category.to_string(),
        website: Website {
            domain: spec.domain.to_string(),
            verified: true,
            tags: vec![],
        },
        terms: ListingTerms {
            listing_type: ListingType::GuestPost,
            permanent: true,
            months: None,
            word_count: 800,
            working_days: 5,
            content_writer: ContentWriter::Publisher,
        },
        language: Languages {
            primary: spec.language.to_string(),
            native: spec.language.to_string(),
            extra: None,
        },
        metrics: Metrics {
            country_code: spec.country.to_string(),
            country_traffic: vec![],
            da: spec.da,
            dr: DomainRating {
                value: spec.da,
                percentage: 0.0,
            },
            authority_score: spec.da,
            traffic: spec.traffic,
            keywords: 1_000,
            ref_domains: 100,
        },
        niches: spec.niches.iter().map(|n| n.to_string()).collect(),
        accepted_content: AcceptedContent::default(),
        status: ListingStatus::Approved,
        created_at,
        updated_at: created_at,
    }
}
