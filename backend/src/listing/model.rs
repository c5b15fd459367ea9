//! Listing models: a publisher's website and the backlink product offered on it

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

/// Kind of backlink placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingType {
    GuestPost,
    HomepageLink,
    InnerpageLink,
    SitewideLink,
}

impl ListingType {
    pub const ALL: [ListingType; 4] = [
        ListingType::GuestPost,
        ListingType::HomepageLink,
        ListingType::InnerpageLink,
        ListingType::SitewideLink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::GuestPost => "guest-post",
            ListingType::HomepageLink => "homepage-link",
            ListingType::InnerpageLink => "innerpage-link",
            ListingType::SitewideLink => "sitewide-link",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Who writes the placed article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentWriter {
    Buyer,
    Publisher,
    Both,
}

impl ContentWriter {
    pub const ALL: [ContentWriter; 3] =
        [ContentWriter::Buyer, ContentWriter::Publisher, ContentWriter::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentWriter::Buyer => "buyer",
            ContentWriter::Publisher => "publisher",
            ContentWriter::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|w| w.as_str() == s)
    }
}

/// Publisher policy for a sensitive content category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentPolicy {
    Accepted,
    #[default]
    NotAccepted,
    Prohibited,
}

impl ContentPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "accepted" | "yes" | "true" => Some(ContentPolicy::Accepted),
            "not-accepted" | "not_accepted" | "no" | "false" => Some(ContentPolicy::NotAccepted),
            "prohibited" => Some(ContentPolicy::Prohibited),
            _ => None,
        }
    }
}

/// Sensitive content categories a publisher states a policy for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCategory {
    Casino,
    Finance,
    Erotic,
    Dating,
    Crypto,
    Cbd,
    Medicine,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 7] = [
        ContentCategory::Casino,
        ContentCategory::Finance,
        ContentCategory::Erotic,
        ContentCategory::Dating,
        ContentCategory::Crypto,
        ContentCategory::Cbd,
        ContentCategory::Medicine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Casino => "casino",
            ContentCategory::Finance => "finance",
            ContentCategory::Erotic => "erotic",
            ContentCategory::Dating => "dating",
            ContentCategory::Crypto => "crypto",
            ContentCategory::Cbd => "cbd",
            ContentCategory::Medicine => "medicine",
        }
    }
}

/// Accepted-content policy per category; unspecified categories are not accepted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptedContent {
    pub casino: ContentPolicy,
    pub finance: ContentPolicy,
    pub erotic: ContentPolicy,
    pub dating: ContentPolicy,
    pub crypto: ContentPolicy,
    pub cbd: ContentPolicy,
    pub medicine: ContentPolicy,
}

impl AcceptedContent {
    pub fn get(&self, category: ContentCategory) -> ContentPolicy {
        match category {
            ContentCategory::Casino => self.casino,
            ContentCategory::Finance => self.finance,
            ContentCategory::Erotic => self.erotic,
            ContentCategory::Dating => self.dating,
            ContentCategory::Crypto => self.crypto,
            ContentCategory::Cbd => self.cbd,
            ContentCategory::Medicine => self.medicine,
        }
    }

    pub fn set(&mut self, category: ContentCategory, policy: ContentPolicy) {
        let slot = match category {
            ContentCategory::Casino => &mut self.casino,
            ContentCategory::Finance => &mut self.finance,
            ContentCategory::Erotic => &mut self.erotic,
            ContentCategory::Dating => &mut self.dating,
            ContentCategory::Crypto => &mut self.crypto,
            ContentCategory::Cbd => &mut self.cbd,
            ContentCategory::Medicine => &mut self.medicine,
        };
        *slot = policy;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    pub domain: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Placement terms (`type` on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingTerms {
    pub listing_type: ListingType,
    pub permanent: bool,
    pub months: Option<u32>,
    pub word_count: u32,
    pub working_days: u32,
    pub content_writer: ContentWriter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Languages {
    pub primary: String,
    pub native: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryTraffic {
    pub country_code: String,
    pub percentage: f64,
    pub traffic: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRating {
    pub value: i32,
    pub percentage: f64,
}

/// Third-party SEO metrics, treated as opaque numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub country_code: String,
    #[serde(default)]
    pub country_traffic: Vec<CountryTraffic>,
    pub da: i32,
    pub dr: DomainRating,
    #[serde(rename = "as")]
    pub authority_score: i32,
    pub traffic: i64,
    pub keywords: i64,
    pub ref_domains: i64,
}

/// Listing moderation status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

/// Listing model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub seller_id: Option<Uuid>,
    pub price: f64,
    pub offer_rate: Option<f64>,
    pub category: String,
    pub website: Website,
    #[serde(rename = "type")]
    pub terms: ListingTerms,
    pub language: Languages,
    pub metrics: Metrics,
    pub niches: Vec<String>,
    pub accepted_content: AcceptedContent,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Price after the offer discount, rounded to cents
    pub fn effective_price(&self) -> f64 {
        let discount = self.offer_rate.unwrap_or(0.0).clamp(0.0, 100.0);
        (self.price * (1.0 - discount / 100.0) * 100.0).round() / 100.0
    }
}

/// Database row; nested parts live in JSONB columns
#[derive(Debug, sqlx::FromRow)]
pub struct ListingRow {
    pub id: Uuid,
    pub seller_id: Option<Uuid>,
    pub price: f64,
    pub offer_rate: Option<f64>,
    pub category: String,
    pub website: Json<Website>,
    pub terms: Json<ListingTerms>,
    pub language: Json<Languages>,
    pub metrics: Json<Metrics>,
    pub niches: Json<Vec<String>>,
    pub accepted_content: Json<AcceptedContent>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            seller_id: row.seller_id,
            price: row.price,
            offer_rate: row.offer_rate,
            category: row.category,
            website: row.website.0,
            terms: row.terms.0,
            language: row.language.0,
            metrics: row.metrics.0,
            niches: row.niches.0,
            accepted_content: row.accepted_content.0,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Request DTO for creating a listing; also the import pipeline's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub price: f64,
    pub offer_rate: Option<f64>,
    pub category: String,
    pub website: Website,
    #[serde(rename = "type")]
    pub terms: ListingTerms,
    pub language: Languages,
    pub metrics: Metrics,
    #[serde(default)]
    pub niches: Vec<String>,
    #[serde(default)]
    pub accepted_content: AcceptedContent,
}

impl ListingDraft {
    /// Validate request
    pub fn validate(&self) -> Result<(), String> {
        if self.website.domain.trim().is_empty() {
            return Err("Domain is required".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Price must be a non-negative number".to_string());
        }
        if let Some(rate) = self.offer_rate {
            if !(0.0..=100.0).contains(&rate) {
                return Err("Offer rate must be between 0 and 100".to_string());
            }
        }
        validate_terms(&self.terms)?;
        validate_metrics(&self.metrics)?;
        Ok(())
    }
}

fn validate_terms(terms: &ListingTerms) -> Result<(), String> {
    if !terms.permanent && terms.months.map_or(true, |m| m == 0) {
        return Err("Months must be greater than 0 for non-permanent links".to_string());
    }
    Ok(())
}

fn validate_metrics(metrics: &Metrics) -> Result<(), String> {
    for (name, value) in [
        ("DA", metrics.da),
        ("DR", metrics.dr.value),
        ("AS", metrics.authority_score),
    ] {
        if !(0..=100).contains(&value) {
            return Err(format!("{} must be between 0 and 100", name));
        }
    }
    if metrics.traffic < 0 || metrics.keywords < 0 || metrics.ref_domains < 0 {
        return Err("Traffic, keywords and referring domains cannot be negative".to_string());
    }
    if metrics
        .country_traffic
        .iter()
        .any(|c| !(0.0..=100.0).contains(&c.percentage))
    {
        return Err("Country traffic percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Request DTO for updating a listing; absent fields are left unchanged,
/// `"offerRate": null` removes the discount
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingRequest {
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub offer_rate: Option<Option<f64>>,
    pub category: Option<String>,
    pub website: Option<Website>,
    #[serde(rename = "type")]
    pub terms: Option<ListingTerms>,
    pub language: Option<Languages>,
    pub metrics: Option<Metrics>,
    pub niches: Option<Vec<String>>,
    pub accepted_content: Option<AcceptedContent>,
}

impl UpdateListingRequest {
    /// Merge into an existing listing, producing the draft to validate and store
    pub fn apply_to(self, listing: &Listing) -> ListingDraft {
        ListingDraft {
            price: self.price.unwrap_or(listing.price),
            offer_rate: self.offer_rate.unwrap_or(listing.offer_rate),
            category: self.category.unwrap_or_else(|| listing.category.clone()),
            website: self.website.unwrap_or_else(|| listing.website.clone()),
            terms: self.terms.unwrap_or_else(|| listing.terms.clone()),
            language: self.language.unwrap_or_else(|| listing.language.clone()),
            metrics: self.metrics.unwrap_or_else(|| listing.metrics.clone()),
            niches: self.niches.unwrap_or_else(|| listing.niches.clone()),
            accepted_content: self
                .accepted_content
                .unwrap_or_else(|| listing.accepted_content.clone()),
        }
    }
}

/// Moderation request
#[derive(Debug, Deserialize)]
pub struct UpdateListingStatusRequest {
    pub status: ListingStatus,
}

/// Query parameters for listing listings
#[derive(Debug, Default, Deserialize)]
pub struct ListingFilterQuery {
    pub status: Option<ListingStatus>,
    pub seller_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_draft() -> ListingDraft {
        ListingDraft {
            price: 120.0,
            offer_rate: Some(10.0),
            category: "technology".to_string(),
            website: Website {
                domain: "example.com".to_string(),
                verified: true,
                tags: vec!["tech".to_string()],
            },
            terms: ListingTerms {
                listing_type: ListingType::GuestPost,
                permanent: true,
                months: None,
                word_count: 800,
                working_days: 5,
                content_writer: ContentWriter::Both,
            },
            language: Languages {
                primary: "en".to_string(),
                native: "en".to_string(),
                extra: None,
            },
            metrics: Metrics {
                country_code: "US".to_string(),
                country_traffic: vec![],
                da: 45,
                dr: DomainRating {
                    value: 50,
                    percentage: 12.5,
                },
                authority_score: 30,
                traffic: 12000,
                keywords: 3400,
                ref_domains: 210,
            },
            niches: vec!["software".to_string()],
            accepted_content: AcceptedContent::default(),
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(sample_draft().validate().is_ok());
    }

    #[test]
    fn test_non_permanent_requires_months() {
        let mut draft = sample_draft();
        draft.terms.permanent = false;
        assert!(draft.validate().is_err());

        draft.terms.months = Some(0);
        assert!(draft.validate().is_err());

        draft.terms.months = Some(12);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_offer_rate_bounds() {
        let mut draft = sample_draft();
        draft.offer_rate = Some(150.0);
        assert!(draft.validate().is_err());
        draft.offer_rate = Some(100.0);
        assert!(draft.validate().is_ok());
        draft.offer_rate = Some(-1.0);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(ListingType::parse("Guest-Post"), Some(ListingType::GuestPost));
        assert_eq!(ListingType::parse("banner"), None);
        assert_eq!(ContentWriter::parse(" both "), Some(ContentWriter::Both));
        assert_eq!(ContentPolicy::parse("prohibited"), Some(ContentPolicy::Prohibited));
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample_draft()).unwrap();
        assert_eq!(value["type"]["listingType"], "guest-post");
        assert_eq!(value["metrics"]["as"], 30);
        assert_eq!(value["metrics"]["refDomains"], 210);
        assert_eq!(value["acceptedContent"]["casino"], "not-accepted");
    }

    fn stored(draft: ListingDraft) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            seller_id: None,
            price: draft.price,
            offer_rate: draft.offer_rate,
            category: draft.category,
            website: draft.website,
            terms: draft.terms,
            language: draft.language,
            metrics: draft.metrics,
            niches: draft.niches,
            accepted_content: draft.accepted_content,
            status: ListingStatus::Approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_update_offer_rate_absent_null_or_set() {
        let listing = stored(sample_draft());

        let untouched: UpdateListingRequest = serde_json::from_str(r#"{"price": 99}"#).unwrap();
        assert_eq!(untouched.offer_rate, None);
        assert_eq!(untouched.apply_to(&listing).offer_rate, Some(10.0));

        let cleared: UpdateListingRequest =
            serde_json::from_str(r#"{"offerRate": null}"#).unwrap();
        assert_eq!(cleared.offer_rate, Some(None));
        assert_eq!(cleared.apply_to(&listing).offer_rate, None);

        let changed: UpdateListingRequest = serde_json::from_str(r#"{"offerRate": 25}"#).unwrap();
        assert_eq!(changed.apply_to(&listing).offer_rate, Some(25.0));
    }

    #[test]
    fn test_missing_accepted_content_defaults_to_not_accepted() {
        let content: AcceptedContent = serde_json::from_str(r#"{"crypto":"accepted"}"#).unwrap();
        assert_eq!(content.get(ContentCategory::Crypto), ContentPolicy::Accepted);
        assert_eq!(content.get(ContentCategory::Casino), ContentPolicy::NotAccepted);
    }
}
