//! Marketplace filter state and the conjunctive listing predicate

use serde::Deserialize;

use crate::listing::Listing;

pub const DA_MAX: f64 = 100.0;
pub const DR_MAX: f64 = 100.0;
pub const AS_MAX: f64 = 100.0;
pub const TRAFFIC_MAX: f64 = 10_000_000.0;
pub const KEYWORDS_MAX: f64 = 1_000_000.0;
pub const REF_DOMAINS_MAX: f64 = 100_000.0;
pub const PRICE_MAX: f64 = 10_000.0;

/// Slider range; a max at or above the slider ceiling means "no upper bound"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub ceiling: f64,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>, ceiling: f64) -> Self {
        Self { min, max, ceiling }
    }

    pub fn unbounded(ceiling: f64) -> Self {
        Self::new(None, None, ceiling)
    }

    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        match self.max {
            Some(max) if max < self.ceiling => value <= max,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    DaDesc,
    TrafficDesc,
    #[default]
    Newest,
}

/// Query string accepted by `GET /api/marketplace`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceQuery {
    pub category: Option<String>,
    #[serde(alias = "minDA")]
    pub min_da: Option<f64>,
    #[serde(alias = "maxDA")]
    pub max_da: Option<f64>,
    #[serde(alias = "minDR")]
    pub min_dr: Option<f64>,
    #[serde(alias = "maxDR")]
    pub max_dr: Option<f64>,
    #[serde(alias = "minAS")]
    pub min_as: Option<f64>,
    #[serde(alias = "maxAS")]
    pub max_as: Option<f64>,
    pub min_traffic: Option<f64>,
    pub max_traffic: Option<f64>,
    pub min_keywords: Option<f64>,
    pub max_keywords: Option<f64>,
    pub min_ref_domains: Option<f64>,
    pub max_ref_domains: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Comma-separated primary languages
    pub languages: Option<String>,
    /// Comma-separated country codes
    pub countries: Option<String>,
    pub search: Option<String>,
    pub sort: Option<SortOrder>,
    pub page: Option<usize>,
}

fn comma_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolved filter; every criterion must hold for a listing to match
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    pub category: Option<String>,
    pub da: NumericRange,
    pub dr: NumericRange,
    pub authority_score: NumericRange,
    pub traffic: NumericRange,
    pub keywords: NumericRange,
    pub ref_domains: NumericRange,
    pub price: NumericRange,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            category: None,
            da: NumericRange::unbounded(DA_MAX),
            dr: NumericRange::unbounded(DR_MAX),
            authority_score: NumericRange::unbounded(AS_MAX),
            traffic: NumericRange::unbounded(TRAFFIC_MAX),
            keywords: NumericRange::unbounded(KEYWORDS_MAX),
            ref_domains: NumericRange::unbounded(REF_DOMAINS_MAX),
            price: NumericRange::unbounded(PRICE_MAX),
            languages: Vec::new(),
            countries: Vec::new(),
            search: None,
            sort: SortOrder::default(),
        }
    }
}

impl From<&MarketplaceQuery> for ListingFilter {
    fn from(q: &MarketplaceQuery) -> Self {
        let category = q
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);
        let search = q
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Self {
            category,
            da: NumericRange::new(q.min_da, q.max_da, DA_MAX),
            dr: NumericRange::new(q.min_dr, q.max_dr, DR_MAX),
            authority_score: NumericRange::new(q.min_as, q.max_as, AS_MAX),
            traffic: NumericRange::new(q.min_traffic, q.max_traffic, TRAFFIC_MAX),
            keywords: NumericRange::new(q.min_keywords, q.max_keywords, KEYWORDS_MAX),
            ref_domains: NumericRange::new(q.min_ref_domains, q.max_ref_domains, REF_DOMAINS_MAX),
            price: NumericRange::new(q.min_price, q.max_price, PRICE_MAX),
            languages: comma_list(q.languages.as_deref()),
            countries: comma_list(q.countries.as_deref()),
            search,
            sort: q.sort.unwrap_or_default(),
        }
    }
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(category) = &self.category {
            if !listing.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }

        let m = &listing.metrics;
        let in_range = self.da.contains(m.da as f64)
            && self.dr.contains(m.dr.value as f64)
            && self.authority_score.contains(m.authority_score as f64)
            && self.traffic.contains(m.traffic as f64)
            && self.keywords.contains(m.keywords as f64)
            && self.ref_domains.contains(m.ref_domains as f64)
            && self.price.contains(listing.price);
        if !in_range {
            return false;
        }

        if !self.languages.is_empty()
            && !self.languages.contains(&listing.language.primary.to_lowercase())
        {
            return false;
        }

        if !self.countries.is_empty() && !self.countries.contains(&m.country_code.to_lowercase()) {
            return false;
        }

        match &self.search {
            Some(needle) => {
                listing.website.domain.to_lowercase().contains(needle)
                    || listing.niches.iter().any(|n| n.to_lowercase().contains(needle))
                    || listing.website.tags.iter().any(|t| t.to_lowercase().contains(needle))
            }
            None => true,
        }
    }

    /// Keep matching listings, ordered by the requested sort
    pub fn apply(&self, listings: Vec<Listing>) -> Vec<Listing> {
        let mut matched: Vec<Listing> = listings.into_iter().filter(|l| self.matches(l)).collect();

        match self.sort {
            SortOrder::PriceAsc => matched.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceDesc => matched.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::DaDesc => matched.sort_by(|a, b| b.metrics.da.cmp(&a.metrics.da)),
            SortOrder::TrafficDesc => {
                matched.sort_by(|a, b| b.metrics.traffic.cmp(&a.metrics.traffic))
            }
            SortOrder::Newest => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        matched
    }
}
