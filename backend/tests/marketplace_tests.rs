//! Marketplace filtering and pagination over an in-memory catalogue

mod common;

use axum::extract::Query;
use axum::http::Uri;
use backlink_market::listing::Listing;
use backlink_market::marketplace::{
    browse, page_window, ListingFilter, MarketplaceQuery, PageItem, SortOrder,
};

use common::{listing, ListingSpec};

fn catalogue() -> Vec<Listing> {
    vec![
        listing(ListingSpec {
            domain: "techdaily.com",
            da: 72,
            price: 450.0,
            traffic: 900_000,
            niches: &["software", "ai"],
            age_days: 1,
            ..Default::default()
        }),
        listing(ListingSpec {
            domain: "moneyhub.co.uk",
            category: "finance",
            da: 50,
            price: 300.0,
            country: "GB",
            niches: &["investing"],
            age_days: 2,
            ..Default::default()
        }),
        listing(ListingSpec {
            domain: "reisen.de",
            category: "travel",
            da: 49,
            price: 80.0,
            language: "de",
            country: "DE",
            age_days: 3,
            ..Default::default()
        }),
        listing(ListingSpec {
            domain: "smallblog.net",
            da: 12,
            price: 25.0,
            traffic: 800,
            age_days: 4,
            ..Default::default()
        }),
        listing(ListingSpec {
            domain: "healthline-news.com",
            category: "health",
            da: 88,
            price: 1_200.0,
            traffic: 5_000_000,
            niches: &["wellness"],
            age_days: 5,
            ..Default::default()
        }),
        listing(ListingSpec {
            domain: "devtools.io",
            da: 35,
            price: 150.0,
            niches: &["Software"],
            age_days: 6,
            ..Default::default()
        }),
    ]
}

fn domains(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.website.domain.as_str()).collect()
}

#[test]
fn test_min_da_filter() {
    let query = MarketplaceQuery {
        min_da: Some(50.0),
        ..Default::default()
    };
    let page = browse(catalogue(), &query, 12);

    assert_eq!(page.total, 3);
    assert!(page.items.iter().all(|l| l.metrics.da >= 50));
    assert_eq!(
        domains(&page.items),
        vec!["techdaily.com", "moneyhub.co.uk", "healthline-news.com"]
    );
}

#[test]
fn test_min_da_from_query_string() {
    let uri: Uri = "/api/marketplace?minDA=50&maxDA=100&sort=da_desc"
        .parse()
        .unwrap();
    let Query(query) = Query::<MarketplaceQuery>::try_from_uri(&uri).unwrap();
    let page = browse(catalogue(), &query, 12);

    assert_eq!(
        domains(&page.items),
        vec!["healthline-news.com", "techdaily.com", "moneyhub.co.uk"]
    );
}

#[test]
fn test_slider_maximum_is_unbounded() {
    let filter = ListingFilter::from(&MarketplaceQuery {
        max_traffic: Some(10_000_000.0),
        max_price: Some(500.0),
        ..Default::default()
    });
    let matched = filter.apply(catalogue());

    assert_eq!(matched.len(), 5);
    assert!(matched.iter().all(|l| l.price <= 500.0));
}

#[test]
fn test_criteria_are_conjunctive() {
    let query = MarketplaceQuery {
        category: Some("technology".to_string()),
        min_da: Some(30.0),
        languages: Some("en".to_string()),
        countries: Some("us".to_string()),
        ..Default::default()
    };
    let page = browse(catalogue(), &query, 12);

    assert_eq!(domains(&page.items), vec!["techdaily.com", "devtools.io"]);
}

#[test]
fn test_category_all_matches_everything() {
    let query = MarketplaceQuery {
        category: Some("all".to_string()),
        ..Default::default()
    };
    assert_eq!(browse(catalogue(), &query, 12).total, 6);
}

#[test]
fn test_search_covers_domain_and_niches() {
    let query = MarketplaceQuery {
        search: Some("SOFTWARE".to_string()),
        ..Default::default()
    };
    let page = browse(catalogue(), &query, 12);
    assert_eq!(domains(&page.items), vec!["techdaily.com", "devtools.io"]);

    let query = MarketplaceQuery {
        search: Some("reisen".to_string()),
        ..Default::default()
    };
    assert_eq!(domains(&browse(catalogue(), &query, 12).items), vec!["reisen.de"]);
}

#[test]
fn test_sort_by_price() {
    let filter = ListingFilter {
        sort: SortOrder::PriceAsc,
        ..Default::default()
    };
    let prices: Vec<f64> = filter.apply(catalogue()).iter().map(|l| l.price).collect();

    assert_eq!(prices, vec![25.0, 80.0, 150.0, 300.0, 450.0, 1_200.0]);
}

#[test]
fn test_paging_through_results() {
    let query = MarketplaceQuery {
        page: Some(2),
        ..Default::default()
    };
    let page = browse(catalogue(), &query, 4);

    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(domains(&page.items), vec!["healthline-news.com", "devtools.io"]);
    assert_eq!(page.page_window, vec![PageItem::Page(1), PageItem::Page(2)]);
}

#[test]
fn test_page_past_end_is_clamped() {
    let query = MarketplaceQuery {
        page: Some(40),
        ..Default::default()
    };
    let page = browse(catalogue(), &query, 4);

    assert_eq!(page.page, 2);
    assert_eq!(page.items.len(), 2);
}

#[test]
fn test_window_for_first_of_twenty() {
    let expected = vec![
        PageItem::Page(1),
        PageItem::Page(2),
        PageItem::Page(3),
        PageItem::Page(4),
        PageItem::Page(5),
        PageItem::Ellipsis,
        PageItem::Page(20),
    ];
    assert_eq!(page_window(1, 20), expected);
}
