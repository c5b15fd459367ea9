//! Backlink Marketplace Backend Library
//!
//! Listings with SEO metrics, CSV bulk import, marketplace browsing, CMS pages
//! and buyer orders behind a JSON REST API.

pub mod auth;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod handlers;
pub mod import;
pub mod listing;
pub mod marketplace;
pub mod middleware;
pub mod models;
pub mod order;
pub mod routes;
pub mod state;
