//! CMS content: pages, typed sections and their HTML rendering

pub mod model;
pub mod render;
mod service;

pub use model::*;
pub use render::{escape_html, render_markdown, render_page, render_section};
pub use service::PageService;
