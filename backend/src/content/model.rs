//! CMS pages and their ordered, typed sections

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Section type tag; unknown tags fall back to `Custom`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "section_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SectionType {
    Hero,
    Features,
    Testimonials,
    Cta,
    Image,
    Pricing,
    Text,
    Faq,
    Stats,
    #[serde(other)]
    Custom,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Hero => "HERO",
            SectionType::Features => "FEATURES",
            SectionType::Testimonials => "TESTIMONIALS",
            SectionType::Cta => "CTA",
            SectionType::Image => "IMAGE",
            SectionType::Pricing => "PRICING",
            SectionType::Text => "TEXT",
            SectionType::Faq => "FAQ",
            SectionType::Stats => "STATS",
            SectionType::Custom => "CUSTOM",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub page_id: Uuid,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub order: i32,
    pub is_visible: bool,
    pub content: Value,
}

#[derive(Debug, sqlx::FromRow)]
pub struct SectionRow {
    pub id: Uuid,
    pub page_id: Uuid,
    pub section_type: SectionType,
    pub position: i32,
    pub is_visible: bool,
    pub content: Json<Value>,
}

impl From<SectionRow> for Section {
    fn from(row: SectionRow) -> Self {
        Self {
            id: row.id,
            page_id: row.page_id,
            section_type: row.section_type,
            order: row.position,
            is_visible: row.is_visible,
            content: row.content.0,
        }
    }
}

/// Page with its sections sorted by `order`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWithSections {
    #[serde(flatten)]
    pub page: Page,
    pub sections: Vec<Section>,
}

impl PageWithSections {
    pub fn new(page: Page, mut sections: Vec<Section>) -> Self {
        sections.sort_by_key(|s| s.order);
        Self { page, sections }
    }
}

fn default_visible() -> bool {
    true
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

/// Section as sent by the editor; `order` falls back to the list position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInput {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub order: Option<i32>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default = "empty_object")]
    pub content: Value,
}

impl SectionInput {
    /// Detached section for previews and rendering outside a stored page
    pub fn into_section(self, page_id: Uuid, fallback_order: i32) -> Section {
        Section {
            id: Uuid::new_v4(),
            page_id,
            section_type: self.section_type,
            order: self.order.unwrap_or(fallback_order),
            is_visible: self.is_visible,
            content: self.content,
        }
    }
}

/// Lowercase ASCII letters, digits and single hyphens between them
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug");
        err.message = Some("Slug must be lowercase letters, digits and hyphens".into());
        Err(err)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(custom = "validate_slug")]
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
}

/// Absent fields are left unchanged; `"description": null` clears the description;
/// `sections`, when present, replaces all sections
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(custom = "validate_slug")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub description: Option<Option<String>>,
    pub is_published: Option<bool>,
    pub sections: Option<Vec<SectionInput>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub slug: Option<String>,
}
