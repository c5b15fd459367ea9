//! Section dispatch and page rendering

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use backlink_market::content::{
    render_page, render_section, Page, PageWithSections, Section, SectionInput, SectionType,
};

fn section(section_type: SectionType, order: i32, content: Value) -> Section {
    Section {
        id: Uuid::new_v4(),
        page_id: Uuid::nil(),
        section_type,
        order,
        is_visible: true,
        content,
    }
}

fn page(sections: Vec<Section>) -> PageWithSections {
    PageWithSections::new(
        Page {
            id: Uuid::nil(),
            title: "Buy <quality> backlinks".to_string(),
            slug: "home".to_string(),
            description: Some("Marketplace home".to_string()),
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
        sections,
    )
}

#[test]
fn test_hidden_section_renders_placeholder() {
    let mut hidden = section(SectionType::Hero, 0, json!({"heading": "Secret launch"}));
    hidden.is_visible = false;

    let html = render_section(&hidden);

    assert!(html.contains("section--hidden"));
    assert!(html.contains(" hidden>"));
    assert!(!html.contains("Secret launch"));
}

#[test]
fn test_every_type_has_a_branch() {
    let cases = [
        (SectionType::Hero, "section--hero"),
        (SectionType::Features, "section--features"),
        (SectionType::Testimonials, "section--testimonials"),
        (SectionType::Cta, "section--cta"),
        (SectionType::Image, "section--image"),
        (SectionType::Pricing, "section--pricing"),
        (SectionType::Text, "section--text"),
        (SectionType::Faq, "section--faq"),
        (SectionType::Stats, "section--stats"),
        (SectionType::Custom, "section--custom"),
    ];

    for (section_type, class) in cases {
        let html = render_section(&section(section_type, 0, json!({})));
        assert!(html.contains(class), "{:?} rendered {}", section_type, html);
    }
}

#[test]
fn test_empty_content_uses_defaults() {
    let cta = render_section(&section(SectionType::Cta, 0, json!({})));
    assert!(cta.contains("Ready to get started?"));
    assert!(cta.contains(r##"href="#""##));

    let image = render_section(&section(SectionType::Image, 0, json!({})));
    assert!(image.contains("No image selected"));

    let features = render_section(&section(SectionType::Features, 0, json!({})));
    assert!(features.contains("Feature 1"));
    assert!(features.contains("Feature 3"));
}

#[test]
fn test_supplied_content_is_escaped() {
    let faq = render_section(&section(
        SectionType::Faq,
        0,
        json!({"items": [{"question": "Is <b> allowed?", "answer": "Tom & Jerry"}]}),
    ));

    assert!(faq.contains("<dt>Is &lt;b&gt; allowed?</dt>"));
    assert!(faq.contains("<dd>Tom &amp; Jerry</dd>"));
}

#[test]
fn test_pricing_plans() {
    let html = render_section(&section(
        SectionType::Pricing,
        0,
        json!({"plans": [
            {"name": "Starter", "price": 49, "features": ["1 link", "DA 20+"]},
            {"name": "Pro", "price": "$199"}
        ]}),
    ));

    assert!(html.contains("<h3>Starter</h3>"));
    assert!(html.contains(r#"<p class="price">49</p>"#));
    assert!(html.contains("<li>DA 20+</li>"));
    assert!(html.contains(r#"<p class="price">$199</p>"#));
}

#[test]
fn test_unknown_type_from_editor_renders_as_custom() {
    let input: SectionInput = serde_json::from_value(json!({
        "type": "VIDEO",
        "content": {"url": "https://video.example/1"}
    }))
    .unwrap();
    let html = render_section(&input.into_section(Uuid::nil(), 0));

    assert!(html.contains("section--custom"));
    assert!(html.contains("<pre>"));
    assert!(html.contains("video.example"));
}

#[test]
fn test_page_renders_sections_in_order() {
    let mut hidden = section(SectionType::Stats, 1, json!({}));
    hidden.is_visible = false;

    let html = render_page(&page(vec![
        section(SectionType::Cta, 2, json!({"heading": "Last"})),
        hidden,
        section(SectionType::Hero, 0, json!({"heading": "First"})),
    ]));

    let first = html.find("First").unwrap();
    let hidden_at = html.find("section--hidden").unwrap();
    let last = html.find("Last").unwrap();
    assert!(first < hidden_at && hidden_at < last);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Buy &lt;quality&gt; backlinks</title>"));
    assert!(html.contains(r#"<meta name="description" content="Marketplace home">"#));
}
