//! HTML rendering of pages and sections
//!
//! Each section type has its own branch that reads keys from the untyped
//! content object, falling back to placeholder text when a key is missing.
//! Every interpolated value is escaped except the `html` key of a CUSTOM
//! section, which is emitted as-is.

use std::fmt::Write;

use pulldown_cmark::{html, Event, Options, Parser};
use serde_json::Value;

use super::model::{PageWithSections, Section, SectionType};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markdown to HTML; embedded raw HTML is shown as text
pub fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            other => other,
        });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn text<'a>(content: &'a Value, key: &str, default: &'a str) -> &'a str {
    content
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default)
}

fn items<'a>(content: &'a Value, key: &str) -> &'a [Value] {
    content
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Numbers and strings both render; anything else falls back
fn scalar(content: &Value, key: &str, default: &str) -> String {
    match content.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

fn open(section: &Section, class: &str) -> String {
    format!(
        r#"<section class="section section--{}" data-section-id="{}">"#,
        class, section.id
    )
}

pub fn render_section(section: &Section) -> String {
    if !section.is_visible {
        return format!(
            r#"<section class="section section--hidden" data-section-id="{}" hidden></section>"#,
            section.id
        );
    }

    let c = &section.content;
    match section.section_type {
        SectionType::Hero => render_hero(section, c),
        SectionType::Text => render_text(section, c),
        SectionType::Features => render_features(section, c),
        SectionType::Testimonials => render_testimonials(section, c),
        SectionType::Cta => render_cta(section, c),
        SectionType::Image => render_image(section, c),
        SectionType::Pricing => render_pricing(section, c),
        SectionType::Faq => render_faq(section, c),
        SectionType::Stats => render_stats(section, c),
        SectionType::Custom => render_custom(section, c),
    }
}

fn render_hero(section: &Section, c: &Value) -> String {
    let mut out = open(section, "hero");
    let _ = write!(out, "<h1>{}</h1>", escape_html(text(c, "heading", "Welcome")));
    if let Some(sub) = c.get("subheading").and_then(Value::as_str) {
        let _ = write!(out, "<p>{}</p>", escape_html(sub));
    }
    if let Some(cta) = c.get("ctaText").and_then(Value::as_str) {
        let _ = write!(
            out,
            r#"<a class="button" href="{}">{}</a>"#,
            escape_html(text(c, "ctaLink", "#")),
            escape_html(cta)
        );
    }
    out.push_str("</section>");
    out
}

fn render_text(section: &Section, c: &Value) -> String {
    let mut out = open(section, "text");
    if let Some(heading) = c.get("heading").and_then(Value::as_str) {
        let _ = write!(out, "<h2>{}</h2>", escape_html(heading));
    }
    out.push_str(&render_markdown(text(c, "body", "")));
    out.push_str("</section>");
    out
}

fn render_features(section: &Section, c: &Value) -> String {
    let mut out = open(section, "features");
    let _ = write!(out, "<h2>{}</h2>", escape_html(text(c, "heading", "Features")));
    out.push_str(r#"<div class="features">"#);

    let features = items(c, "items");
    if features.is_empty() {
        for n in 1..=3 {
            let _ = write!(
                out,
                r#"<div class="feature"><h3>Feature {}</h3><p>Describe this feature.</p></div>"#,
                n
            );
        }
    } else {
        for feature in features {
            let _ = write!(
                out,
                r#"<div class="feature"><h3>{}</h3><p>{}</p></div>"#,
                escape_html(text(feature, "title", "Feature")),
                escape_html(text(feature, "description", ""))
            );
        }
    }

    out.push_str("</div></section>");
    out
}

fn render_testimonials(section: &Section, c: &Value) -> String {
    let mut out = open(section, "testimonials");
    let _ = write!(
        out,
        "<h2>{}</h2>",
        escape_html(text(c, "heading", "What our customers say"))
    );

    let quotes = items(c, "items");
    if quotes.is_empty() {
        out.push_str("<blockquote><p>No testimonials yet.</p></blockquote>");
    }
    for quote in quotes {
        let _ = write!(
            out,
            "<blockquote><p>{}</p><cite>{}</cite></blockquote>",
            escape_html(text(quote, "quote", "")),
            escape_html(text(quote, "author", "Anonymous"))
        );
    }

    out.push_str("</section>");
    out
}

fn render_cta(section: &Section, c: &Value) -> String {
    let mut out = open(section, "cta");
    let _ = write!(out, "<h2>{}</h2>", escape_html(text(c, "heading", "Ready to get started?")));
    if let Some(body) = c.get("text").and_then(Value::as_str) {
        let _ = write!(out, "<p>{}</p>", escape_html(body));
    }
    let _ = write!(
        out,
        r#"<a class="button" href="{}">{}</a>"#,
        escape_html(text(c, "buttonLink", "#")),
        escape_html(text(c, "buttonText", "Get started"))
    );
    out.push_str("</section>");
    out
}

fn render_image(section: &Section, c: &Value) -> String {
    let mut out = open(section, "image");
    match c.get("src").and_then(Value::as_str).filter(|s| !s.is_empty()) {
        Some(src) => {
            let _ = write!(
                out,
                r#"<figure><img src="{}" alt="{}">"#,
                escape_html(src),
                escape_html(text(c, "alt", ""))
            );
            if let Some(caption) = c.get("caption").and_then(Value::as_str) {
                let _ = write!(out, "<figcaption>{}</figcaption>", escape_html(caption));
            }
            out.push_str("</figure>");
        }
        None => out.push_str(r#"<div class="image-placeholder">No image selected</div>"#),
    }
    out.push_str("</section>");
    out
}

fn render_pricing(section: &Section, c: &Value) -> String {
    let mut out = open(section, "pricing");
    let _ = write!(out, "<h2>{}</h2>", escape_html(text(c, "heading", "Pricing")));
    out.push_str(r#"<div class="plans">"#);

    for plan in items(c, "plans") {
        let _ = write!(
            out,
            r#"<div class="plan"><h3>{}</h3><p class="price">{}</p><ul>"#,
            escape_html(text(plan, "name", "Plan")),
            escape_html(&scalar(plan, "price", "Contact us"))
        );
        for feature in items(plan, "features").iter().filter_map(Value::as_str) {
            let _ = write!(out, "<li>{}</li>", escape_html(feature));
        }
        out.push_str("</ul></div>");
    }

    out.push_str("</div></section>");
    out
}

fn render_faq(section: &Section, c: &Value) -> String {
    let mut out = open(section, "faq");
    let _ = write!(
        out,
        "<h2>{}</h2>",
        escape_html(text(c, "heading", "Frequently asked questions"))
    );
    out.push_str("<dl>");
    for entry in items(c, "items") {
        let _ = write!(
            out,
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(text(entry, "question", "")),
            escape_html(text(entry, "answer", ""))
        );
    }
    out.push_str("</dl></section>");
    out
}

fn render_stats(section: &Section, c: &Value) -> String {
    let mut out = open(section, "stats");
    out.push_str(r#"<div class="stats">"#);
    for stat in items(c, "items") {
        let _ = write!(
            out,
            r#"<div class="stat"><strong>{}</strong><span>{}</span></div>"#,
            escape_html(&scalar(stat, "value", "0")),
            escape_html(text(stat, "label", ""))
        );
    }
    out.push_str("</div></section>");
    out
}

fn render_custom(section: &Section, c: &Value) -> String {
    let mut out = open(section, "custom");
    match c.get("html").and_then(Value::as_str) {
        Some(raw) => out.push_str(raw),
        None => {
            let dump = serde_json::to_string_pretty(c).unwrap_or_default();
            let _ = write!(out, "<pre>{}</pre>", escape_html(&dump));
        }
    }
    out.push_str("</section>");
    out
}

/// Whole page as a standalone HTML document, sections in `order`
pub fn render_page(page: &PageWithSections) -> String {
    let mut sections: Vec<&Section> = page.sections.iter().collect();
    sections.sort_by_key(|s| s.order);

    let mut out = String::from("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    let _ = write!(out, "<title>{}</title>", escape_html(&page.page.title));
    if let Some(description) = &page.page.description {
        let _ = write!(
            out,
            r#"<meta name="description" content="{}">"#,
            escape_html(description)
        );
    }
    let _ = write!(out, r#"</head><body><main data-page="{}">"#, escape_html(&page.page.slug));
    for section in sections {
        out.push_str(&render_section(section));
    }
    out.push_str("</main></body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn section(section_type: SectionType, content: Value) -> Section {
        Section {
            id: Uuid::new_v4(),
            page_id: Uuid::new_v4(),
            section_type,
            order: 0,
            is_visible: true,
            content,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_hero_defaults_and_escaping() {
        let html = render_section(&section(SectionType::Hero, json!({})));
        assert!(html.contains("<h1>Welcome</h1>"));

        let html = render_section(&section(
            SectionType::Hero,
            json!({"heading": "<script>x</script>"}),
        ));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_features_placeholders() {
        let html = render_section(&section(SectionType::Features, json!({"items": []})));
        assert_eq!(html.matches(r#"class="feature""#).count(), 3);
    }

    #[test]
    fn test_text_renders_markdown() {
        let html = render_section(&section(
            SectionType::Text,
            json!({"body": "Hello **world**\n\n<b>raw</b>"}),
        ));
        assert!(html.contains("<strong>world</strong>"));
        assert!(!html.contains("<b>raw</b>"));
    }

    #[test]
    fn test_custom_fallbacks() {
        let raw = render_section(&section(SectionType::Custom, json!({"html": "<hr>"})));
        assert!(raw.contains("<hr>"));

        let dump = render_section(&section(SectionType::Custom, json!({"k": "<v>"})));
        assert!(dump.contains("<pre>"));
        assert!(dump.contains("&lt;v&gt;"));
    }

    #[test]
    fn test_stats_accept_numbers() {
        let html = render_section(&section(
            SectionType::Stats,
            json!({"items": [{"label": "Sites", "value": 1200}]}),
        ));
        assert!(html.contains("<strong>1200</strong>"));
    }
}
