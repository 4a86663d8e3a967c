//! HTML inspection for a fetched page.
//!
//! `scraper::Html` is not `Send`, so everything the checks need is extracted
//! into owned strings up front and the parse tree is dropped before any await.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

fn selector(css: &str) -> Selector {
    // Selectors below are static literals.
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {}", css, e))
}

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static META_DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="description"]"#));
static META_VIEWPORT: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="viewport"]"#));
static JSON_LD: Lazy<Selector> = Lazy::new(|| selector(r#"script[type="application/ld+json"]"#));
static ANCHORS: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static IMAGES: Lazy<Selector> = Lazy::new(|| selector("img"));

/// Elements of a page relevant to the diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDocument {
    /// Text of the first `<title>`, present even when empty
    pub title: Option<String>,
    /// `content` of the description meta tag, when non-empty
    pub meta_description: Option<String>,
    /// `content` of the viewport meta tag, when non-empty
    pub viewport: Option<String>,
    /// Body of the first JSON-LD script block
    pub structured_data: Option<String>,
    /// Absolute anchor targets in document order, duplicates kept
    pub links: Vec<String>,
    /// Image sources resolved against the page URL, in document order
    pub images: Vec<String>,
}

impl PageDocument {
    /// Parse `html` served from `base`
    pub fn parse(html: &str, base: &Url) -> Self {
        let document = Html::parse_document(html);

        let title = document
            .select(&TITLE)
            .next()
            .map(|el| el.text().collect::<String>());

        let structured_data = document
            .select(&JSON_LD)
            .next()
            .map(|el| el.text().collect::<String>());

        let links = document
            .select(&ANCHORS)
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| href.starts_with("http"))
            .map(str::to_string)
            .collect();

        let images = document
            .select(&IMAGES)
            .filter_map(image_source)
            .map(|src| match base.join(&src) {
                Ok(url) => url.to_string(),
                // Unresolvable sources are still probed so they show up as broken.
                Err(_) => src,
            })
            .collect();

        Self {
            title,
            meta_description: meta_content(&document, &META_DESCRIPTION),
            viewport: meta_content(&document, &META_VIEWPORT),
            structured_data,
            links,
            images,
        }
    }

    /// Structured data preview: the first `max_chars` characters after leading whitespace
    pub fn structured_data_preview(&self, max_chars: usize) -> Option<String> {
        self.structured_data
            .as_deref()
            .map(|data| data.trim_start().chars().take(max_chars).collect())
    }
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

/// `src`, falling back to the first `srcset` candidate
fn image_source(img: ElementRef<'_>) -> Option<String> {
    let element = img.value();
    if let Some(src) = element.attr("src").filter(|s| !s.trim().is_empty()) {
        return Some(src.trim().to_string());
    }

    element
        .attr("srcset")
        .and_then(|srcset| srcset.split(',').next())
        .and_then(|candidate| candidate.split_whitespace().next())
        .map(str::to_string)
}
