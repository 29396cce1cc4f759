//! Field extractors over a parsed HTML document.
//!
//! Each extractor is independent and order-insensitive; a field that is
//! absent from the document degrades to `None`, zero, or an empty
//! collection.

use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};

fn static_selector(selector_str: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!("Failed to parse CSS selector '{selector_str}': {e}. Using fallback.");
        // Known-valid selector that matches nothing
        Selector::parse("*:not(*)").expect("fallback selector '*:not(*)' should always parse")
    })
}

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("title"));
static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("meta"));
static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("img"));
static LINK_HREF_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href]"));
static LINK_REL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("link"));
static HTML_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("html"));
static SCHEMA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| static_selector("script[type='application/ld+json']"));
static FORM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("form"));
static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("script"));

/// Extracts the page title, trimmed of surrounding whitespace.
pub(crate) fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Maps every `meta` tag's name, property, or http-equiv attribute to its
/// content. A tag carrying more than one key attribute is recorded under
/// the first in that precedence order.
pub(crate) fn extract_meta_tags(document: &Html) -> HashMap<String, String> {
    let mut meta_tags = HashMap::new();
    for element in document.select(&META_SELECTOR) {
        let key = element
            .value()
            .attr("name")
            .or_else(|| element.value().attr("property"))
            .or_else(|| element.value().attr("http-equiv"));
        if let Some(key) = key {
            let content = element.value().attr("content").unwrap_or_default();
            meta_tags.insert(key.to_string(), content.to_string());
        }
    }
    meta_tags
}

/// Collects the trimmed text of every heading at the given level (`h1`..`h4`).
pub(crate) fn extract_headings(document: &Html, tag: &str) -> Vec<String> {
    let selector = static_selector(tag);
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

/// Image totals: overall count plus counts missing a usable `alt` or
/// `title` attribute (absent and empty both count as missing).
pub(crate) struct ImageCounts {
    pub total: usize,
    pub without_alt: usize,
    pub without_title: usize,
}

pub(crate) fn count_images(document: &Html) -> ImageCounts {
    let mut counts = ImageCounts {
        total: 0,
        without_alt: 0,
        without_title: 0,
    };
    for img in document.select(&IMG_SELECTOR) {
        counts.total += 1;
        if img.value().attr("alt").is_none_or(str::is_empty) {
            counts.without_alt += 1;
        }
        if img.value().attr("title").is_none_or(str::is_empty) {
            counts.without_title += 1;
        }
    }
    counts
}

/// Link totals partitioned by the site's domain.
///
/// A link is internal when its href is not `http`-prefixed (relative,
/// fragment, mailto, ...) or when it contains the domain as a substring;
/// every `http`-prefixed link pointing elsewhere is external. The partition
/// is exhaustive and exclusive: `internal + external == total`.
pub(crate) struct LinkCounts {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
    pub nofollow: usize,
}

pub(crate) fn count_links(document: &Html, domain: &str) -> LinkCounts {
    let mut counts = LinkCounts {
        total: 0,
        internal: 0,
        external: 0,
        nofollow: 0,
    };
    for link in document.select(&LINK_HREF_SELECTOR) {
        let href = link.value().attr("href").unwrap_or_default();
        counts.total += 1;
        if !href.starts_with("http") || href.contains(domain) {
            counts.internal += 1;
        } else {
            counts.external += 1;
        }
        if let Some(rel) = link.value().attr("rel") {
            if rel.split_whitespace().any(|token| token == "nofollow") {
                counts.nofollow += 1;
            }
        }
    }
    counts
}

/// Extracts the canonical URL from `<link rel="canonical">`.
pub(crate) fn extract_canonical(document: &Html) -> Option<String> {
    document
        .select(&LINK_REL_SELECTOR)
        .find(|el| el.value().attr("rel") == Some("canonical"))
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
}

/// Extracts the declared document language from `<html lang>`.
pub(crate) fn extract_language(document: &Html) -> Option<String> {
    document
        .select(&HTML_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("lang"))
        .map(str::to_string)
}

/// Counts JSON-LD structured-data blocks and collects their declared
/// `@type` values. Malformed blocks are skipped silently but still counted.
pub(crate) fn extract_schema(document: &Html) -> (usize, Vec<String>) {
    let mut count = 0;
    let mut types = Vec::new();
    for script in document.select(&SCHEMA_SELECTOR) {
        count += 1;
        let raw = script.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
            continue;
        };
        match value.get("@type") {
            Some(serde_json::Value::String(t)) => types.push(t.clone()),
            Some(serde_json::Value::Array(items)) => {
                types.extend(items.iter().filter_map(|v| v.as_str().map(str::to_string)));
            }
            _ => {}
        }
    }
    (count, types)
}

/// Maps meta tags whose `property` starts with the given prefix
/// (Open Graph convention).
pub(crate) fn extract_property_tags(document: &Html, prefix: &str) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    for element in document.select(&META_SELECTOR) {
        if let Some(property) = element.value().attr("property") {
            if property.starts_with(prefix) {
                let content = element.value().attr("content").unwrap_or_default();
                tags.insert(property.to_string(), content.to_string());
            }
        }
    }
    tags
}

/// Maps meta tags whose `name` starts with the given prefix
/// (Twitter Card convention).
pub(crate) fn extract_name_tags(document: &Html, prefix: &str) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    for element in document.select(&META_SELECTOR) {
        if let Some(name) = element.value().attr("name") {
            if name.starts_with(prefix) {
                let content = element.value().attr("content").unwrap_or_default();
                tags.insert(name.to_string(), content.to_string());
            }
        }
    }
    tags
}

pub(crate) fn count_forms(document: &Html) -> usize {
    document.select(&FORM_SELECTOR).count()
}

/// Script totals split into inline (no `src`) and external.
pub(crate) struct ScriptCounts {
    pub total: usize,
    pub inline: usize,
    pub external: usize,
}

pub(crate) fn count_scripts(document: &Html) -> ScriptCounts {
    let mut counts = ScriptCounts {
        total: 0,
        inline: 0,
        external: 0,
    };
    for script in document.select(&SCRIPT_SELECTOR) {
        counts.total += 1;
        if script.value().attr("src").is_some() {
            counts.external += 1;
        } else {
            counts.inline += 1;
        }
    }
    counts
}

/// Counts stylesheet links (`rel` containing the `stylesheet` token).
pub(crate) fn count_stylesheets(document: &Html) -> usize {
    document
        .select(&LINK_REL_SELECTOR)
        .filter(|el| {
            el.value()
                .attr("rel")
                .is_some_and(|rel| rel.split_whitespace().any(|token| token == "stylesheet"))
        })
        .count()
}

/// Extracts the viewport meta tag content, if declared.
pub(crate) fn extract_viewport(document: &Html) -> Option<String> {
    document
        .select(&META_SELECTOR)
        .find(|el| el.value().attr("name") == Some("viewport"))
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

/// Whether any `link` declares an icon (`rel` containing "icon", which also
/// matches "shortcut icon" and "apple-touch-icon").
pub(crate) fn has_favicon(document: &Html) -> bool {
    document
        .select(&LINK_REL_SELECTOR)
        .any(|el| el.value().attr("rel").is_some_and(|rel| rel.contains("icon")))
}

/// Approximate word count over the document's extracted text.
pub(crate) fn count_words(document: &Html) -> usize {
    document
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .count()
}
