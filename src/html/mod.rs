//! HTML analysis: extraction of SEO-relevant fields from a saved page.
//!
//! The document is parsed once; every field is extracted independently and
//! degrades to a null/zero/empty value when absent. The result is one flat
//! mapping serialized as JSON.

pub(crate) mod extract;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::DEFAULT_TARGET_URL;

/// Flat mapping of every field extracted from one HTML document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// Page title text
    pub title: Option<String>,
    /// Character length of the title (0 when absent)
    pub title_length: usize,
    /// Meta tag name/property/http-equiv attributes mapped to content
    pub meta_tags: HashMap<String, String>,
    /// Heading text by level
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    /// Image totals and accessibility-attribute gaps
    pub total_images: usize,
    pub images_without_alt: usize,
    pub images_without_title: usize,
    /// Link totals partitioned by the site's domain
    pub total_links: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub nofollow_links: usize,
    /// Canonical URL declared by the page
    pub canonical_url: Option<String>,
    /// Declared document language
    pub language: Option<String>,
    /// JSON-LD structured-data blocks and their declared types
    pub schema_markup_count: usize,
    pub schema_types: Vec<String>,
    /// Social-sharing meta tag conventions
    pub open_graph: HashMap<String, String>,
    pub twitter_card: HashMap<String, String>,
    /// Form, script, and stylesheet totals
    pub total_forms: usize,
    pub total_scripts: usize,
    pub inline_scripts: usize,
    pub external_scripts: usize,
    pub total_stylesheets: usize,
    /// Mobile viewport declaration
    pub has_viewport: bool,
    pub viewport_content: Option<String>,
    /// Whether any icon link is declared
    pub has_favicon: bool,
    /// Whitespace-delimited word count of the extracted text
    pub word_count: usize,
}

/// Analyzes an HTML document against the given site domain.
///
/// The domain drives only the internal/external link partition; every other
/// field is a property of the document alone.
pub fn analyze_document(html: &str, domain: &str) -> PageAnalysis {
    let document = Html::parse_document(html);

    let title = extract::extract_title(&document);
    let title_length = title.as_deref().map_or(0, |t| t.chars().count());

    let images = extract::count_images(&document);
    let links = extract::count_links(&document, domain);
    let (schema_markup_count, schema_types) = extract::extract_schema(&document);
    let scripts = extract::count_scripts(&document);
    let viewport_content = extract::extract_viewport(&document);

    PageAnalysis {
        title,
        title_length,
        meta_tags: extract::extract_meta_tags(&document),
        h1: extract::extract_headings(&document, "h1"),
        h2: extract::extract_headings(&document, "h2"),
        h3: extract::extract_headings(&document, "h3"),
        h4: extract::extract_headings(&document, "h4"),
        total_images: images.total,
        images_without_alt: images.without_alt,
        images_without_title: images.without_title,
        total_links: links.total,
        internal_links: links.internal,
        external_links: links.external,
        nofollow_links: links.nofollow,
        canonical_url: extract::extract_canonical(&document),
        language: extract::extract_language(&document),
        schema_markup_count,
        schema_types,
        open_graph: extract::extract_property_tags(&document, "og:"),
        twitter_card: extract::extract_name_tags(&document, "twitter:"),
        total_forms: extract::count_forms(&document),
        total_scripts: scripts.total,
        inline_scripts: scripts.inline,
        external_scripts: scripts.external,
        total_stylesheets: extract::count_stylesheets(&document),
        has_viewport: viewport_content.is_some(),
        viewport_content,
        has_favicon: extract::has_favicon(&document),
        word_count: extract::count_words(&document),
    }
}

/// Extracts the host of a URL for the link partition, falling back to the
/// default target's host when the URL does not parse.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| {
            log::warn!("Could not parse URL '{url}', falling back to default target domain");
            Url::parse(DEFAULT_TARGET_URL)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_default()
        })
}

/// Runs the `html` pipeline: read a saved page, analyze it, print the
/// report, and write it next to the input.
pub fn run(input: &Path, base_url: &str, output: &Path) -> Result<()> {
    let html = fs::read_to_string(input)
        .with_context(|| format!("Failed to read HTML file {}", input.display()))?;

    let domain = domain_of(base_url);
    log::info!("Analyzing {} against domain {}", input.display(), domain);

    let analysis = analyze_document(&html, &domain);

    let rendered = serde_json::to_string_pretty(&analysis)
        .context("Failed to serialize HTML analysis")?;
    println!("{rendered}");

    fs::write(output, &rendered)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Analysis written to {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_document_basic() {
        let html = r#"
            <html lang="de">
                <head>
                    <title> Test Page </title>
                    <meta name="description" content="A test page">
                    <meta property="og:title" content="OG Title">
                    <meta http-equiv="refresh" content="30">
                    <link rel="canonical" href="https://example.com/">
                    <link rel="stylesheet" href="/main.css">
                    <link rel="shortcut icon" href="/favicon.ico">
                    <meta name="viewport" content="width=device-width, initial-scale=1">
                </head>
                <body>
                    <h1>Main Heading</h1>
                    <h2>Subheading</h2>
                    <p>Hello world from the test page</p>
                </body>
            </html>
        "#;
        let analysis = analyze_document(html, "example.com");

        assert_eq!(analysis.title.as_deref(), Some("Test Page"));
        assert_eq!(analysis.title_length, 9);
        assert_eq!(
            analysis.meta_tags.get("description").map(String::as_str),
            Some("A test page")
        );
        assert_eq!(
            analysis.meta_tags.get("og:title").map(String::as_str),
            Some("OG Title")
        );
        assert_eq!(
            analysis.meta_tags.get("refresh").map(String::as_str),
            Some("30")
        );
        assert_eq!(analysis.h1, vec!["Main Heading"]);
        assert_eq!(analysis.h2, vec!["Subheading"]);
        assert_eq!(analysis.canonical_url.as_deref(), Some("https://example.com/"));
        assert_eq!(analysis.language.as_deref(), Some("de"));
        assert_eq!(analysis.total_stylesheets, 1);
        assert!(analysis.has_favicon);
        assert!(analysis.has_viewport);
        assert_eq!(
            analysis.viewport_content.as_deref(),
            Some("width=device-width, initial-scale=1")
        );
        assert!(analysis.word_count >= 6);
    }

    #[test]
    fn test_image_counters_zero_without_images() {
        let html = "<html><body><p>No pictures here</p></body></html>";
        let analysis = analyze_document(html, "example.com");

        assert_eq!(analysis.total_images, 0);
        assert_eq!(analysis.images_without_alt, 0);
        assert_eq!(analysis.images_without_title, 0);
    }

    #[test]
    fn test_image_counters_empty_alt_counts_as_missing() {
        let html = r#"
            <html><body>
                <img src="a.png" alt="described" title="titled">
                <img src="b.png" alt="">
                <img src="c.png">
            </body></html>
        "#;
        let analysis = analyze_document(html, "example.com");

        assert_eq!(analysis.total_images, 3);
        assert_eq!(analysis.images_without_alt, 2);
        assert_eq!(analysis.images_without_title, 2);
    }

    #[test]
    fn test_malformed_json_ld_skipped_but_counted() {
        let html = r#"
            <html><head>
                <script type="application/ld+json">{"@type":"Organization","name":"Test"}</script>
                <script type="application/ld+json">{not valid json at all</script>
                <script type="application/ld+json">{"@type":["WebPage","FAQPage"]}</script>
            </head><body></body></html>
        "#;
        let analysis = analyze_document(html, "example.com");

        assert_eq!(analysis.schema_markup_count, 3);
        assert_eq!(analysis.schema_types, vec!["Organization", "WebPage", "FAQPage"]);
    }

    #[test]
    fn test_link_partition_is_exhaustive_and_exclusive() {
        let html = r#"
            <html><body>
                <a href="/products">Products</a>
                <a href="contact.html">Contact</a>
                <a href="https://example.com/about">About</a>
                <a href="https://other.org/">Elsewhere</a>
                <a href="http://another.net/page" rel="nofollow">Sponsored</a>
            </body></html>
        "#;
        let analysis = analyze_document(html, "example.com");

        assert_eq!(analysis.total_links, 5);
        assert_eq!(analysis.internal_links, 3);
        assert_eq!(analysis.external_links, 2);
        assert_eq!(
            analysis.internal_links + analysis.external_links,
            analysis.total_links
        );
        assert_eq!(analysis.nofollow_links, 1);
    }

    #[test]
    fn test_script_split() {
        let html = r#"
            <html><head>
                <script src="https://cdn.example.com/lib.js"></script>
                <script>var inline = 1;</script>
                <script>var other = 2;</script>
            </head><body><form action="/search"></form></body></html>
        "#;
        let analysis = analyze_document(html, "example.com");

        assert_eq!(analysis.total_scripts, 3);
        assert_eq!(analysis.external_scripts, 1);
        assert_eq!(analysis.inline_scripts, 2);
        assert_eq!(analysis.total_forms, 1);
    }

    #[test]
    fn test_empty_document_degrades_to_defaults() {
        let analysis = analyze_document("<html><head></head><body></body></html>", "example.com");

        assert_eq!(analysis.title, None);
        assert_eq!(analysis.title_length, 0);
        assert!(analysis.meta_tags.is_empty());
        assert!(analysis.h1.is_empty());
        assert_eq!(analysis.schema_markup_count, 0);
        assert!(!analysis.has_viewport);
        assert!(!analysis.has_favicon);
        assert_eq!(analysis.canonical_url, None);
        assert_eq!(analysis.language, None);
    }

    #[test]
    fn test_twitter_card_by_name_prefix() {
        let html = r#"
            <html><head>
                <meta name="twitter:card" content="summary">
                <meta name="twitter:site" content="@example">
                <meta property="og:type" content="website">
            </head><body></body></html>
        "#;
        let analysis = analyze_document(html, "example.com");

        assert_eq!(analysis.twitter_card.len(), 2);
        assert_eq!(
            analysis.twitter_card.get("twitter:card").map(String::as_str),
            Some("summary")
        );
        assert_eq!(analysis.open_graph.len(), 1);
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("https://www.example.com/page"), "www.example.com");
        // Unparseable input falls back to the default target's host
        assert_eq!(domain_of("not a url"), "www.tln-werbemittel.de");
    }
}
