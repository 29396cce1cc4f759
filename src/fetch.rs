//! Page fetcher: one browser-emulating GET, dumped to the console and
//! saved verbatim to disk.
//!
//! Unlike the probes in the `seo` pipeline, a failure here is not
//! downgraded: the fetch is the whole job, so any network or IO error
//! terminates the run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use scraper::Html;

use crate::config::FETCH_TIMEOUT_SECS;
use crate::html::extract;
use crate::initialization::init_client;

/// How many meta tags the console dump lists in full.
const META_PREVIEW_COUNT: usize = 10;

/// Runs the `fetch` pipeline: GET the page, print status, headers, and
/// cookies, save the body, and print basic structural counts.
pub async fn run(url: &str, output: &Path) -> Result<()> {
    let client = init_client(FETCH_TIMEOUT_SECS)?;

    log::info!("Fetching {url}");
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?;

    println!("Status Code: {}", response.status());
    println!("Response Headers:");
    for (name, value) in response.headers() {
        println!("  {}: {}", name, value.to_str().unwrap_or("<non-printable>"));
    }
    let cookies: Vec<String> = response
        .cookies()
        .map(|c| format!("{}={}", c.name(), c.value()))
        .collect();
    println!("Cookies: {}", cookies.join("; "));

    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    fs::write(output, &body)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Saved page body to {}", output.display());

    let document = Html::parse_document(&body);

    let title = extract::extract_title(&document);
    println!("\nTitle: {}", title.as_deref().unwrap_or("Not found"));

    let meta_tags = extract::extract_meta_tags(&document);
    println!("\nMeta tags found: {}", meta_tags.len());
    for (name, content) in meta_tags.iter().take(META_PREVIEW_COUNT) {
        println!("  {name}: {content}");
    }

    println!("\nH1 tags: {}", extract::extract_headings(&document, "h1").len());
    println!("H2 tags: {}", extract::extract_headings(&document, "h2").len());

    // Domain is irrelevant for the totals printed here
    let links = extract::count_links(&document, "");
    let images = extract::count_images(&document);
    println!("\nTotal links: {}", links.total);
    println!("Total images: {}", images.total);

    println!("\nTotal page size: {} bytes", body.len());

    Ok(())
}
