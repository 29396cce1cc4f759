//! Report-to-PDF assembler.
//!
//! Concatenates the authored markdown sections into one print-styled HTML
//! document (cover page, table of contents, then each section in its fixed
//! order) and renders it to a paginated PDF through a headless Chromium
//! tab. A missing section file or a rendering failure terminates the run.

mod markdown;
mod style;

use std::fs;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use crate::config::REPORT_SECTIONS;
use crate::error_handling::ReportError;
use style::REPORT_CSS;

/// One converted section, ready for assembly.
#[derive(Debug, Clone)]
pub struct Section {
    /// Title shown in the table of contents
    pub title: String,
    /// Converted section body
    pub html: String,
}

/// Reads and converts every authored section, in document order.
pub fn load_sections(dir: &Path) -> Result<Vec<Section>, ReportError> {
    let mut sections = Vec::with_capacity(REPORT_SECTIONS.len());
    for (file_name, title) in REPORT_SECTIONS {
        let path = dir.join(file_name);
        log::info!("Processing: {title}");
        let markdown = fs::read_to_string(&path).map_err(|source| ReportError::SectionRead {
            path: path.display().to_string(),
            source,
        })?;
        sections.push(Section {
            title: (*title).to_string(),
            html: markdown::convert_section(&markdown),
        });
    }
    Ok(sections)
}

/// Assembles the complete HTML document: cover page, TOC, and all sections
/// wrapped in anchored containers.
pub fn assemble_document(site_label: &str, generated_on: &str, sections: &[Section]) -> String {
    let mut document = String::with_capacity(64 * 1024);

    document.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    document.push_str(&format!("<title>SEO Analysis Report - {site_label}</title>\n"));
    document.push_str("<style>\n");
    document.push_str(REPORT_CSS);
    document.push_str("</style>\n</head>\n<body>\n");

    // Cover page
    document.push_str(&format!(
        r#"<div class="cover-page">
<h1>SEO Analysis Report</h1>
<h2>{site_label}</h2>
<p style="font-size: 18px; margin-top: 40px;">Comprehensive SEO and Performance Analysis</p>
<div class="date">
<p>Generated: {generated_on}</p>
<p>Analysis Version: {version}</p>
</div>
</div>
"#,
        version = env!("CARGO_PKG_VERSION"),
    ));

    // Table of contents, anchored to the section containers below
    document.push_str("<div class=\"toc\">\n<h2>Table of Contents</h2>\n<ul>\n");
    for (i, section) in sections.iter().enumerate() {
        let number = i + 1;
        document.push_str(&format!(
            "<li>{number}. <a href=\"#{number}\">{title}</a></li>\n",
            title = section.title
        ));
    }
    document.push_str("</ul>\n</div>\n");

    for (i, section) in sections.iter().enumerate() {
        document.push_str(&format!("<div class=\"section\" id=\"{}\">\n", i + 1));
        document.push_str(&section.html);
        document.push_str("</div>\n");
    }

    document.push_str("</body>\n</html>\n");
    document
}

/// Renders the assembled document to a paginated PDF.
///
/// The document is staged as a temporary file and loaded over `file://` so
/// Chromium resolves it like any local page.
fn render_pdf(document: &str, output: &Path) -> Result<(), ReportError> {
    let mut page = tempfile::Builder::new()
        .prefix("site_audit_report")
        .suffix(".html")
        .tempfile()
        .map_err(ReportError::Output)?;
    page.write_all(document.as_bytes())
        .map_err(ReportError::Output)?;

    let page_url = format!("file://{}", page.path().display());

    let browser = Browser::new(LaunchOptions {
        headless: true,
        ..Default::default()
    })
    .map_err(|e| ReportError::Render(format!("failed to launch browser: {e}")))?;

    let tab = browser
        .new_tab()
        .map_err(|e| ReportError::Render(format!("failed to open tab: {e}")))?;
    tab.navigate_to(&page_url)
        .map_err(|e| ReportError::Render(format!("failed to load document: {e}")))?;
    tab.wait_until_navigated()
        .map_err(|e| ReportError::Render(format!("document did not finish loading: {e}")))?;

    let pdf = tab
        .print_to_pdf(Some(PrintToPdfOptions {
            print_background: Some(true),
            prefer_css_page_size: Some(true),
            display_header_footer: Some(false),
            ..Default::default()
        }))
        .map_err(|e| ReportError::Render(format!("printing failed: {e}")))?;

    fs::write(output, pdf).map_err(ReportError::Output)?;
    Ok(())
}

/// Runs the `report` pipeline.
pub async fn run(dir: &Path, site_label: &str, output: &Path) -> Result<()> {
    let sections = load_sections(dir).context("Failed to load report sections")?;

    let generated_on = chrono::Local::now().format("%B %d, %Y").to_string();
    let document = assemble_document(site_label, &generated_on, &sections);

    log::info!("Generating PDF");
    render_pdf(&document, output).context("Failed to render PDF")?;

    let size_mb = fs::metadata(output)
        .with_context(|| format!("Failed to stat {}", output.display()))?
        .len() as f64
        / (1024.0 * 1024.0);

    println!(
        "{} PDF generated successfully: {}",
        "✅".green(),
        output.display()
    );
    println!("File size: {size_mb:.2} MB");

    Ok(())
}
