//! Audit constants.
//!
//! This module defines the hard-coded parameters of the audit: the target
//! site, the probe lists, timeouts, pacing delays, and default artifact
//! paths. Every value can be overridden on the command line; a bare
//! invocation audits the default target.

use std::time::Duration;

/// Site audited when no URL argument is given.
pub const DEFAULT_TARGET_URL: &str = "https://www.tln-werbemittel.de";

/// Subpages audited in addition to the homepage by the `seo` pipeline.
pub const SUBPAGE_PATHS: &[&str] = &["/impressum", "/datenschutz", "/kontakt"];

/// Candidate sitemap locations probed relative to the site root.
pub const SITEMAP_CANDIDATES: &[&str] =
    &["sitemap.xml", "sitemap_index.xml", "export/sitemap_de.xml"];

// Default artifact paths, all relative to the working directory.
// Re-running a pipeline overwrites its artifacts.
/// Raw homepage body written by `fetch` and read back by `html`.
pub const DEFAULT_PAGE_FILE: &str = "homepage.html";
/// JSON report written by `html`.
pub const DEFAULT_HTML_REPORT: &str = "html_analysis.json";
/// JSON report written by `performance`.
pub const DEFAULT_PERFORMANCE_REPORT: &str = "performance_analysis.json";
/// JSON report written by `seo`.
pub const DEFAULT_SEO_REPORT: &str = "seo_analysis_report.json";
/// Directory holding the authored markdown report sections.
pub const DEFAULT_REPORTS_DIR: &str = "reports";
/// Paginated document written by `report`.
pub const DEFAULT_PDF_REPORT: &str = "seo_audit_report.pdf";

/// The authored report sections, in document order: file name under the
/// reports directory, and the section title shown in the TOC.
pub const REPORT_SECTIONS: &[(&str, &str)] = &[
    ("seo_analysis.md", "Executive Summary"),
    ("core_web_vitals.md", "Core Web Vitals & Performance"),
    ("technical_seo.md", "Technical SEO Deep Dive"),
    ("content_strategy.md", "Content & SEO Strategy"),
    ("quick_fixes.md", "Implementation Checklist"),
];

// Network operation timeouts
/// Timeout for the main page fetch in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;
/// Timeout for per-page audits in the `seo` pipeline in seconds
pub const PAGE_TIMEOUT_SECS: u64 = 10;
/// Timeout for small probes (robots.txt, sitemap candidates) in seconds
pub const PROBE_TIMEOUT_SECS: u64 = 5;
/// Timeout for PageSpeed Insights API calls in seconds.
/// The API runs a full Lighthouse pass server-side and routinely takes
/// 30-60 seconds to answer.
pub const PAGESPEED_TIMEOUT_SECS: u64 = 60;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// WHOIS socket query timeout in seconds
pub const WHOIS_TIMEOUT_SECS: u64 = 10;

// Pacing. Fixed politeness pauses between sequential requests to the same
// host or API; not a backpressure mechanism.
/// Pause between latency samples
pub const SAMPLE_DELAY: Duration = Duration::from_secs(1);
/// Pause between PageSpeed strategy calls (API rate-limit courtesy)
pub const STRATEGY_DELAY: Duration = Duration::from_secs(2);
/// Pause between subpage audits
pub const SUBPAGE_DELAY: Duration = Duration::from_secs(1);

/// Number of sequential requests used for latency statistics
pub const LATENCY_SAMPLES: usize = 3;

/// PageSpeed Insights API endpoint
pub const PAGESPEED_ENDPOINT: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
/// Lighthouse categories requested from the PageSpeed API
pub const PAGESPEED_CATEGORIES: &[&str] =
    &["performance", "accessibility", "best-practices", "seo"];
/// Environment variable consulted for the PageSpeed API key when no
/// `--api-key` flag is given. Unkeyed requests work at a lower quota.
pub const PAGESPEED_API_KEY_ENV: &str = "PAGESPEED_API_KEY";

/// Desktop browser User-Agent sent with every page request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
