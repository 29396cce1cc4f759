//! Composite SEO analyzer.
//!
//! Wraps the single-page extraction contract with external lookups
//! (robots.txt, sitemap candidates, TLS certificate, DNS records, WHOIS)
//! and per-subpage audits. Every probe is independently fault-tolerant:
//! failures are downgraded to error-shaped fields inside the report so one
//! dead lookup never loses the rest of the run.

mod types;

pub use types::{
    DnsReport, DomainReport, PageAudit, PageOutcome, RobotsTxt, SeoReport, SitemapProbe,
    SslReport,
};

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::*;
use hickory_resolver::TokioAsyncResolver;

use crate::config::{
    PAGE_TIMEOUT_SECS, PROBE_TIMEOUT_SECS, SITEMAP_CANDIDATES, SUBPAGE_DELAY, SUBPAGE_PATHS,
};
use crate::html::{analyze_document, domain_of};
use crate::initialization::{init_client, init_resolver};
use crate::{dns, tls, whois};

/// A target site plus the session handles its probes share.
pub struct SeoAnalyzer {
    url: String,
    domain: String,
    client: Arc<reqwest::Client>,
    resolver: Arc<TokioAsyncResolver>,
}

impl SeoAnalyzer {
    /// Creates an analyzer for the given site.
    pub fn new(url: &str) -> Result<Self> {
        let domain = domain_of(url);
        let client = init_client(PAGE_TIMEOUT_SECS)?;
        let resolver = init_resolver();
        Ok(SeoAnalyzer {
            url: url.to_string(),
            domain,
            client,
            resolver,
        })
    }

    /// Fetches one page and runs the field-extraction contract over it.
    pub async fn analyze_page(&self, url: &str) -> Result<PageAudit> {
        log::info!("Analyzing {url}");
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let status_code = response.status().as_u16();
        let encoding = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|ct| ct.split("charset=").nth(1))
            .map(|charset| charset.trim_matches('"').to_string());

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {url}"))?;
        let response_time = start.elapsed().as_secs_f64();

        let analysis = analyze_document(&body, &self.domain);

        Ok(PageAudit {
            url: url.to_string(),
            status_code,
            response_time,
            page_size: body.len(),
            encoding,
            analysis,
        })
    }

    async fn audit_page(&self, url: &str) -> PageOutcome {
        match self.analyze_page(url).await {
            Ok(audit) => PageOutcome::Audit(Box::new(audit)),
            Err(e) => {
                log::warn!("Page audit failed for {url}: {e:#}");
                PageOutcome::Error {
                    url: url.to_string(),
                    error: format!("{e:#}"),
                }
            }
        }
    }

    /// Probes `robots.txt`; any failure reads as absence.
    pub async fn check_robots_txt(&self) -> RobotsTxt {
        let robots_url = format!("https://{}/robots.txt", self.domain);
        let response = self
            .client
            .get(&robots_url)
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(content) => RobotsTxt {
                    exists: true,
                    content: Some(content),
                },
                Err(e) => {
                    log::warn!("Failed to read robots.txt body: {e}");
                    RobotsTxt {
                        exists: false,
                        content: None,
                    }
                }
            },
            Ok(resp) => {
                log::debug!("robots.txt probe returned {}", resp.status());
                RobotsTxt {
                    exists: false,
                    content: None,
                }
            }
            Err(e) => {
                log::warn!("robots.txt probe failed: {e}");
                RobotsTxt {
                    exists: false,
                    content: None,
                }
            }
        }
    }

    /// Probes the fixed sitemap candidate list; only hits are recorded.
    pub async fn check_sitemaps(&self) -> Vec<SitemapProbe> {
        let mut sitemaps = Vec::new();
        for candidate in SITEMAP_CANDIDATES {
            let sitemap_url = format!("https://{}/{}", self.domain, candidate);
            let response = self
                .client
                .get(&sitemap_url)
                .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
                .send()
                .await;

            let Ok(resp) = response else {
                log::debug!("Sitemap candidate {sitemap_url} unreachable");
                continue;
            };
            if !resp.status().is_success() {
                continue;
            }
            let Ok(body) = resp.text().await else {
                continue;
            };

            sitemaps.push(SitemapProbe {
                url: sitemap_url,
                exists: true,
                size: body.len(),
                url_count: count_sitemap_urls(&body),
            });
        }
        sitemaps
    }

    /// Probes the TLS certificate on port 443.
    pub async fn check_ssl(&self) -> SslReport {
        match tls::get_certificate_info(&self.domain).await {
            Ok(cert) => cert.into(),
            Err(e) => {
                log::warn!("TLS probe failed for {}: {e:#}", self.domain);
                SslReport::disabled()
            }
        }
    }

    /// Resolves A, MX, and TXT records. A failed A lookup fails the probe;
    /// MX and TXT degrade to empty lists on their own failures.
    pub async fn check_dns(&self) -> DnsReport {
        let a_records = match dns::lookup_a_records(&self.domain, &self.resolver).await {
            Ok(records) => records,
            Err(e) => {
                return DnsReport::Error {
                    error: format!("{e:#}"),
                };
            }
        };

        let mx_records = dns::lookup_mx_records(&self.domain, &self.resolver)
            .await
            .unwrap_or_default();
        let txt_records = dns::lookup_txt_records(&self.domain, &self.resolver)
            .await
            .unwrap_or_default();

        DnsReport::Records {
            a_records,
            mx_records,
            txt_records,
        }
    }

    /// Looks up the domain registration over WHOIS.
    pub async fn check_domain_info(&self) -> DomainReport {
        match whois::lookup(&self.domain).await {
            Ok(result) => result.into(),
            Err(e) => {
                log::warn!("WHOIS lookup failed for {}: {e:#}", self.domain);
                DomainReport::Error {
                    error: format!("{e:#}"),
                }
            }
        }
    }

    /// Audits the fixed subpage list, politely spaced.
    pub async fn analyze_additional_pages(&self) -> Vec<PageOutcome> {
        let mut results = Vec::with_capacity(SUBPAGE_PATHS.len());
        for (i, path) in SUBPAGE_PATHS.iter().enumerate() {
            let url = format!("https://{}{}", self.domain, path);
            results.push(self.audit_page(&url).await);
            if i + 1 < SUBPAGE_PATHS.len() {
                tokio::time::sleep(SUBPAGE_DELAY).await;
            }
        }
        results
    }

    /// Runs every probe in sequence and merges the results.
    pub async fn run_full_analysis(&self) -> SeoReport {
        log::info!("Starting comprehensive SEO analysis of {}", self.url);

        let homepage_analysis = self.audit_page(&self.url).await;
        let robots_txt = self.check_robots_txt().await;
        let sitemaps = self.check_sitemaps().await;
        let ssl_certificate = self.check_ssl().await;
        let dns_records = self.check_dns().await;
        let domain_info = self.check_domain_info().await;

        log::info!("Analyzing additional pages");
        let additional_pages = self.analyze_additional_pages().await;

        SeoReport {
            timestamp: chrono::Local::now().to_rfc3339(),
            domain: self.domain.clone(),
            homepage_analysis,
            robots_txt,
            sitemaps,
            ssl_certificate,
            dns_records,
            domain_info,
            additional_pages,
        }
    }
}

/// Counts `<loc>` entries in a sitemap body, when it parses as XML.
fn count_sitemap_urls(content: &str) -> Option<usize> {
    let document = roxmltree::Document::parse(content).ok()?;
    Some(
        document
            .descendants()
            .filter(|node| node.has_tag_name("loc"))
            .count(),
    )
}

/// Runs the `seo` pipeline: full analysis, JSON artifact, console summary.
pub async fn run(url: &str, output: &Path) -> Result<()> {
    let analyzer = SeoAnalyzer::new(url)?;
    let report = analyzer.run_full_analysis().await;

    let rendered =
        serde_json::to_string_pretty(&report).context("Failed to serialize SEO report")?;
    fs::write(output, &rendered)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "\nAnalysis complete! Report saved to {}",
        output.display().to_string().green()
    );

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &SeoReport) {
    println!("\n{}", "=== SUMMARY ===".bold());
    match &report.homepage_analysis {
        PageOutcome::Audit(home) => {
            let analysis = &home.analysis;
            println!("Title: {}", analysis.title.as_deref().unwrap_or("-"));
            println!("Title Length: {} chars", analysis.title_length);
            let description_length = analysis
                .meta_tags
                .get("description")
                .map_or(0, |d| d.chars().count());
            println!("Meta Description Length: {description_length} chars");
            println!("H1 Tags: {}", analysis.h1.len());
            println!(
                "Images without ALT: {} / {}",
                analysis.images_without_alt, analysis.total_images
            );
        }
        PageOutcome::Error { url, error } => {
            println!("{}", format!("Homepage analysis failed for {url}: {error}").red());
        }
    }
    println!("SSL: {}", report.ssl_certificate.ssl_enabled);
    println!("Robots.txt: {}", report.robots_txt.exists);
    println!("Sitemaps found: {}", report.sitemaps.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_sitemap_urls() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <url><loc>https://example.com/</loc></url>
                <url><loc>https://example.com/a</loc></url>
                <url><loc>https://example.com/b</loc></url>
            </urlset>"#;
        assert_eq!(count_sitemap_urls(xml), Some(3));
    }

    #[test]
    fn test_count_sitemap_urls_non_xml() {
        assert_eq!(count_sitemap_urls("<html>not a sitemap"), None);
    }

    #[test]
    fn test_dns_report_error_shape() {
        let report = DnsReport::Error {
            error: "request timed out".to_string(),
        };
        let rendered = serde_json::to_value(&report).unwrap();
        assert_eq!(rendered["error"].as_str(), Some("request timed out"));
        assert!(rendered.get("a_records").is_none());
    }

    #[test]
    fn test_ssl_report_disabled_omits_details() {
        let rendered = serde_json::to_value(SslReport::disabled()).unwrap();
        assert_eq!(rendered["ssl_enabled"].as_bool(), Some(false));
        assert!(rendered.get("issuer").is_none());
    }

    #[test]
    fn test_page_outcome_error_shape() {
        let outcome = PageOutcome::Error {
            url: "https://example.com/kontakt".to_string(),
            error: "Request to https://example.com/kontakt failed".to_string(),
        };
        let rendered = serde_json::to_value(&outcome).unwrap();
        assert_eq!(rendered["url"].as_str(), Some("https://example.com/kontakt"));
        assert!(rendered.get("status_code").is_none());
    }
}
