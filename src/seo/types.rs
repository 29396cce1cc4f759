//! Report shapes for the composite SEO analysis.
//!
//! Probe slots that can fail serialize as either their data or an
//! error-shaped object (`{"error": ...}` / `{"ssl_enabled": false}`), so a
//! report always completes with partial data.

use serde::Serialize;

use crate::html::PageAnalysis;
use crate::tls::CertificateInfo;
use crate::whois::WhoisResult;

/// The combined, timestamped report of one `seo` run.
#[derive(Debug, Serialize)]
pub struct SeoReport {
    pub timestamp: String,
    pub domain: String,
    pub homepage_analysis: PageOutcome,
    pub robots_txt: RobotsTxt,
    pub sitemaps: Vec<SitemapProbe>,
    pub ssl_certificate: SslReport,
    pub dns_records: DnsReport,
    pub domain_info: DomainReport,
    pub additional_pages: Vec<PageOutcome>,
}

/// A page audit, or the error that prevented it.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PageOutcome {
    Audit(Box<PageAudit>),
    Error { url: String, error: String },
}

/// One page's extraction result wrapped with its HTTP envelope.
#[derive(Debug, Serialize)]
pub struct PageAudit {
    pub url: String,
    pub status_code: u16,
    /// Wall-clock seconds for the request including body transfer
    pub response_time: f64,
    /// Body size in bytes
    pub page_size: usize,
    /// Charset declared in the Content-Type header
    pub encoding: Option<String>,
    #[serde(flatten)]
    pub analysis: PageAnalysis,
}

/// robots.txt probe result.
#[derive(Debug, Serialize)]
pub struct RobotsTxt {
    pub exists: bool,
    pub content: Option<String>,
}

/// One discovered sitemap candidate.
#[derive(Debug, Serialize)]
pub struct SitemapProbe {
    pub url: String,
    pub exists: bool,
    /// Body size in bytes
    pub size: usize,
    /// Number of `<loc>` entries, when the body parses as XML
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_count: Option<usize>,
}

/// TLS certificate probe result.
#[derive(Debug, Serialize)]
pub struct SslReport {
    pub ssl_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

impl SslReport {
    pub fn disabled() -> Self {
        SslReport {
            ssl_enabled: false,
            tls_version: None,
            subject: None,
            issuer: None,
            valid_from: None,
            expires: None,
        }
    }
}

impl From<CertificateInfo> for SslReport {
    fn from(cert: CertificateInfo) -> Self {
        SslReport {
            ssl_enabled: true,
            tls_version: cert.tls_version,
            subject: Some(cert.subject),
            issuer: Some(cert.issuer),
            valid_from: Some(cert.valid_from.format("%Y-%m-%d %H:%M:%S").to_string()),
            expires: Some(cert.valid_to.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

/// DNS probe result: resolved records, or the error that stopped the
/// primary (A record) lookup. MX and TXT are independently optional and
/// degrade to empty lists.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DnsReport {
    Records {
        a_records: Vec<String>,
        mx_records: Vec<String>,
        txt_records: Vec<String>,
    },
    Error {
        error: String,
    },
}

/// WHOIS probe result.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DomainReport {
    Info {
        registrar: Option<String>,
        creation_date: Option<String>,
        expiration_date: Option<String>,
        name_servers: Vec<String>,
    },
    Error {
        error: String,
    },
}

impl From<WhoisResult> for DomainReport {
    fn from(whois: WhoisResult) -> Self {
        DomainReport::Info {
            registrar: whois.registrar,
            creation_date: whois.creation_date.map(|dt| dt.to_rfc3339()),
            expiration_date: whois.expiration_date.map(|dt| dt.to_rfc3339()),
            name_servers: whois.name_servers,
        }
    }
}
