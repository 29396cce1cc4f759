//! site_audit library: sequential SEO and performance audit pipelines for a
//! single website.
//!
//! Each pipeline is an independent, strictly sequential run: fetch the
//! page, probe the third parties it depends on, and write one artifact into
//! the working directory.
//!
//! - [`fetch`]: one browser-emulating GET, dumped and saved verbatim
//! - [`html`]: SEO field extraction over a previously saved document
//! - [`performance`]: latency samples, transfer signals, PageSpeed scores
//! - [`seo`]: the composite analyzer (pages + robots/sitemap/TLS/DNS/WHOIS)
//! - [`report`]: authored markdown sections assembled into a styled PDF
//!
//! There is no shared state between pipelines beyond those artifacts, and
//! nothing runs concurrently; fixed politeness pauses pace repeated
//! requests.
//!
//! # Example
//!
//! ```no_run
//! use site_audit::seo::SeoAnalyzer;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = SeoAnalyzer::new("https://www.example.com")?;
//! let report = analyzer.run_full_analysis().await;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod fetch;
pub mod html;
pub mod initialization;
pub mod performance;
pub mod report;
pub mod seo;
pub mod tls;
pub mod whois;

pub use config::{LogFormat, LogLevel};
pub use html::{analyze_document, PageAnalysis};
pub use seo::{SeoAnalyzer, SeoReport};
