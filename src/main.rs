//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_audit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Crypto provider setup for the TLS probe
//! - Dispatch to the selected pipeline
//!
//! All pipelines are implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use site_audit::config::{
    LogFormat, LogLevel, DEFAULT_HTML_REPORT, DEFAULT_PAGE_FILE, DEFAULT_PDF_REPORT,
    DEFAULT_PERFORMANCE_REPORT, DEFAULT_REPORTS_DIR, DEFAULT_SEO_REPORT, DEFAULT_TARGET_URL,
    PAGESPEED_API_KEY_ENV,
};
use site_audit::initialization::{init_crypto_provider, init_logger_with};

#[derive(Parser)]
#[command(
    name = "site_audit",
    version,
    about = "Sequential SEO and performance audit scripts for a single website"
)]
struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the homepage, dump the response, and save the body
    Fetch {
        /// Target URL
        #[arg(default_value = DEFAULT_TARGET_URL)]
        url: String,
        /// File the raw body is written to
        #[arg(long, default_value = DEFAULT_PAGE_FILE)]
        output: PathBuf,
    },
    /// Analyze a previously fetched HTML file
    Html {
        /// Saved HTML document
        #[arg(default_value = DEFAULT_PAGE_FILE)]
        input: PathBuf,
        /// Site URL the document was fetched from (drives the link partition)
        #[arg(long, default_value = DEFAULT_TARGET_URL)]
        base_url: String,
        /// JSON report path
        #[arg(long, default_value = DEFAULT_HTML_REPORT)]
        output: PathBuf,
    },
    /// Measure latency, transfer signals, and PageSpeed scores
    Performance {
        /// Target URL
        #[arg(default_value = DEFAULT_TARGET_URL)]
        url: String,
        /// PageSpeed API key (falls back to $PAGESPEED_API_KEY; unkeyed
        /// requests work at a lower quota)
        #[arg(long)]
        api_key: Option<String>,
        /// Skip the PageSpeed Insights calls
        #[arg(long)]
        skip_pagespeed: bool,
        /// JSON report path
        #[arg(long, default_value = DEFAULT_PERFORMANCE_REPORT)]
        output: PathBuf,
    },
    /// Run the full SEO analysis (page audits plus external probes)
    Seo {
        /// Target URL
        #[arg(default_value = DEFAULT_TARGET_URL)]
        url: String,
        /// JSON report path
        #[arg(long, default_value = DEFAULT_SEO_REPORT)]
        output: PathBuf,
    },
    /// Assemble the authored markdown reports into a styled PDF
    Report {
        /// Directory containing the markdown sections
        #[arg(long, default_value = DEFAULT_REPORTS_DIR)]
        dir: PathBuf,
        /// Site label shown on the cover page (defaults to the audit target)
        #[arg(long)]
        site: Option<String>,
        /// PDF output path
        #[arg(long, default_value = DEFAULT_PDF_REPORT)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())?;
    init_crypto_provider();

    let result = match cli.command {
        Command::Fetch { url, output } => site_audit::fetch::run(&url, &output).await,
        Command::Html {
            input,
            base_url,
            output,
        } => site_audit::html::run(&input, &base_url, &output),
        Command::Performance {
            url,
            api_key,
            skip_pagespeed,
            output,
        } => {
            let api_key = api_key.or_else(|| std::env::var(PAGESPEED_API_KEY_ENV).ok());
            site_audit::performance::run(&url, api_key.as_deref(), skip_pagespeed, &output).await
        }
        Command::Seo { url, output } => site_audit::seo::run(&url, &output).await,
        Command::Report { dir, site, output } => {
            let site_label =
                site.unwrap_or_else(|| site_audit::html::domain_of(DEFAULT_TARGET_URL));
            site_audit::report::run(&dir, &site_label, &output).await
        }
    };

    if let Err(e) = result {
        eprintln!("site_audit error: {e:#}");
        process::exit(1);
    }
    Ok(())
}
