//! Application initialization and resource setup.
//!
//! Provides constructors for the resources a pipeline holds for its whole
//! run: the logger, the HTTP clients, the DNS resolver, and the process-wide
//! rustls crypto provider.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use hickory_resolver::TokioAsyncResolver;
use log::LevelFilter;
use reqwest::header::{HeaderValue, ACCEPT_ENCODING};
use reqwest::ClientBuilder;
use rustls::crypto::{ring::default_provider, CryptoProvider};

use crate::config::{
    browser_headers, LogFormat, DEFAULT_USER_AGENT, DNS_TIMEOUT_SECS, PROBE_ACCEPT_ENCODING,
};
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` reading `RUST_LOG` first, then overriding with
/// the CLI-provided level. Supports plain text (with colors) and JSON line
/// formats. Noisy third-party modules are filtered down.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    // hickory logs a warning for every malformed UDP response it recovers from
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("headless_chrome", LevelFilter::Warn);
    builder.filter_module("site_audit", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };
                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so tests may initialize more than once without panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Initializes the HTTP client used for page fetches and audits.
///
/// Configured with the browser-emulating header set, a desktop User-Agent,
/// cookie storage, and the given timeout. Response bodies arrive
/// decompressed.
pub fn init_client(timeout_secs: u64) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(DEFAULT_USER_AGENT)
        .default_headers(browser_headers())
        .cookie_store(true)
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the transfer-signal probe client.
///
/// Advertises `Accept-Encoding` explicitly and disables automatic
/// decompression so the response keeps its `Content-Encoding` header and
/// its on-the-wire body size; both are inputs to the performance report.
pub fn init_probe_client(timeout_secs: u64) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut headers = browser_headers();
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(PROBE_ACCEPT_ENCODING));
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(DEFAULT_USER_AGENT)
        .default_headers(headers)
        .no_gzip()
        .no_brotli()
        .no_deflate()
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the DNS resolver for record lookups.
///
/// Uses the default resolver configuration with a short query timeout and
/// reduced retry attempts so unresponsive DNS servers fail fast. `ndots` is
/// zeroed to prevent search-domain appending.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}

/// Initializes the crypto provider for TLS operations.
///
/// Must be called before the certificate probe opens a connection.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
