//! Performance checker: latency sampling, transfer signals, and PageSpeed
//! Insights scores.
//!
//! Three strictly sequential phases. Latency sampling and the transfer
//! probe hit the target site directly and terminate the run on failure;
//! PageSpeed failures are recorded per-strategy inside the report instead.

pub(crate) mod pagespeed;

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use reqwest::Version;
use serde::Serialize;

use crate::config::{
    CDN_HEADERS, CDN_SERVER_MARKERS, FETCH_TIMEOUT_SECS, HEADER_CACHE_CONTROL,
    HEADER_CONTENT_SECURITY_POLICY, HEADER_ETAG, HEADER_EXPIRES, HEADER_LAST_MODIFIED,
    HEADER_STRICT_TRANSPORT_SECURITY, HEADER_X_CONTENT_TYPE_OPTIONS, HEADER_X_FRAME_OPTIONS,
    HEADER_X_XSS_PROTECTION, LATENCY_SAMPLES, SAMPLE_DELAY,
};
use crate::initialization::{init_client, init_probe_client};

/// Latency statistics over the sequential request samples.
#[derive(Debug, Clone, Serialize)]
pub struct LatencyStats {
    /// Arithmetic mean of the sample durations in seconds
    pub avg_response_time: f64,
    /// Fastest sample in seconds
    pub min_response_time: f64,
    /// Slowest sample in seconds
    pub max_response_time: f64,
}

/// Computes mean/min/max over the collected samples.
pub fn summarize_latency(samples: &[f64]) -> LatencyStats {
    let count = samples.len().max(1) as f64;
    LatencyStats {
        avg_response_time: samples.iter().sum::<f64>() / count,
        min_response_time: samples.iter().copied().reduce(f64::min).unwrap_or(0.0),
        max_response_time: samples.iter().copied().reduce(f64::max).unwrap_or(0.0),
    }
}

/// Caching-related response headers, verbatim when present.
#[derive(Debug, Clone, Serialize)]
pub struct CacheHeaders {
    pub cache_control: Option<String>,
    pub expires: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

/// The fixed security header set, verbatim when present.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityHeaders {
    pub strict_transport_security: Option<String>,
    pub x_content_type_options: Option<String>,
    pub x_frame_options: Option<String>,
    pub x_xss_protection: Option<String>,
    pub content_security_policy: Option<String>,
}

/// Everything measured against the target site itself.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    #[serde(flatten)]
    pub latency: LatencyStats,
    /// On-the-wire body size of the probe response
    pub page_size_bytes: usize,
    pub page_size_kb: f64,
    /// Content-Encoding announced by the server, if any
    pub content_encoding: Option<String>,
    /// Whether gzip or brotli compression is in use
    pub uses_compression: bool,
    pub cache_headers: CacheHeaders,
    pub security_headers: SecurityHeaders,
    /// Negotiated HTTP protocol version
    pub http_version: String,
    /// Server identification string, if disclosed
    pub server: Option<String>,
    /// Heuristic: a CDN fronts the origin (header substring matches)
    pub cdn: bool,
}

/// Combined artifact written by the `performance` pipeline.
#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    pub performance_metrics: PerformanceMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagespeed_insights: Option<pagespeed::PagespeedReport>,
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn http_version_label(version: Version) -> String {
    match version {
        Version::HTTP_09 => "HTTP/0.9".to_string(),
        Version::HTTP_10 => "HTTP/1.0".to_string(),
        Version::HTTP_11 => "HTTP/1.1".to_string(),
        Version::HTTP_2 => "HTTP/2".to_string(),
        Version::HTTP_3 => "HTTP/3".to_string(),
        other => format!("{other:?}"),
    }
}

/// Derives the transfer signals from the probe response's headers, protocol
/// version, and body size.
pub(crate) fn transfer_signals(
    headers: &HeaderMap,
    version: Version,
    body_size: usize,
    latency: LatencyStats,
) -> PerformanceMetrics {
    let content_encoding = header_string(headers, "Content-Encoding");
    let uses_compression = content_encoding
        .as_deref()
        .is_some_and(|enc| enc.contains("gzip") || enc.contains("br"));

    let server = header_string(headers, "Server");
    let cdn = server
        .as_deref()
        .is_some_and(|s| {
            let s = s.to_ascii_lowercase();
            CDN_SERVER_MARKERS.iter().any(|marker| s.contains(marker))
        })
        || CDN_HEADERS.iter().any(|name| headers.contains_key(*name));

    PerformanceMetrics {
        latency,
        page_size_bytes: body_size,
        page_size_kb: body_size as f64 / 1024.0,
        content_encoding,
        uses_compression,
        cache_headers: CacheHeaders {
            cache_control: header_string(headers, HEADER_CACHE_CONTROL),
            expires: header_string(headers, HEADER_EXPIRES),
            etag: header_string(headers, HEADER_ETAG),
            last_modified: header_string(headers, HEADER_LAST_MODIFIED),
        },
        security_headers: SecurityHeaders {
            strict_transport_security: header_string(headers, HEADER_STRICT_TRANSPORT_SECURITY),
            x_content_type_options: header_string(headers, HEADER_X_CONTENT_TYPE_OPTIONS),
            x_frame_options: header_string(headers, HEADER_X_FRAME_OPTIONS),
            x_xss_protection: header_string(headers, HEADER_X_XSS_PROTECTION),
            content_security_policy: header_string(headers, HEADER_CONTENT_SECURITY_POLICY),
        },
        http_version: http_version_label(version),
        server,
        cdn,
    }
}

/// Runs the `performance` pipeline.
pub async fn run(
    url: &str,
    api_key: Option<&str>,
    skip_pagespeed: bool,
    output: &Path,
) -> Result<()> {
    let client = init_client(FETCH_TIMEOUT_SECS)?;

    log::info!("Sampling response times for {url} ({LATENCY_SAMPLES} requests)");
    let mut samples = Vec::with_capacity(LATENCY_SAMPLES);
    for i in 0..LATENCY_SAMPLES {
        let start = Instant::now();
        let response = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Latency sample {} to {url} failed", i + 1))?;
        // The body is part of the measured transfer
        response
            .bytes()
            .await
            .with_context(|| format!("Latency sample {} body read failed", i + 1))?;
        let elapsed = start.elapsed().as_secs_f64();
        log::debug!("Sample {}: {:.3}s", i + 1, elapsed);
        samples.push(elapsed);
        if i + 1 < LATENCY_SAMPLES {
            tokio::time::sleep(SAMPLE_DELAY).await;
        }
    }
    let latency = summarize_latency(&samples);

    log::info!("Reading transfer signals for {url}");
    let probe_client = init_probe_client(FETCH_TIMEOUT_SECS)?;
    let response = probe_client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Transfer probe to {url} failed"))?;
    let version = response.version();
    let headers = response.headers().clone();
    let body_size = response
        .bytes()
        .await
        .context("Transfer probe body read failed")?
        .len();

    let performance_metrics = transfer_signals(&headers, version, body_size, latency);

    let pagespeed_insights = if skip_pagespeed {
        log::info!("Skipping PageSpeed Insights");
        None
    } else {
        log::info!("Querying PageSpeed Insights (this may take a minute)");
        Some(pagespeed::check(url, api_key).await?)
    };

    let report = PerformanceReport {
        performance_metrics,
        pagespeed_insights,
    };

    let rendered =
        serde_json::to_string_pretty(&report).context("Failed to serialize performance report")?;
    println!("{rendered}");

    fs::write(output, &rendered)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Performance report written to {}", output.display());

    Ok(())
}
