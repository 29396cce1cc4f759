//! HTTP header names and the browser-emulating request header set.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};

// Security header names inspected by the performance checker
/// HTTP Strict Transport Security header
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "Strict-Transport-Security";
/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "X-Frame-Options";
/// X-XSS-Protection header
pub const HEADER_X_XSS_PROTECTION: &str = "X-XSS-Protection";
/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";

// Caching header names
/// Cache-Control header
pub const HEADER_CACHE_CONTROL: &str = "Cache-Control";
/// Expires header
pub const HEADER_EXPIRES: &str = "Expires";
/// ETag header
pub const HEADER_ETAG: &str = "ETag";
/// Last-Modified header
pub const HEADER_LAST_MODIFIED: &str = "Last-Modified";

// CDN/proxy identification
/// CF-Ray header (Cloudflare request ID)
pub const HEADER_CF_RAY: &str = "CF-Ray";
/// X-Amz-Cf-Id header (CloudFront request ID)
pub const HEADER_X_AMZ_CF_ID: &str = "X-Amz-Cf-Id";
/// X-Served-By header (Fastly server identification)
pub const HEADER_X_SERVED_BY: &str = "X-Served-By";

/// Headers whose mere presence marks a CDN in front of the origin.
pub const CDN_HEADERS: &[&str] = &[HEADER_CF_RAY, HEADER_X_AMZ_CF_ID, HEADER_X_SERVED_BY];

/// `Server` value substrings that mark a CDN.
pub const CDN_SERVER_MARKERS: &[&str] = &["cloudflare", "fastly", "akamai"];

/// Accept-Encoding value advertised by the transfer-signal probe client.
pub const PROBE_ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// Builds the fixed browser-emulating header set sent with page requests.
///
/// Emulates a desktop browser with German as the preferred language. The
/// User-Agent is configured separately on the client builder;
/// Accept-Encoding is left to the client so response bodies arrive
/// decompressed.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("de-DE,de;q=0.9,en;q=0.8"),
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        "Upgrade-Insecure-Requests",
        HeaderValue::from_static("1"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_headers_language_preference() {
        let headers = browser_headers();
        let lang = headers.get(ACCEPT_LANGUAGE).unwrap().to_str().unwrap();
        assert!(lang.starts_with("de-DE"));
    }

    #[test]
    fn test_browser_headers_leave_encoding_to_client() {
        let headers = browser_headers();
        assert!(headers.get(reqwest::header::ACCEPT_ENCODING).is_none());
    }
}
