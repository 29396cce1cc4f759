//! TLS certificate probe.
//!
//! Connects to port 443, completes a rustls handshake, and parses the leaf
//! certificate with `x509-parser` to report subject, issuer, the validity
//! window, and the negotiated TLS version.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDateTime;
use rustls::pki_types::ServerName;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::config::{TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};

/// Certificate details extracted from a completed handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// Negotiated TLS protocol version
    pub tls_version: Option<String>,
    /// Certificate subject distinguished name
    pub subject: String,
    /// Certificate issuer distinguished name
    pub issuer: String,
    /// Start of the validity window
    pub valid_from: NaiveDateTime,
    /// End of the validity window (expiry)
    pub valid_to: NaiveDateTime,
}

/// Retrieves TLS certificate information for a domain.
///
/// # Errors
///
/// Returns an error if the domain name is invalid, the TCP connection or
/// TLS handshake fails or times out, or the certificate cannot be parsed.
pub async fn get_certificate_info(domain: &str) -> Result<CertificateInfo> {
    log::debug!("Probing TLS certificate for {domain}");

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(domain.to_string())
        .map_err(|e| anyhow::anyhow!("Invalid domain name: {}", e))?;

    let sock = match tokio::time::timeout(
        std::time::Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((domain, 443)),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => {
            return Err(anyhow::anyhow!("Failed to connect to {}:443 - {}", domain, e));
        }
        Err(_) => {
            return Err(anyhow::anyhow!(
                "TCP connection timeout for {}:443 ({}s)",
                domain,
                TCP_CONNECT_TIMEOUT_SECS
            ));
        }
    };

    let connector = TlsConnector::from(Arc::new(config));
    let tls_stream = match tokio::time::timeout(
        std::time::Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return Err(anyhow::anyhow!("TLS handshake failed for {}: {}", domain, e));
        }
        Err(_) => {
            return Err(anyhow::anyhow!(
                "TLS handshake timeout for {} ({}s)",
                domain,
                TLS_HANDSHAKE_TIMEOUT_SECS
            ));
        }
    };

    let (_, session) = tls_stream.get_ref();

    let tls_version = session.protocol_version().map(|v| format!("{v:?}"));

    let certs = session
        .peer_certificates()
        .ok_or_else(|| anyhow::anyhow!("No peer certificates presented by {}", domain))?;
    let cert = certs
        .first()
        .ok_or_else(|| anyhow::anyhow!("Empty certificate chain from {}", domain))?;

    let (_, cert) = x509_parser::parse_x509_certificate(cert.as_ref())?;
    let tbs_cert = &cert.tbs_certificate;

    let subject = tbs_cert.subject.to_string();
    let issuer = tbs_cert.issuer.to_string();

    let valid_from_str = tbs_cert
        .validity
        .not_before
        .to_rfc2822()
        .map_err(|e| anyhow::anyhow!("RFC2822 conversion error for not_before: {}", e))?;
    let valid_from = NaiveDateTime::parse_from_str(&valid_from_str, "%a, %d %b %Y %H:%M:%S %z")
        .map_err(|_| anyhow::anyhow!("Failed to parse not_before"))?;

    let valid_to_str = tbs_cert
        .validity
        .not_after
        .to_rfc2822()
        .map_err(|e| anyhow::anyhow!("RFC2822 conversion error for not_after: {}", e))?;
    let valid_to = NaiveDateTime::parse_from_str(&valid_to_str, "%a, %d %b %Y %H:%M:%S %z")
        .map_err(|_| anyhow::anyhow!("Failed to parse not_after"))?;

    log::debug!("Certificate for {domain}: issuer {issuer}, expires {valid_to}");

    Ok(CertificateInfo {
        tls_version,
        subject,
        issuer,
        valid_from,
        valid_to,
    })
}
