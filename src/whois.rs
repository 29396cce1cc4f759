//! WHOIS domain registration lookup.
//!
//! Queries WHOIS directly over TCP port 43: first the IANA root server to
//! discover the registry server for the TLD, then that server for the
//! domain itself. The free-text response is parsed leniently into
//! registrar, creation/expiration dates, and name servers; registries vary
//! widely in their key spelling and date formats.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::WHOIS_TIMEOUT_SECS;

const IANA_WHOIS_SERVER: &str = "whois.iana.org";

/// Registration details parsed from a WHOIS response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhoisResult {
    /// Registrar name
    pub registrar: Option<String>,
    /// Domain creation date
    pub creation_date: Option<DateTime<Utc>>,
    /// Domain expiration date
    pub expiration_date: Option<DateTime<Utc>>,
    /// Name servers listed in the registration
    pub name_servers: Vec<String>,
}

/// Performs a WHOIS lookup for a domain.
///
/// # Errors
///
/// Returns an error if neither the IANA root server nor the referred
/// registry server can be queried.
pub async fn lookup(domain: &str) -> Result<WhoisResult> {
    // Registrations live under the registrable domain, not the host name
    let domain = domain.strip_prefix("www.").unwrap_or(domain);

    log::info!("Starting WHOIS lookup for domain: {domain}");
    let referral_response = query_server(IANA_WHOIS_SERVER, domain)
        .await
        .context("IANA WHOIS query failed")?;

    let raw = match find_referral(&referral_response) {
        Some(server) if server != IANA_WHOIS_SERVER => {
            log::debug!("Following WHOIS referral to {server}");
            query_server(&server, domain)
                .await
                .with_context(|| format!("WHOIS query to {server} failed"))?
        }
        _ => referral_response,
    };

    Ok(parse_response(&raw))
}

/// Sends one query to a WHOIS server and reads the full response.
async fn query_server(server: &str, domain: &str) -> Result<String> {
    let timeout = Duration::from_secs(WHOIS_TIMEOUT_SECS);

    let mut stream = tokio::time::timeout(timeout, TcpStream::connect((server, 43)))
        .await
        .map_err(|_| anyhow::anyhow!("Connection timeout for {}:43", server))?
        .with_context(|| format!("Failed to connect to {server}:43"))?;

    stream
        .write_all(format!("{domain}\r\n").as_bytes())
        .await
        .with_context(|| format!("Failed to send query to {server}"))?;

    let mut raw = Vec::new();
    tokio::time::timeout(timeout, stream.read_to_end(&mut raw))
        .await
        .map_err(|_| anyhow::anyhow!("Read timeout from {}", server))?
        .with_context(|| format!("Failed to read response from {server}"))?;

    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Finds the registry server a root/registrar response refers to.
fn find_referral(raw: &str) -> Option<String> {
    raw.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let key = key.trim().to_ascii_lowercase();
        if key == "refer" || key == "whois" || key == "registrar whois server" {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

/// Parses the key/value lines of a WHOIS response.
fn parse_response(raw: &str) -> WhoisResult {
    let mut result = WhoisResult::default();

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "registrar" | "registrar name" | "sponsoring registrar" => {
                result.registrar.get_or_insert_with(|| value.to_string());
            }
            "creation date" | "created" | "registered" | "registered on" => {
                if result.creation_date.is_none() {
                    result.creation_date = parse_date_string(value);
                }
            }
            "registry expiry date" | "expiry date" | "expiration date" | "expires"
            | "paid-till" => {
                if result.expiration_date.is_none() {
                    result.expiration_date = parse_date_string(value);
                }
            }
            "name server" | "nserver" | "nameserver" => {
                // Some registries append IP addresses after the hostname
                if let Some(host) = value.split_whitespace().next() {
                    let host = host.to_ascii_lowercase();
                    if !result.name_servers.contains(&host) {
                        result.name_servers.push(host);
                    }
                }
            }
            _ => {}
        }
    }

    result
}

/// Attempts to parse a date string in the formats registries actually use.
fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%d-%b-%Y",
        "%d/%m/%Y",
        "%Y.%m.%d",
    ];

    for format in &formats {
        if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_referral_iana() {
        let raw = "\
% IANA WHOIS server

domain:       DE
organisation: DENIC eG
whois:        whois.denic.de
status:       ACTIVE
";
        assert_eq!(find_referral(raw), Some("whois.denic.de".to_string()));
    }

    #[test]
    fn test_find_referral_refer_key() {
        let raw = "refer:        whois.verisign-grs.com\ndomain:       COM\n";
        assert_eq!(find_referral(raw), Some("whois.verisign-grs.com".to_string()));
    }

    #[test]
    fn test_find_referral_absent() {
        assert_eq!(find_referral("domain: EXAMPLE\nstatus: ACTIVE\n"), None);
    }

    #[test]
    fn test_parse_response_registry_style() {
        let raw = "\
Domain Name: EXAMPLE.COM
Registry Domain ID: 2336799_DOMAIN_COM-VRSN
Registrar WHOIS Server: whois.iana.org
Registrar: RESERVED-Internet Assigned Numbers Authority
Creation Date: 1995-08-14T04:00:00Z
Registry Expiry Date: 2026-08-13T04:00:00Z
Name Server: A.IANA-SERVERS.NET
Name Server: B.IANA-SERVERS.NET
";
        let result = parse_response(raw);
        assert_eq!(
            result.registrar.as_deref(),
            Some("RESERVED-Internet Assigned Numbers Authority")
        );
        assert_eq!(
            result.creation_date.unwrap().format("%Y-%m-%d").to_string(),
            "1995-08-14"
        );
        assert_eq!(
            result.expiration_date.unwrap().format("%Y-%m-%d").to_string(),
            "2026-08-13"
        );
        assert_eq!(
            result.name_servers,
            vec!["a.iana-servers.net", "b.iana-servers.net"]
        );
    }

    #[test]
    fn test_parse_response_nserver_with_addresses() {
        let raw = "\
Domain: example.de
Nserver: ns1.example.de 192.0.2.1
Nserver: ns2.example.de
Changed: 2020-03-04T09:00:00+01:00
";
        let result = parse_response(raw);
        assert_eq!(result.name_servers, vec!["ns1.example.de", "ns2.example.de"]);
        assert!(result.registrar.is_none());
    }

    #[test]
    fn test_parse_response_keeps_first_registrar() {
        let raw = "Registrar: First GmbH\nRegistrar: Second Ltd\n";
        let result = parse_response(raw);
        assert_eq!(result.registrar.as_deref(), Some("First GmbH"));
    }

    #[test]
    fn test_parse_date_string_iso8601() {
        let dt = parse_date_string("2024-01-15T10:30:45Z").unwrap();
        assert!(dt.format("%Y-%m-%d").to_string().starts_with("2024-01-15"));
    }

    #[test]
    fn test_parse_date_string_date_only() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_parse_date_string_dd_mmm_yyyy() {
        let dt = parse_date_string("15-Jan-2024").unwrap();
        assert!(dt.format("%Y-%m-%d").to_string().starts_with("2024-01-15"));
    }

    #[test]
    fn test_parse_date_string_invalid() {
        assert!(parse_date_string("not a date").is_none());
        assert!(parse_date_string("").is_none());
    }
}
