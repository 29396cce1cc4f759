//! DNS record queries (A, MX, TXT).
//!
//! The A-record lookup is the primary probe: its failure is reported by the
//! caller. MX and TXT are independently optional; for all three, an answer
//! of "no records" is an empty vector, not an error, so only real failures
//! (timeouts, network errors) propagate.

use anyhow::{Error, Result};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

fn is_no_records(error_msg: &str) -> bool {
    error_msg.contains("no records found") || error_msg.contains("NXDomain")
}

/// Queries A (address) records for a domain.
pub async fn lookup_a_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, Error> {
    match resolver.lookup(domain, RecordType::A).await {
        Ok(lookup) => {
            let addresses: Vec<String> = lookup
                .iter()
                .filter_map(|rdata| {
                    if let RData::A(a) = rdata {
                        Some(a.to_string())
                    } else {
                        None
                    }
                })
                .collect();
            Ok(addresses)
        }
        Err(e) => {
            if is_no_records(&e.to_string()) {
                Ok(Vec::new())
            } else {
                log::warn!("Failed to lookup A records for {domain}: {e}");
                Err(e.into())
            }
        }
    }
}

/// Queries MX (mail exchanger) records for a domain.
///
/// Returns exchange hostnames sorted by priority (lower preference first).
pub async fn lookup_mx_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, Error> {
    match resolver.lookup(domain, RecordType::MX).await {
        Ok(lookup) => {
            let mut mx_records: Vec<(u16, String)> = lookup
                .iter()
                .filter_map(|rdata| {
                    if let RData::MX(mx) = rdata {
                        Some((mx.preference(), mx.exchange().to_utf8()))
                    } else {
                        None
                    }
                })
                .collect();
            mx_records.sort_by_key(|(priority, _)| *priority);
            Ok(mx_records.into_iter().map(|(_, exchange)| exchange).collect())
        }
        Err(e) => {
            if is_no_records(&e.to_string()) {
                Ok(Vec::new())
            } else {
                log::warn!("Failed to lookup MX records for {domain}: {e}");
                Err(e.into())
            }
        }
    }
}

/// Queries TXT (text) records for a domain.
pub async fn lookup_txt_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, Error> {
    match resolver.lookup(domain, RecordType::TXT).await {
        Ok(lookup) => {
            let txt_records: Vec<String> = lookup
                .iter()
                .filter_map(|rdata| {
                    if let RData::TXT(txt) = rdata {
                        // TXT records can contain multiple strings - join them
                        Some(
                            txt.iter()
                                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                                .collect::<Vec<String>>()
                                .join(""),
                        )
                    } else {
                        None
                    }
                })
                .collect();
            Ok(txt_records)
        }
        Err(e) => {
            if is_no_records(&e.to_string()) {
                Ok(Vec::new())
            } else {
                log::warn!("Failed to lookup TXT records for {domain}: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_no_records_matches_resolver_phrasing() {
        assert!(is_no_records("no records found for Query { name: ... }"));
        assert!(is_no_records("NXDomain response"));
        assert!(!is_no_records("request timed out"));
        assert!(!is_no_records("connection refused"));
    }
}
