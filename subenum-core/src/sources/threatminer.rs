//! Threat intelligence aggregator (ThreatMiner, subdomain report `rt=5`).

use serde::Deserialize;

use super::{from_json_object, ResultSet};
use crate::error::Result;
use crate::validation::accept_candidate;

#[derive(Debug, Deserialize)]
struct ThreatMinerResponse {
    #[serde(default)]
    results: Vec<ThreatMinerEntry>,
}

/// The subdomain report lists bare hostnames; other report types wrap them
/// in objects. Both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThreatMinerEntry {
    Hostname(String),
    Record {
        #[serde(default)]
        hostname: Option<String>,
    },
}

impl ThreatMinerEntry {
    fn hostname(&self) -> Option<&str> {
        match self {
            ThreatMinerEntry::Hostname(hostname) => Some(hostname),
            ThreatMinerEntry::Record { hostname } => hostname.as_deref(),
        }
    }
}

/// Parse `{"results": [...]}`.
pub(crate) fn parse(body: &str, domain: &str) -> Result<ResultSet> {
    let response: ThreatMinerResponse = from_json_object(body)?;

    Ok(response
        .results
        .iter()
        .filter_map(ThreatMinerEntry::hostname)
        .filter_map(|hostname| accept_candidate(hostname, domain))
        .collect())
}
