//! Certificate transparency log search (crt.sh).

use serde::Deserialize;

use super::ResultSet;
use crate::error::Result;
use crate::validation::accept_candidate;

/// One logged certificate. `name_value` holds every SAN, newline separated.
#[derive(Debug, Deserialize)]
struct CertificateEntry {
    #[serde(default)]
    name_value: Option<String>,
}

/// Parse a JSON array of certificate entries.
pub(crate) fn parse(body: &str, domain: &str) -> Result<ResultSet> {
    let entries: Vec<CertificateEntry> = serde_json::from_str(body)?;

    Ok(entries
        .iter()
        .filter_map(|entry| entry.name_value.as_deref())
        .flat_map(str::lines)
        .filter_map(|line| accept_candidate(line, domain))
        .collect())
}
