//! Host search aggregator (HackerTarget).

use super::registry::{self, SourceId};
use super::ResultSet;
use crate::error::{Result, SubenumError};
use crate::validation::accept_candidate;

/// Sentinel HackerTarget returns with a 200 when it knows nothing.
const NO_RESULTS_SENTINEL: &str = "No results";

/// Parse `hostname,address` lines. Plain-text error lines fail the
/// subdomain check and are dropped.
pub(crate) fn parse(body: &str, domain: &str) -> Result<ResultSet> {
    if body.contains(NO_RESULTS_SENTINEL) {
        return Err(SubenumError::NoResults {
            source_name: registry::descriptor(SourceId::HackerTarget).name.to_string(),
        });
    }

    Ok(body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| line.split(',').next())
        .filter_map(|hostname| accept_candidate(hostname, domain))
        .collect())
}
