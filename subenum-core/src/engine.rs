//! Concurrent multi-source aggregation
//!
//! One enumeration builds a single shared [`SourceClient`], runs every source
//! against it at once, waits for all of them, then merges on one task.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::output::EnumerationReport;
use crate::sources::{
    default_sources, ResultSet, Source, SourceClient, SourceId, SourceOutcome,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::validation::normalize_domain;

/// Called as each source finishes: `(completed, total, source)`.
pub type ProgressCallback = Box<dyn Fn(usize, usize, SourceId) + Send + Sync>;

/// What one source contributed to an enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: SourceId,
    #[serde(flatten)]
    pub outcome: SourceOutcome,
    pub duration_ms: u64,
}

/// Merged result of one enumeration plus the per-source outcomes behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enumeration {
    pub domain: String,
    /// Unique hostnames, sorted lexicographically
    pub subdomains: Vec<String>,
    /// One entry per source, in the order the sources were configured
    pub sources: Vec<SourceReport>,
}

impl Enumeration {
    pub fn is_empty(&self) -> bool {
        self.subdomains.is_empty()
    }

    pub fn degraded_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|r| r.outcome.is_degraded())
    }

    /// The user-facing view: domain and hostnames only.
    pub fn report(&self) -> EnumerationReport {
        EnumerationReport::new(self.domain.clone(), self.subdomains.clone())
    }
}

/// Runs every configured source against a domain and merges the results.
#[derive(Clone)]
pub struct SubdomainEnumerator {
    timeout: Duration,
    max_connections: usize,
    user_agent: String,
    sources: Vec<Arc<dyn Source>>,
}

impl fmt::Debug for SubdomainEnumerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubdomainEnumerator")
            .field("timeout", &self.timeout)
            .field("max_connections", &self.max_connections)
            .field("user_agent", &self.user_agent)
            .field(
                "sources",
                &self.sources.iter().map(|s| s.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for SubdomainEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SubdomainEnumerator {
    /// Enumerator over every registered source with default limits.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sources: default_sources(),
        }
    }

    /// Per-request timeout. Each source's single request is bounded by this
    /// independently; a slow source only loses its own contribution.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ceiling on concurrent outbound connections across all sources.
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the source list.
    pub fn with_sources(mut self, sources: Vec<Arc<dyn Source>>) -> Self {
        self.sources = sources;
        self
    }

    pub fn add_source(mut self, source: Arc<dyn Source>) -> Self {
        self.sources.push(source);
        self
    }

    /// Keep only the sources whose id is listed.
    pub fn with_source_filter(mut self, ids: &[SourceId]) -> Self {
        self.sources.retain(|source| ids.contains(&source.id()));
        self
    }

    pub fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    /// Sorted, unique subdomains of `domain` across all sources.
    pub async fn enumerate(&self, domain: &str) -> Result<Vec<String>> {
        Ok(self.scan(domain, None).await?.subdomains)
    }

    /// Enumerate and keep the per-source outcomes.
    ///
    /// Fails only when `domain` is invalid, before any request is made.
    /// Source failures degrade to empty contributions.
    #[instrument(skip(self, progress), fields(domain = %domain))]
    pub async fn scan(
        &self,
        domain: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<Enumeration> {
        let domain = normalize_domain(domain)?;
        let client = SourceClient::new(self.timeout, self.max_connections, &self.user_agent)?;

        let total = self.sources.len();
        let completed = AtomicUsize::new(0);

        debug!(
            sources = total,
            timeout_ms = self.timeout.as_millis() as u64,
            max_connections = self.max_connections,
            "Starting enumeration"
        );

        let futures: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let client = &client;
                let domain = domain.as_str();
                let completed = &completed;
                let progress = progress.as_ref();

                async move {
                    let start = Instant::now();
                    let outcome = source.fetch(client, domain).await;
                    let duration_ms = start.elapsed().as_millis() as u64;

                    let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(progress) = progress {
                        progress(count, total, source.id());
                    }

                    SourceReport {
                        source: source.id(),
                        outcome,
                        duration_ms,
                    }
                }
            })
            .collect();

        // Join barrier: merge only once every source has finished.
        let reports = join_all(futures).await;

        for report in &reports {
            match &report.outcome {
                SourceOutcome::Found { subdomains } => debug!(
                    source = %report.source,
                    found = subdomains.len(),
                    time_ms = report.duration_ms,
                    "Source contributed"
                ),
                SourceOutcome::Degraded { kind, reason } => debug!(
                    source = %report.source,
                    kind = ?kind,
                    reason = %reason,
                    time_ms = report.duration_ms,
                    "Source degraded"
                ),
            }
        }

        let subdomains = merge(reports.iter().filter_map(|r| r.outcome.subdomains()));
        debug!(total = subdomains.len(), "Enumeration merged");

        Ok(Enumeration {
            domain,
            subdomains,
            sources: reports,
        })
    }
}

/// Union every result set and return the members in lexicographic order.
pub fn merge<'a, I>(sets: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ResultSet>,
{
    let mut merged: BTreeSet<&str> = BTreeSet::new();
    for set in sets {
        merged.extend(set.iter().map(String::as_str));
    }
    merged.into_iter().map(str::to_string).collect()
}

/// Enumerate `domain` over every registered source with the given per-request
/// timeout.
pub async fn enumerate(domain: &str, timeout: Duration) -> Result<Vec<String>> {
    SubdomainEnumerator::new()
        .with_timeout(timeout)
        .enumerate(domain)
        .await
}
