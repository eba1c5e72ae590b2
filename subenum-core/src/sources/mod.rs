//! Passive data sources
//!
//! Each provider is a [`Source`]: domain in, [`SourceOutcome`] out, never an
//! error. Endpoints and body parsers live in the [`registry`]; the request
//! path is shared by every provider through [`HttpSource`], and each parser
//! lives in its own module.

mod alienvault;
mod client;
mod crtsh;
mod hackertarget;
pub mod registry;
mod threatminer;

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

pub use client::{
    FetchedResponse, SourceClient, DEFAULT_MAX_CONNECTIONS, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
pub use registry::{BodyParser, SourceDescriptor, SourceId, SOURCES};

use crate::error::{Result, SubenumError};

/// Unique hostnames found by one source for one domain.
pub type ResultSet = BTreeSet<String>;

/// Why a source contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection, DNS, TLS or timeout fault talking to the provider
    Transport,
    /// Provider answered, but not with a usable result (non-200, "no results")
    Rejected,
    /// Body did not match the provider's known shape
    Parse,
}

impl From<&SubenumError> for FailureKind {
    fn from(error: &SubenumError) -> Self {
        match error {
            SubenumError::HttpError(_) | SubenumError::Cancelled | SubenumError::Io(_) => {
                FailureKind::Transport
            }
            SubenumError::ProviderStatus { .. } | SubenumError::NoResults { .. } => {
                FailureKind::Rejected
            }
            SubenumError::JsonError(_) => FailureKind::Parse,
            // Caller-side faults, rejected before any source runs. A parser
            // that raises one read data it could not use.
            SubenumError::InvalidDomain(_) | SubenumError::UnknownSource(_) => FailureKind::Parse,
        }
    }
}

/// Result of one source invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SourceOutcome {
    Found { subdomains: ResultSet },
    Degraded { kind: FailureKind, reason: String },
}

impl SourceOutcome {
    pub fn found(subdomains: ResultSet) -> Self {
        SourceOutcome::Found { subdomains }
    }

    /// Fold a fallible fetch into an outcome. This is the adapter boundary:
    /// nothing past here sees an error.
    pub fn from_result(result: Result<ResultSet>) -> Self {
        match result {
            Ok(subdomains) => SourceOutcome::Found { subdomains },
            Err(e) => SourceOutcome::Degraded {
                kind: FailureKind::from(&e),
                reason: e.to_string(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SourceOutcome::Degraded { .. })
    }

    /// Hostnames contributed to the merge; empty when degraded.
    pub fn subdomains(&self) -> Option<&ResultSet> {
        match self {
            SourceOutcome::Found { subdomains } => Some(subdomains),
            SourceOutcome::Degraded { .. } => None,
        }
    }

    pub fn into_subdomains(self) -> ResultSet {
        match self {
            SourceOutcome::Found { subdomains } => subdomains,
            SourceOutcome::Degraded { .. } => ResultSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.subdomains().map_or(0, BTreeSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A passive provider of hostnames for a domain.
///
/// Implementations issue at most one request through the shared client and
/// must never panic or return an error: every fault degrades to
/// [`SourceOutcome::Degraded`].
#[async_trait]
pub trait Source: Send + Sync {
    fn id(&self) -> SourceId;

    /// `domain` is already normalized.
    async fn fetch(&self, client: &SourceClient, domain: &str) -> SourceOutcome;
}

/// A registered provider: one GET through the shared client, then the
/// descriptor's body parser.
#[derive(Debug, Clone)]
pub struct HttpSource {
    descriptor: &'static SourceDescriptor,
    url_template: String,
}

impl HttpSource {
    /// Adapter for `id` using its registered endpoint.
    pub fn new(id: SourceId) -> Self {
        Self::with_template(id, registry::lookup(id))
    }

    /// Adapter for `id` pointed at another endpoint (mirrors, test servers).
    pub fn with_template(id: SourceId, url_template: impl Into<String>) -> Self {
        Self {
            descriptor: registry::descriptor(id),
            url_template: url_template.into(),
        }
    }

    async fn query(&self, client: &SourceClient, domain: &str) -> Result<ResultSet> {
        let url = registry::render_url(&self.url_template, domain);
        let body = client.get_ok(&url, self.descriptor.name).await?;
        (self.descriptor.parse)(&body, domain)
    }
}

#[async_trait]
impl Source for HttpSource {
    fn id(&self) -> SourceId {
        self.descriptor.id
    }

    #[instrument(skip(self, client), fields(source = %self.descriptor.id))]
    async fn fetch(&self, client: &SourceClient, domain: &str) -> SourceOutcome {
        let outcome = SourceOutcome::from_result(self.query(client, domain).await);
        debug!(found = outcome.len(), degraded = outcome.is_degraded(), "Source finished");
        outcome
    }
}

/// Build the adapter for a registered source, pointed at `url_template`.
pub fn build_source(id: SourceId, url_template: impl Into<String>) -> Arc<dyn Source> {
    Arc::new(HttpSource::with_template(id, url_template))
}

/// Adapters for every registered source, using the registry endpoints.
pub fn default_sources() -> Vec<Arc<dyn Source>> {
    SOURCES
        .iter()
        .map(|descriptor| Arc::new(HttpSource::new(descriptor.id)) as Arc<dyn Source>)
        .collect()
}

/// Deserialize a body whose top level must be a JSON object.
///
/// serde fills structs from arrays by position, so a plain `from_str` would
/// read `[[...]]` as if it were `{"list": [...]}`.
pub(crate) fn from_json_object<T: DeserializeOwned>(body: &str) -> Result<T> {
    let object: Map<String, Value> = serde_json::from_str(body)?;
    Ok(serde_json::from_value(Value::Object(object))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_follow_registry() {
        let ids: Vec<SourceId> = default_sources().iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            vec![
                SourceId::CrtSh,
                SourceId::AlienVault,
                SourceId::HackerTarget,
                SourceId::ThreatMiner,
            ]
        );
    }

    #[test]
    fn test_outcome_from_error_is_degraded() {
        let outcome = SourceOutcome::from_result(Err(SubenumError::ProviderStatus {
            source_name: "crt.sh".to_string(),
            status: 503,
        }));

        assert!(outcome.is_degraded());
        assert!(outcome.is_empty());
        assert_eq!(
            outcome,
            SourceOutcome::Degraded {
                kind: FailureKind::Rejected,
                reason: "Unexpected status 503 from crt.sh".to_string(),
            }
        );
        assert!(outcome.into_subdomains().is_empty());
    }

    #[test]
    fn test_outcome_found_may_be_empty() {
        let outcome = SourceOutcome::from_result(Ok(ResultSet::new()));
        assert!(!outcome.is_degraded());
        assert!(outcome.is_empty());

        let outcome = SourceOutcome::found(ResultSet::from(["a.example.com".to_string()]));
        assert_eq!(outcome.len(), 1);
    }

    #[test]
    fn test_json_object_required_at_top_level() {
        #[derive(Debug, Deserialize)]
        struct Listing {
            #[serde(default)]
            items: Vec<String>,
        }

        let listing: Listing = from_json_object(r#"{"items": ["a"]}"#).unwrap();
        assert_eq!(listing.items, vec!["a"]);

        assert!(from_json_object::<Listing>("[]").is_err());
        assert!(from_json_object::<Listing>(r#"[["a"]]"#).is_err());
        assert!(from_json_object::<Listing>("\"a\"").is_err());
        assert!(from_json_object::<Listing>("{").is_err());
    }

    #[test]
    fn test_http_source_takes_registry_identity() {
        let source = HttpSource::new(SourceId::HackerTarget);
        assert_eq!(source.id(), SourceId::HackerTarget);
        assert_eq!(source.url_template, registry::lookup(SourceId::HackerTarget));

        let source = build_source(SourceId::ThreatMiner, "http://127.0.0.1:1/{domain}");
        assert_eq!(source.id(), SourceId::ThreatMiner);
    }

    #[test]
    fn test_parse_errors_classify_as_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            FailureKind::from(&SubenumError::JsonError(json_err)),
            FailureKind::Parse
        );
        assert_eq!(
            FailureKind::from(&SubenumError::NoResults {
                source_name: "HackerTarget".to_string()
            }),
            FailureKind::Rejected
        );
        assert_eq!(
            FailureKind::from(&SubenumError::Cancelled),
            FailureKind::Transport
        );
    }
}
