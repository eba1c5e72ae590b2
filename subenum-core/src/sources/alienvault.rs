//! Passive DNS aggregator (AlienVault OTX).

use serde::Deserialize;

use super::{from_json_object, ResultSet};
use crate::error::Result;
use crate::validation::accept_candidate;

#[derive(Debug, Deserialize)]
struct PassiveDnsResponse {
    #[serde(default)]
    passive_dns: Vec<PassiveDnsRecord>,
}

#[derive(Debug, Deserialize)]
struct PassiveDnsRecord {
    #[serde(default)]
    hostname: Option<String>,
}

/// Parse `{"passive_dns": [{"hostname": ...}, ...]}`.
pub(crate) fn parse(body: &str, domain: &str) -> Result<ResultSet> {
    let response: PassiveDnsResponse = from_json_object(body)?;

    Ok(response
        .passive_dns
        .iter()
        .filter_map(|record| record.hostname.as_deref())
        .filter_map(|hostname| accept_candidate(hostname, domain))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{FailureKind, HttpSource, Source, SourceClient, SourceId, SourceOutcome};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE: &str = r#"{
        "count": 4,
        "passive_dns": [
            {"address": "1.2.3.4", "hostname": "vpn.example.com", "record_type": "A"},
            {"address": "1.2.3.5", "hostname": "*.cdn.example.com"},
            {"address": "1.2.3.6", "hostname": "example.com.evil.net"},
            {"address": "1.2.3.7"}
        ]
    }"#;

    #[test]
    fn test_parse_passive_dns() {
        let found = parse(SAMPLE, "example.com").unwrap();
        assert_eq!(found, ResultSet::from(["vpn.example.com".to_string()]));
    }

    #[test]
    fn test_parse_missing_list_is_empty() {
        assert!(parse(r#"{"count": 0}"#, "example.com").unwrap().is_empty());
        assert!(parse(r#"{"passive_dns": "nope"}"#, "example.com").is_err());
    }

    #[test]
    fn test_parse_rejects_top_level_array() {
        assert!(parse("[]", "example.com").is_err());
        // Not read by position into `passive_dns`
        assert!(parse(r#"[[{"hostname": "a.example.com"}]]"#, "example.com").is_err());
    }

    #[tokio::test]
    async fn test_fetch_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/indicators/domain/example.com/passive_dns"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpSource::with_template(
            SourceId::AlienVault,
            format!("{}/api/v1/indicators/domain/{{domain}}/passive_dns", server.uri()),
        );
        let client = SourceClient::with_defaults().unwrap();
        let outcome = source.fetch(&client, "example.com").await;

        assert_eq!(
            outcome,
            SourceOutcome::found(ResultSet::from(["vpn.example.com".to_string()]))
        );
    }

    #[tokio::test]
    async fn test_fetch_degrades_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"passive_dns\": ["))
            .mount(&server)
            .await;

        let source =
            HttpSource::with_template(SourceId::AlienVault, format!("{}/{{domain}}", server.uri()));
        let client = SourceClient::with_defaults().unwrap();
        let outcome = source.fetch(&client, "example.com").await;

        assert!(matches!(
            outcome,
            SourceOutcome::Degraded {
                kind: FailureKind::Parse,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_degrades_on_array_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[[{"hostname": "a.example.com"}]]"#),
            )
            .mount(&server)
            .await;

        let source =
            HttpSource::with_template(SourceId::AlienVault, format!("{}/{{domain}}", server.uri()));
        let client = SourceClient::with_defaults().unwrap();
        let outcome = source.fetch(&client, "example.com").await;

        assert!(matches!(
            outcome,
            SourceOutcome::Degraded {
                kind: FailureKind::Parse,
                ..
            }
        ));
    }
}
