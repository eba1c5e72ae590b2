use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{alienvault, crtsh, hackertarget, threatminer, ResultSet};
use crate::error::{Result, SubenumError};

/// Placeholder substituted with the target domain in every URL template.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// Identifier of a passive data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    /// Certificate transparency log search
    CrtSh,
    /// Passive DNS aggregator
    AlienVault,
    /// Host search aggregator
    HackerTarget,
    /// Threat intelligence aggregator
    ThreatMiner,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::CrtSh => "crtsh",
            SourceId::AlienVault => "alienvault",
            SourceId::HackerTarget => "hackertarget",
            SourceId::ThreatMiner => "threatminer",
        }
    }

    /// Every known source, in registry order.
    pub fn all() -> impl Iterator<Item = SourceId> {
        SOURCES.iter().map(|descriptor| descriptor.id)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = SubenumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crtsh" | "crt.sh" => Ok(SourceId::CrtSh),
            "alienvault" | "otx" => Ok(SourceId::AlienVault),
            "hackertarget" => Ok(SourceId::HackerTarget),
            "threatminer" => Ok(SourceId::ThreatMiner),
            _ => Err(SubenumError::UnknownSource(s.to_string())),
        }
    }
}

/// Turns a provider response body into accepted hostnames for a domain.
pub type BodyParser = fn(body: &str, domain: &str) -> Result<ResultSet>;

/// Static description of a provider endpoint and how to read its answer.
#[derive(Debug, Clone, Copy)]
pub struct SourceDescriptor {
    pub id: SourceId,
    pub name: &'static str,
    pub url_template: &'static str,
    pub parse: BodyParser,
}

impl SourceDescriptor {
    pub fn url_for(&self, domain: &str) -> String {
        render_url(self.url_template, domain)
    }
}

pub static SOURCES: [SourceDescriptor; 4] = [
    SourceDescriptor {
        id: SourceId::CrtSh,
        name: "crt.sh",
        url_template: "https://crt.sh/?q=%25.{domain}&output=json",
        parse: crtsh::parse,
    },
    SourceDescriptor {
        id: SourceId::AlienVault,
        name: "AlienVault OTX",
        url_template: "https://otx.alienvault.com/api/v1/indicators/domain/{domain}/passive_dns",
        parse: alienvault::parse,
    },
    SourceDescriptor {
        id: SourceId::HackerTarget,
        name: "HackerTarget",
        url_template: "https://api.hackertarget.com/hostsearch/?q={domain}",
        parse: hackertarget::parse,
    },
    SourceDescriptor {
        id: SourceId::ThreatMiner,
        name: "ThreatMiner",
        url_template: "https://api.threatminer.org/v2/domain.php?q={domain}&rt=5",
        parse: threatminer::parse,
    },
];

/// Look up the descriptor registered for a source.
pub fn descriptor(id: SourceId) -> &'static SourceDescriptor {
    SOURCES
        .iter()
        .find(|descriptor| descriptor.id == id)
        .unwrap_or_else(|| unreachable!("every SourceId has a registry entry"))
}

/// Look up the URL template registered for a source.
pub fn lookup(id: SourceId) -> &'static str {
    descriptor(id).url_template
}

pub fn render_url(template: &str, domain: &str) -> String {
    template.replace(DOMAIN_PLACEHOLDER, domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_source_is_registered() {
        for id in [
            SourceId::CrtSh,
            SourceId::AlienVault,
            SourceId::HackerTarget,
            SourceId::ThreatMiner,
        ] {
            assert_eq!(descriptor(id).id, id);
            assert!(lookup(id).contains(DOMAIN_PLACEHOLDER));
        }
        assert_eq!(SourceId::all().count(), SOURCES.len());
    }

    #[test]
    fn test_render_url() {
        assert_eq!(
            descriptor(SourceId::CrtSh).url_for("example.com"),
            "https://crt.sh/?q=%25.example.com&output=json"
        );
        assert_eq!(
            render_url(lookup(SourceId::ThreatMiner), "example.com"),
            "https://api.threatminer.org/v2/domain.php?q=example.com&rt=5"
        );
    }

    #[test]
    fn test_source_id_from_str() {
        assert_eq!("crtsh".parse::<SourceId>().unwrap(), SourceId::CrtSh);
        assert_eq!(" OTX ".parse::<SourceId>().unwrap(), SourceId::AlienVault);
        assert_eq!(
            "HackerTarget".parse::<SourceId>().unwrap(),
            SourceId::HackerTarget
        );
        assert!("shodan".parse::<SourceId>().is_err());

        for id in SourceId::all() {
            assert_eq!(id.to_string().parse::<SourceId>().unwrap(), id);
        }
    }
}
