mod human;
mod json;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

use serde::{Deserialize, Serialize};

/// Aggregated subdomains for one domain, as presented and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationReport {
    pub domain: String,
    pub total_subdomains: usize,
    pub subdomains: Vec<String>,
}

impl EnumerationReport {
    pub fn new(domain: String, subdomains: Vec<String>) -> Self {
        Self {
            domain,
            total_subdomains: subdomains.len(),
            subdomains,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subdomains.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" | "pretty" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

pub trait OutputFormatter: Send + Sync {
    /// Render a non-empty report.
    fn format_report(&self, report: &EnumerationReport) -> String;
    /// Render the outcome of an enumeration that found nothing.
    fn format_no_results(&self, domain: &str) -> String;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Pretty".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_report_counts_subdomains() {
        let report = EnumerationReport::new(
            "example.com".to_string(),
            vec!["a.example.com".to_string(), "b.example.com".to_string()],
        );
        assert_eq!(report.total_subdomains, 2);
        assert!(!report.is_empty());
        assert!(EnumerationReport::new("example.com".to_string(), vec![]).is_empty());
    }
}
