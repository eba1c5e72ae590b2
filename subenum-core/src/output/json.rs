use super::{EnumerationReport, OutputFormatter};

pub struct JsonFormatter {
    pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &EnumerationReport) -> String {
        self.to_json(report)
    }

    fn format_no_results(&self, domain: &str) -> String {
        self.to_json(&EnumerationReport::new(domain.to_string(), Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_report() {
        let report = EnumerationReport::new(
            "example.com".to_string(),
            vec!["api.example.com".to_string(), "www.example.com".to_string()],
        );

        assert_eq!(
            JsonFormatter::new().compact().format_report(&report),
            r#"{"domain":"example.com","total_subdomains":2,"subdomains":["api.example.com","www.example.com"]}"#
        );
        assert_eq!(
            JsonFormatter::new().compact().format_no_results("example.com"),
            r#"{"domain":"example.com","total_subdomains":0,"subdomains":[]}"#
        );
    }
}
