use colored::Colorize;

use super::{EnumerationReport, OutputFormatter};
use crate::colors::CatppuccinExt;

const SUBDOMAIN_COLUMN: &str = "Subdomain";
const STATUS_COLUMN: &str = "Status";
const FOUND_MARK: &str = "✓";
const SUMMARY_TITLE: &str = "SubEnum - Summary";

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(display_width(text))))
}

pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            text.sky().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_white().to_string()
        } else {
            text.to_string()
        }
    }

    fn hostname(&self, text: &str) -> String {
        if self.use_colors {
            text.pink().to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn border(&self, text: &str) -> String {
        if self.use_colors {
            text.overlay1().to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, text: &str) -> String {
        if self.use_colors {
            format!("\n{}\n{}", text.lavender().bold(), "─".repeat(display_width(text)).subtext0())
        } else {
            format!("\n{}\n{}", text, "-".repeat(display_width(text)))
        }
    }

    /// Two-column table of hostnames.
    pub fn format_table(&self, report: &EnumerationReport) -> String {
        let mut output = Vec::new();

        output.push(self.header(&format!("Subdomains found for {}", report.domain)));

        let host_width = report
            .subdomains
            .iter()
            .map(|s| display_width(s))
            .chain(std::iter::once(display_width(SUBDOMAIN_COLUMN)))
            .max()
            .unwrap_or(0);
        let status_width = display_width(STATUS_COLUMN);

        let rule = |left: &str, mid: &str, right: &str| {
            self.border(&format!(
                "{}{}{}{}{}",
                left,
                "─".repeat(host_width + 2),
                mid,
                "─".repeat(status_width + 2),
                right
            ))
        };
        let bar = self.border("│");

        output.push(format!("  {}", rule("┌", "┬", "┐")));
        output.push(format!(
            "  {} {} {} {} {}",
            bar,
            self.label(&pad(SUBDOMAIN_COLUMN, host_width)),
            bar,
            self.label(&pad(STATUS_COLUMN, status_width)),
            bar
        ));
        output.push(format!("  {}", rule("├", "┼", "┤")));

        for subdomain in &report.subdomains {
            output.push(format!(
                "  {} {} {} {} {}",
                bar,
                self.hostname(&pad(subdomain, host_width)),
                bar,
                self.success(&pad(FOUND_MARK, status_width)),
                bar
            ));
        }

        output.push(format!("  {}", rule("└", "┴", "┘")));

        output.join("\n")
    }

    /// Boxed summary panel with the target and the total.
    pub fn format_summary(&self, report: &EnumerationReport) -> String {
        let lines = [
            ("Target domain", report.domain.clone()),
            ("Subdomains found", report.total_subdomains.to_string()),
        ];

        let inner_width = lines
            .iter()
            .map(|(label, value)| display_width(label) + 2 + display_width(value))
            .chain(std::iter::once(display_width(SUMMARY_TITLE) + 2))
            .max()
            .unwrap_or(0);

        let title = format!(" {} ", SUMMARY_TITLE);
        let fill = (inner_width + 2).saturating_sub(display_width(&title));
        let left_fill = fill / 2;

        let mut output = Vec::new();
        output.push(format!(
            "{}{}{}",
            self.border(&format!("╭{}", "─".repeat(left_fill))),
            if self.use_colors {
                title.lavender().bold().to_string()
            } else {
                title.clone()
            },
            self.border(&format!("{}╮", "─".repeat(fill - left_fill)))
        ));

        for (label, value) in &lines {
            let used = display_width(label) + 2 + display_width(value);
            output.push(format!(
                "{} {}: {}{} {}",
                self.border("│"),
                self.label(label),
                self.value(value),
                " ".repeat(inner_width - used),
                self.border("│")
            ));
        }

        output.push(self.border(&format!("╰{}╯", "─".repeat(inner_width + 2))));

        output.join("\n")
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_report(&self, report: &EnumerationReport) -> String {
        format!(
            "{}\n\n{}",
            self.format_table(report),
            self.format_summary(report)
        )
    }

    fn format_no_results(&self, domain: &str) -> String {
        self.warning(&format!("⚠ No subdomains found for {}", domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> EnumerationReport {
        EnumerationReport::new(
            "example.com".to_string(),
            vec!["api.example.com".to_string(), "www.example.com".to_string()],
        )
    }

    #[test]
    fn test_table_lists_every_subdomain_in_order() {
        let table = HumanFormatter::new().without_colors().format_table(&report());
        let lines: Vec<&str> = table.lines().collect();

        assert!(table.contains("Subdomains found for example.com"));
        let api = lines.iter().position(|l| l.contains("api.example.com")).unwrap();
        let www = lines.iter().position(|l| l.contains("www.example.com")).unwrap();
        assert!(api < www);
        assert!(lines[api].contains(FOUND_MARK));
    }

    #[test]
    fn test_table_rows_are_aligned() {
        let table = HumanFormatter::new().without_colors().format_table(&report());
        let widths: Vec<usize> = table
            .lines()
            .filter(|l| l.trim_start().starts_with(['┌', '│', '├', '└']))
            .map(display_width)
            .collect();

        assert_eq!(widths.len(), 6);
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_summary_panel() {
        let summary = HumanFormatter::new().without_colors().format_summary(&report());
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains(SUMMARY_TITLE));
        assert!(lines[1].contains("Target domain: example.com"));
        assert!(lines[2].contains("Subdomains found: 2"));
        assert!(lines.iter().all(|l| display_width(l) == display_width(lines[0])));
    }

    #[test]
    fn test_no_results_message() {
        let message = HumanFormatter::new().without_colors().format_no_results("example.com");
        assert_eq!(message, "⚠ No subdomains found for example.com");
    }
}
