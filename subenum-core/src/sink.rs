//! Consumers of a finished enumeration
//!
//! The engine never prints or writes files itself. Callers hand the report to
//! one or more [`ResultSink`]s after the merge.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::Result;
use crate::output::{EnumerationReport, OutputFormatter};

pub const DEFAULT_OUTPUT_DIR: &str = "subenum_results";

/// Destination for an enumeration report.
pub trait ResultSink {
    fn emit(&mut self, report: &EnumerationReport) -> Result<()>;
}

/// Renders reports with a formatter into any writer (stdout, a buffer).
pub struct ConsoleSink<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W, formatter: Box<dyn OutputFormatter>) -> Self {
        Self { writer, formatter }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn emit(&mut self, report: &EnumerationReport) -> Result<()> {
        let rendered = if report.is_empty() {
            self.formatter.format_no_results(&report.domain)
        } else {
            self.formatter.format_report(report)
        };
        writeln!(self.writer, "{}", rendered)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Paths written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFiles {
    pub hostnames: PathBuf,
    pub stats: PathBuf,
}

/// Persists reports as `subenum_<domain>.txt` (one hostname per line) and
/// `subenum_<domain>_stats.json` under an output directory.
///
/// Empty reports are never written.
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
    saved: Option<SavedFiles>,
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            saved: None,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Files written by the most recent non-empty report.
    pub fn saved(&self) -> Option<&SavedFiles> {
        self.saved.as_ref()
    }

    /// Write both files. Returns `None` without touching the disk when the
    /// report is empty.
    #[instrument(skip(self, report), fields(domain = %report.domain))]
    pub fn save(&self, report: &EnumerationReport) -> Result<Option<SavedFiles>> {
        if report.is_empty() {
            debug!("Nothing to save");
            return Ok(None);
        }

        fs::create_dir_all(&self.output_dir)?;

        let base_name = format!("subenum_{}", report.domain);
        let hostnames = self.output_dir.join(format!("{}.txt", base_name));
        let stats = self.output_dir.join(format!("{}_stats.json", base_name));

        let mut listing = String::new();
        for subdomain in &report.subdomains {
            listing.push_str(subdomain);
            listing.push('\n');
        }
        fs::write(&hostnames, listing)?;
        fs::write(&stats, serde_json::to_string_pretty(report)?)?;

        debug!(
            hostnames = %hostnames.display(),
            stats = %stats.display(),
            "Results saved"
        );

        Ok(Some(SavedFiles { hostnames, stats }))
    }
}

impl ResultSink for FileSink {
    fn emit(&mut self, report: &EnumerationReport) -> Result<()> {
        if let Some(saved) = self.save(report)? {
            self.saved = Some(saved);
        }
        Ok(())
    }
}
