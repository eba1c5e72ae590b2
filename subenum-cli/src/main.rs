mod display;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use subenum_core::colors::CatppuccinExt;
use subenum_core::output::{get_formatter, OutputFormat};
use subenum_core::{
    normalize_domain, ConsoleSink, FileSink, ResultSink, SourceId, SubdomainEnumerator,
    DEFAULT_OUTPUT_DIR,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use display::{FanOutProgress, ProgressWriterFactory};

#[derive(Parser)]
#[command(name = "subenum")]
#[command(about = "Passive subdomain enumeration without touching the target")]
#[command(version)]
struct Cli {
    /// Target domain (example: example.com)
    domain: String,

    /// Timeout per request, in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Where results will be saved
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Output format (human or json)
    #[arg(short, long, default_value = "human")]
    format: String,

    /// Comma-separated sources to query: crtsh, alienvault, hackertarget, threatminer
    #[arg(long, value_delimiter = ',')]
    sources: Vec<String>,

    /// Print results without writing files
    #[arg(long)]
    no_save: bool,

    /// Log per-source activity
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(ProgressWriterFactory)
        .init();

    let output_format: OutputFormat = cli.format.parse().unwrap_or_default();
    let human = output_format == OutputFormat::Human;

    let domain = match normalize_domain(&cli.domain) {
        Ok(domain) => domain,
        Err(e) => {
            eprintln!("{} {}", "Error:".ctp_red(), e);
            std::process::exit(1);
        }
    };

    let mut enumerator =
        SubdomainEnumerator::new().with_timeout(Duration::from_secs(cli.timeout));
    if !cli.sources.is_empty() {
        let ids = cli
            .sources
            .iter()
            .map(|s| s.parse::<SourceId>())
            .collect::<Result<Vec<_>, _>>()?;
        enumerator = enumerator.with_source_filter(&ids);
    }

    debug!(domain = %domain, sources = ?enumerator.source_ids(), "Starting scan");

    if human {
        println!("{}", format!("🔍 Enumerating subdomains for {}", domain).ctp_blue());
    }

    let progress = FanOutProgress::new("Looking for subdomains...", enumerator.source_ids().len());
    let enumeration = enumerator.scan(&domain, Some(progress.callback())).await;
    progress.finish();
    let report = enumeration?.report();

    let mut console = ConsoleSink::new(std::io::stdout(), get_formatter(output_format));
    console.emit(&report)?;

    if report.is_empty() || cli.no_save {
        return Ok(());
    }

    let mut files = FileSink::new(&cli.output_dir);
    files
        .emit(&report)
        .with_context(|| format!("Failed to save results to {}", cli.output_dir.display()))?;

    if human {
        println!("📥 All results saved to: {}/", cli.output_dir.display());
    } else if let Some(saved) = files.saved() {
        eprintln!(
            "Results saved to {} and {}",
            saved.hostnames.display(),
            saved.stats.display()
        );
    }

    Ok(())
}
