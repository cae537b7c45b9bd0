//! Fundamental Screener - score a batch of companies on their fundamentals.
//!
//! Reads a JSON array of `StockData` and writes a ranked report.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use fundamental_screener::logging::init_logging;
use fundamental_screener::screener::{FundamentalAnalyzer, ReportFormat, ScreeningReport};
use fundamental_screener::{Settings, StockData};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file containing an array of companies with their metrics
    input: PathBuf,

    /// Settings file (overrides FUNDAMENTAL_SCREENER_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format: markdown, json or text
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Write the report to this path instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Score companies on the blocking thread pool
    #[arg(long)]
    concurrent: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
    .context("Failed to load settings")?;

    init_logging(
        &settings.observability.log_level,
        &settings.observability.log_format,
    )?;

    info!("Fundamental Screener v{}", env!("CARGO_PKG_VERSION"));

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input {}", args.input.display()))?;
    let stocks: Vec<StockData> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse input {}", args.input.display()))?;

    info!(count = stocks.len(), concurrent = args.concurrent, "Screening batch");

    let analyzer = FundamentalAnalyzer::new(settings.criteria.clone(), settings.weights);
    let results = if args.concurrent {
        Arc::new(analyzer).batch_analyze_concurrent(stocks).await
    } else {
        analyzer.batch_analyze(&stocks)
    };

    let format = args.format.unwrap_or(settings.report.format);
    let report = ScreeningReport::new(results);

    let output = args.output.or_else(|| {
        settings.report.output_dir.as_ref().map(|dir| {
            dir.join(format!(
                "screening_{}",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            ))
        })
    });

    match output {
        Some(path) => {
            let written = report.save_to_file(&path, format)?;
            info!(path = %written.display(), %format, "Report saved");
        }
        None => println!("{}", report.generate(format)?),
    }

    Ok(())
}
