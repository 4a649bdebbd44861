pub mod analyze;
pub mod args;
pub mod fetch;
pub mod parse;
pub mod patterns;
pub mod report;
pub mod stats;
pub mod utils;

use anyhow::{Context, Result};
use std::io::Write;
use std::time::Instant;
use tracing::info;
use url::Url;

pub use analyze::analyze_log;
pub use args::Args;
pub use parse::{LogDataset, LogRow};
pub use stats::{AnalysisResult, Browser, BrowserTally, HourHistogram, ImageHits};

/// Fetch, parse, analyze, then report to `out`. Nothing is written unless
/// every stage before reporting succeeds.
pub fn run<W: Write>(url: &Url, out: &mut W) -> Result<()> {
    let total_start_time = Instant::now();
    info!("Running main with URL = {}...", url);

    let lines = fetch::download_lines(url)?;
    let rows = parse::process_log(&lines)?;
    let result = analyze_log(&rows)?;

    report::print_analysis_results(&result, out).context("Failed to write report")?;

    info!(
        action = "complete",
        component = "pipeline",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Report written"
    );
    Ok(())
}
