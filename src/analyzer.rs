//! The static analysis run: scan, print statistics, write charts

use crate::analysis::Statistics;
use crate::config::Config;
use crate::input::{LogScanner, ScanError};
use crate::output::write_statistics;
use crate::render::{ChartRenderer, ChartSet, RenderError};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an analysis run
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The log file does not exist; nothing was written
    MissingLog(PathBuf),
    /// The log holds no login attempts; nothing was written
    NoData,
    /// Statistics were printed and charts written
    Complete(ChartSet),
}

/// Run the static analyzer, writing progress to `out`.
///
/// A missing log and a log without login attempts are reported on `out`
/// and returned as outcomes rather than errors.
pub fn run_analysis<W: Write>(config: &Config, out: &mut W) -> Result<AnalysisOutcome, AnalyzeError> {
    let rule = "=".repeat(50);
    writeln!(out, "\n Cowrie Honeypot Log Analyzer")?;
    writeln!(out, "{}\n", rule)?;

    let log_path = &config.input.log_path;
    if !log_path.exists() {
        writeln!(out, "❌ Error: Log file not found: {}", log_path.display())?;
        return Ok(AnalysisOutcome::MissingLog(log_path.clone()));
    }

    writeln!(out, "📖 Reading logs...")?;
    let scanner = LogScanner::new()?;
    let triples = match scanner.scan_credentials(log_path) {
        Ok(triples) => triples,
        // removed between the existence check and the open
        Err(ScanError::NotFound(path)) => {
            writeln!(out, "❌ Error: Log file not found: {}", path.display())?;
            return Ok(AnalysisOutcome::MissingLog(path));
        }
        Err(e) => return Err(e.into()),
    };

    if triples.usernames.is_empty() {
        writeln!(out, "❌ No attack data found in logs!")?;
        return Ok(AnalysisOutcome::NoData);
    }

    let stats = Statistics::from_credentials(&triples);
    write_statistics(out, &stats, config.aggregation.summary_top)?;

    writeln!(out, "Generating charts...\n")?;
    let renderer = ChartRenderer::new(&config.output.directory).with_limits(&config.aggregation);
    let charts = renderer.render(&stats)?;
    for path in charts.written() {
        writeln!(out, "✓ Created: {}", path.display())?;
    }

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "✅ Analysis complete!")?;
    writeln!(out, " Charts saved to: {}/", renderer.output_dir().display())?;
    writeln!(out, "{}\n", rule)?;

    Ok(AnalysisOutcome::Complete(charts))
}
