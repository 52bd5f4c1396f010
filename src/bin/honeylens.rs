use std::path::{Path, PathBuf};
use structopt::StructOpt;

use honeylens::analysis::Statistics;
use honeylens::config::Config;
use honeylens::input::{LogScanner, ScanError};
use honeylens::output::{write_statistics, OutputFormat, OutputHandler};

/// Cowrie honeypot log analyzer
#[derive(StructOpt, Debug)]
#[structopt(name = "honeylens", about = "Cowrie honeypot log analyzer")]
pub enum Cli {
    /// Print statistics and write the chart images
    Analyze {
        /// Path to configuration file
        #[structopt(short, long, default_value = "honeylens.toml")]
        config: PathBuf,
        /// Log file to analyze (overrides the configuration)
        #[structopt(short, long)]
        log: Option<PathBuf>,
        /// Directory for the chart images (overrides the configuration)
        #[structopt(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Print statistics without writing charts
    Stats {
        /// Path to configuration file
        #[structopt(short, long, default_value = "honeylens.toml")]
        config: PathBuf,
        /// Log file to analyze (overrides the configuration)
        #[structopt(short, long)]
        log: Option<PathBuf>,
    },
    /// Classify log lines and export the events
    Parse {
        /// Path to log file
        #[structopt(short, long)]
        file: PathBuf,
        /// Export format: json, jsonl or console
        #[structopt(long, default_value = "console")]
        format: String,
        /// Write to this file instead of stdout
        #[structopt(short, long)]
        output: Option<PathBuf>,
        /// Only export the first N events
        #[structopt(short = "n", long)]
        limit: Option<usize>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "honeylens.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::from_args();

    match cli {
        Cli::Analyze { config, log, output_dir } => {
            let mut config = load_config(&config, log)?;
            if let Some(dir) = output_dir {
                config.output.directory = dir;
            }

            let stdout = std::io::stdout();
            let outcome = honeylens::run_analysis(&config, &mut stdout.lock())?;
            log::debug!("Analysis finished: {:?}", outcome);
        }
        Cli::Stats { config, log } => {
            let config = load_config(&config, log)?;
            let scanner = LogScanner::new()?;

            match scanner.scan_credentials(&config.input.log_path) {
                Ok(triples) => {
                    let stats = Statistics::from_credentials(&triples);
                    let stdout = std::io::stdout();
                    write_statistics(&mut stdout.lock(), &stats, config.aggregation.summary_top)?;
                }
                Err(ScanError::NotFound(path)) => {
                    println!("❌ Error: Log file not found: {}", path.display());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Cli::Parse { file, format, output, limit } => {
            let scanner = LogScanner::new()?;
            let mut events = match scanner.scan_events(&file) {
                Ok(events) => events,
                Err(ScanError::NotFound(path)) => {
                    eprintln!("File not found: {}", path.display());
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            };
            let total = events.len();
            if let Some(limit) = limit {
                events.truncate(limit);
            }
            log::info!("Parsed {} event(s), exporting {}", total, events.len());

            let mut handler = OutputHandler::new(OutputFormat::from_str(&format), output)?;
            handler.write_events(&events)?;
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
    }

    Ok(())
}

/// Load the configuration file (or defaults) and apply the log override
fn load_config(path: &Path, log: Option<PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default(path)?;
    if let Some(log) = log {
        config.input.log_path = log;
    }
    Ok(config)
}
