use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration shared by the analyzer and the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input log configuration
    pub input: InputConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Top-K sizes used by the renderers
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Dashboard server configuration
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Input log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the Cowrie text log
    pub log_path: PathBuf,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the static charts are written to
    pub directory: PathBuf,
    /// Event export format: "json", "jsonl", or "console"
    pub format: String,
}

/// Number of entries shown by each renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Text summary and dashboard image panels
    pub summary_top: usize,
    /// Standalone chart images
    pub chart_top: usize,
    /// Interactive dashboard bar charts
    pub dashboard_top: usize,
}

/// Dashboard server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        AggregationConfig {
            summary_top: 5,
            chart_top: 8,
            dashboard_top: 10,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: InputConfig {
                log_path: PathBuf::from("logs/cowrie.log"),
            },
            output: OutputConfig {
                directory: PathBuf::from("docs/screenshots"),
                format: "console".to_string(),
            },
            aggregation: AggregationConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when it is absent
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let config = Self::from_file(path)?;
            log::info!("Configuration loaded from {:?}", path);
            Ok(config)
        } else {
            log::warn!("Config file {:?} not found, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
