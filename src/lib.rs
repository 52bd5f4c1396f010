pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod dashboard;
pub mod input;
pub mod models;
pub mod output;
pub mod render;

// Re-export commonly used types
pub use analysis::{top_k, FrequencyTable, Statistics};
pub use analyzer::{run_analysis, AnalysisOutcome};
pub use config::Config;
pub use dashboard::{DashboardView, ParseCache};
pub use input::{LogScanner, ScanError};
pub use models::{CredentialTriples, Event, EventKind};
pub use render::{ChartRenderer, RenderError};
