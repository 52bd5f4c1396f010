//! Static PNG charts written to the output directory

use super::bars::{self, BarSeries, PASSWORD_COLOR, USERNAME_COLOR};
use super::fonts::{self, MONO, SANS};
use super::RenderError;
use crate::analysis::{display_label, Statistics};
use crate::config::AggregationConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const PASSWORDS_FILE: &str = "chart-passwords.png";
pub const USERNAMES_FILE: &str = "chart-usernames.png";
pub const DASHBOARD_FILE: &str = "dashboard.png";

// 10x6 and 12x8 inch figures at 150 DPI
const CHART_SIZE: (u32, u32) = (1500, 900);
const DASHBOARD_SIZE: (u32, u32) = (1800, 1200);

const DASHBOARD_LABEL_WIDTH: usize = 15;

/// Paths written by one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSet {
    pub passwords: Option<PathBuf>,
    pub usernames: Option<PathBuf>,
    pub dashboard: PathBuf,
}

impl ChartSet {
    pub fn written(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = Vec::new();
        paths.extend(self.passwords.as_deref());
        paths.extend(self.usernames.as_deref());
        paths.push(&self.dashboard);
        paths
    }
}

/// Renders the password, username and dashboard images
pub struct ChartRenderer {
    output_dir: PathBuf,
    chart_top: usize,
    summary_top: usize,
}

impl ChartRenderer {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        let defaults = AggregationConfig::default();
        ChartRenderer {
            output_dir: output_dir.into(),
            chart_top: defaults.chart_top,
            summary_top: defaults.summary_top,
        }
    }

    pub fn with_limits(mut self, aggregation: &AggregationConfig) -> Self {
        self.chart_top = aggregation.chart_top;
        self.summary_top = aggregation.summary_top;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render every chart, creating the output directory if needed.
    ///
    /// Charts whose sequence is empty are skipped; the dashboard is always
    /// written. Existing files are overwritten.
    pub fn render(&self, stats: &Statistics) -> Result<ChartSet, RenderError> {
        fonts::ensure_registered()?;
        std::fs::create_dir_all(&self.output_dir)?;

        let passwords = if stats.passwords.is_empty() {
            log::debug!("No passwords captured, skipping {}", PASSWORDS_FILE);
            None
        } else {
            let series = BarSeries::from_entries(
                "Top Passwords Attempted",
                stats.passwords.top(self.chart_top),
                PASSWORD_COLOR,
                None,
            );
            Some(self.render_bar_chart(PASSWORDS_FILE, &series)?)
        };

        let usernames = if stats.usernames.is_empty() {
            log::debug!("No usernames captured, skipping {}", USERNAMES_FILE);
            None
        } else {
            let series = BarSeries::from_entries(
                "Top Usernames Attempted",
                stats.usernames.top(self.chart_top),
                USERNAME_COLOR,
                None,
            );
            Some(self.render_bar_chart(USERNAMES_FILE, &series)?)
        };

        let dashboard = self.render_dashboard(stats)?;

        Ok(ChartSet {
            passwords,
            usernames,
            dashboard,
        })
    }

    fn render_bar_chart(&self, file_name: &str, series: &BarSeries) -> Result<PathBuf, RenderError> {
        let path = self.output_dir.join(file_name);
        {
            let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE)?;
            bars::draw_horizontal(&root, series, "Number of Attempts", 28)?;
            root.present()?;
        }
        log::info!("Wrote {:?}", path);
        Ok(path)
    }

    fn render_dashboard(&self, stats: &Statistics) -> Result<PathBuf, RenderError> {
        let path = self.output_dir.join(DASHBOARD_FILE);
        {
            let root = BitMapBackend::new(&path, DASHBOARD_SIZE).into_drawing_area();
            root.fill(&WHITE)?;
            let body = root.titled("Honeypot Attack Analysis Dashboard", (SANS, 44))?;

            let (_, height) = body.dim_in_pixel();
            let (upper, lower) = body.split_vertically(height / 2);
            let panels = upper.split_evenly((1, 2));

            let top_passwords = BarSeries::from_entries(
                &format!("Top {} Passwords", self.summary_top),
                stats.passwords.top(self.summary_top),
                PASSWORD_COLOR,
                Some(DASHBOARD_LABEL_WIDTH),
            );
            let top_usernames = BarSeries::from_entries(
                &format!("Top {} Usernames", self.summary_top),
                stats.usernames.top(self.summary_top),
                USERNAME_COLOR,
                None,
            );
            bars::draw_vertical(&panels[0], &top_passwords, "Attempts", 22)?;
            bars::draw_vertical(&panels[1], &top_usernames, "Attempts", 22)?;

            draw_summary_panel(&lower, stats)?;
            root.present()?;
        }
        log::info!("Wrote {:?}", path);
        Ok(path)
    }
}

/// Text lines of the dashboard summary panel
pub fn summary_lines(stats: &Statistics) -> Vec<String> {
    vec![
        "ATTACK SUMMARY".to_string(),
        String::new(),
        format!("Total Login Attempts: {}", stats.total_attempts),
        format!("Unique Passwords: {}", stats.unique_passwords()),
        format!("Unique Usernames: {}", stats.unique_usernames()),
        String::new(),
        format!(
            "Most Common Password: {}",
            display_label(stats.most_common_password())
        ),
        format!("Most Common Username: {}", stats.most_common_username()),
    ]
}

fn draw_summary_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    stats: &Statistics,
) -> Result<(), RenderError> {
    let style = TextStyle::from((MONO, 34).into_font());
    let lines = summary_lines(stats);
    let (width, height) = area.dim_in_pixel();
    let line_height = 44i32;
    let top = (height as i32 - line_height * lines.len() as i32) / 2;
    let left = (width / 10) as i32;

    for (i, line) in lines.iter().enumerate() {
        area.draw_text(line, &style, (left, top + line_height * i as i32))?;
    }
    Ok(())
}
