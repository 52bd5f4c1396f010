//! HTML rendering of the dashboard view

use super::view::DashboardView;
use crate::analysis::{display_label, FrequencyEntry};
use crate::render::bars::{self, BarSeries, PASSWORD_COLOR, USERNAME_COLOR};
use crate::render::{fonts, RenderError};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotters::prelude::*;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (560, 360);

const STYLE: &str = "
body { font-family: sans-serif; margin: 2rem auto; max-width: 1200px; color: #2c3e50; }
.metrics, .charts { display: flex; gap: 2rem; }
.metric { flex: 1; padding: 1rem; border: 1px solid #ecf0f1; border-radius: 6px; }
.metric .value { font-size: 2.2rem; font-weight: bold; }
.chart { flex: 1; }
.notice { padding: 0.8rem 1rem; border-radius: 6px; }
.warning { background: #fef5e7; } .info { background: #eaf2f8; }
.success { background: #e9f7ef; } .error { background: #fdedec; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.3rem 0.6rem; border-bottom: 1px solid #ecf0f1; }
td.mono { font-family: monospace; }
.caption { color: #7f8c8d; }
";

/// Inline SVG for the two credential charts, when there are login attempts
struct Charts {
    usernames: String,
    passwords: String,
}

/// Render the full dashboard page.
///
/// `error` is shown above the body when the log could not be read; the
/// view is then expected to be empty.
pub fn render_page(view: &DashboardView, log_path: &Path, error: Option<&str>) -> Result<String, RenderError> {
    let charts = if !view.is_empty() && view.has_logins() {
        let users = BarSeries::from_entries("Top Attacked Usernames", &view.top_usernames, USERNAME_COLOR, None);
        let passwords = BarSeries::from_entries("Top Passwords Tried", &view.top_passwords, PASSWORD_COLOR, None);
        Some(Charts {
            usernames: bar_chart_svg(&users)?,
            passwords: bar_chart_svg(&passwords)?,
        })
    } else {
        None
    };

    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Cowrie Log Forensics" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { "Cowrie Honeypot: Raw Log Analysis" }
                p {
                    "Generating structured intelligence from unstructured "
                    code { (log_path.display()) }
                    " data."
                }

                @if let Some(message) = error {
                    (notice("error", message))
                }

                @if view.is_empty() {
                    (notice("warning", &format!("Please verify '{}' is in the directory.", log_path.display())))
                } @else {
                    (activity(view, charts.as_ref()))
                }
            }
        }
    };

    Ok(markup.into_string())
}

fn activity(view: &DashboardView, charts: Option<&Charts>) -> Markup {
    html! {
        @if let Some(window) = view.observed {
            p class="caption" {
                "Observed from " (window.first.format("%Y-%m-%d %H:%M:%S"))
                " to " (window.last.format("%Y-%m-%d %H:%M:%S"))
            }
        }

        div class="metrics" {
            (metric("Total Connections", view.total_connections))
            (metric("Unique Attacker IPs", view.unique_ips))
            (metric("Commands Executed", view.commands_executed))
        }
        hr;

        @if let Some(charts) = charts {
            div class="charts" {
                div class="chart" { (PreEscaped(&charts.usernames)) }
                div class="chart" { (PreEscaped(&charts.passwords)) }
            }
        } @else {
            (notice("info", "No login attempts found in logs yet."))
        }

        hr;
        h2 { "Attacker Activity (Commands Executed)" }
        p class="caption" { "This table shows what the attacker did after gaining access." }
        @if view.commands.is_empty() {
            (notice("success", "No commands executed (Attacker may have failed to login)."))
        } @else {
            table {
                tr { th { "timestamp" } th { "command" } }
                @for row in &view.commands {
                    tr { td { (row.timestamp) } td class="mono" { (row.command) } }
                }
            }
        }

        hr;
        details {
            summary { "View All Attacker IPs" }
            (frequency_table("src_ip", &view.ip_frequency))
        }
    }
}

fn notice(class: &str, message: &str) -> Markup {
    html! {
        p class={ "notice " (class) } { (message) }
    }
}

fn metric(label: &str, value: usize) -> Markup {
    html! {
        div class="metric" {
            div { (label) }
            div class="value" { (value) }
        }
    }
}

fn frequency_table(heading: &str, entries: &[FrequencyEntry]) -> Markup {
    html! {
        table {
            tr { th { (heading) } th { "count" } }
            @for entry in entries {
                tr { td { (display_label(&entry.value)) } td { (entry.count) } }
            }
        }
    }
}

/// Inline SVG bar chart for one series
fn bar_chart_svg(series: &BarSeries) -> Result<String, RenderError> {
    fonts::ensure_registered()?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        bars::draw_vertical(&root, series, "count", 13)?;
        root.present()?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;

    fn page_for(events: &[Event]) -> String {
        let view = DashboardView::from_events(events, 10);
        render_page(&view, Path::new("logs/cowrie.log"), None).unwrap()
    }

    #[test]
    fn test_empty_collection_shows_warning_only() {
        let html = page_for(&[]);
        assert!(html.contains("Please verify"));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("Total Connections"));
    }

    #[test]
    fn test_no_logins_shows_info() {
        let html = page_for(&[Event::command_execution("t".to_string(), "cat /etc/passwd")]);
        assert!(html.contains("No login attempts found in logs yet."));
        assert!(!html.contains("<svg"));
        assert!(html.contains("cat /etc/passwd"));
    }

    #[test]
    fn test_no_commands_shows_success() {
        let html = page_for(&[Event::login_attempt("t".to_string(), "root", "root", "failed")]);
        assert!(html.contains("No commands executed"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Top Attacked Usernames"));
    }

    #[test]
    fn test_commands_are_escaped() {
        let html = page_for(&[Event::command_execution("t".to_string(), "echo <b>pwn</b>")]);
        assert!(html.contains("echo &lt;b&gt;pwn&lt;/b&gt;"));
        assert!(!html.contains("<b>pwn</b>"));
    }

    #[test]
    fn test_single_login_charts_show_labels() {
        let html = page_for(&[Event::login_attempt("t".to_string(), "root", "toor", "failed")]);
        assert!(html.contains(">\nroot\n</text>"));
        assert!(html.contains(">\ntoor\n</text>"));
    }

    #[test]
    fn test_log_path_is_escaped() {
        let view = DashboardView::from_events(&[], 10);
        let html = render_page(&view, Path::new("<logs>/cowrie.log"), None).unwrap();
        assert!(html.contains("<code>&lt;logs&gt;/cowrie.log</code>"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_ip_table_behind_details() {
        let html = page_for(&[
            Event::new_connection("t".to_string(), "192.0.2.9"),
            Event::new_connection("t".to_string(), "192.0.2.9"),
        ]);
        assert!(html.contains("<details>"));
        assert!(html.contains("<tr><td>192.0.2.9</td><td>2</td></tr>"));
        assert!(html.contains("<div class=\"value\">2</div>"));
    }

    #[test]
    fn test_error_message_is_shown() {
        let view = DashboardView::from_events(&[], 10);
        let html = render_page(&view, Path::new("missing.log"), Some("Could not find file: missing.log")).unwrap();
        assert!(html.contains("Could not find file: missing.log"));
        assert!(html.contains("Please verify"));
    }
}
