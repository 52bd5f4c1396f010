//! Bar charts over frequency tables

use super::fonts::SANS;
use super::RenderError;
use crate::analysis::{display_label, FrequencyEntry};
use plotters::coord::Shift;
use plotters::prelude::*;

pub const PASSWORD_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
pub const USERNAME_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
pub const CONNECTION_COLOR: RGBColor = RGBColor(0x2e, 0xcc, 0x71);
const MUTED_COLOR: RGBColor = RGBColor(0x7f, 0x8c, 0x8d);

/// Labels and counts for one bar chart, in descending order
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
    pub color: RGBColor,
}

impl BarSeries {
    /// Build a series from frequency entries.
    ///
    /// Empty values are labelled `"(empty)"`; `max_label` truncates labels
    /// to that many characters.
    pub fn from_entries(
        title: &str,
        entries: &[FrequencyEntry],
        color: RGBColor,
        max_label: Option<usize>,
    ) -> Self {
        let labels = entries
            .iter()
            .map(|e| {
                let label = display_label(&e.value);
                match max_label {
                    Some(width) if !e.value.is_empty() => label.chars().take(width).collect(),
                    _ => label.to_string(),
                }
            })
            .collect();
        let counts = entries
            .iter()
            .map(|e| u32::try_from(e.count).unwrap_or(u32::MAX))
            .collect();

        BarSeries {
            title: title.to_string(),
            labels,
            counts,
            color,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> u32 {
        self.counts.len() as u32
    }

    fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Upper bound of the count axis, leaving headroom past the longest bar
fn axis_limit(max_count: u32) -> u32 {
    max_count + (max_count / 10).max(1)
}

/// Highest slot index on the category axis.
///
/// A one-value range maps every point to zero width, so a single bar still
/// gets two slots.
fn last_slot(bars: u32) -> u32 {
    bars.max(2) - 1
}

/// Approximate advance of one monospace glyph
fn char_width(text_size: u32) -> u32 {
    (text_size * 2 / 3).max(1)
}

/// Shorten `label` to at most `max_chars` characters, marking the cut with `…`
pub fn fit_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut fitted: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    fitted.push('…');
    fitted
}

/// Horizontal bars, most frequent at the top
pub fn draw_horizontal<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &BarSeries,
    x_desc: &str,
    text_size: u32,
) -> Result<(), RenderError> {
    if series.is_empty() {
        return draw_placeholder(area, &series.title, text_size);
    }

    // labels never take more than 40% of the width
    let (width, _) = area.dim_in_pixel();
    let max_chars = ((width * 2 / 5).saturating_sub(text_size) / char_width(text_size)).max(4) as usize;
    let labels: Vec<String> = series.labels.iter().map(|l| fit_label(l, max_chars)).collect();
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;

    let top = last_slot(series.len());
    let label_at = |v: &SegmentValue<u32>| match v {
        SegmentValue::Exact(row) | SegmentValue::CenterOf(row) if *row <= top => {
            labels.get((top - *row) as usize).cloned().unwrap_or_default()
        }
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(area)
        .caption(&series.title, (SANS, text_size * 3 / 2))
        .margin(text_size)
        .x_label_area_size(text_size * 3)
        .y_label_area_size(widest * char_width(text_size) + text_size)
        .build_cartesian_2d(0u32..axis_limit(series.max_count()), (0u32..top).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels((top + 1) as usize)
        .y_label_formatter(&label_at)
        .x_desc(x_desc)
        .label_style((SANS, text_size))
        .axis_desc_style((SANS, text_size))
        .draw()?;

    chart.draw_series(series.counts.iter().enumerate().map(|(i, &count)| {
        let row = top - i as u32;
        let mut bar = Rectangle::new(
            [(0, SegmentValue::Exact(row)), (count, SegmentValue::Exact(row + 1))],
            series.color.filled(),
        );
        bar.set_margin(4, 4, 0, 0);
        bar
    }))?;

    Ok(())
}

/// Vertical bars in descending order from left to right
pub fn draw_vertical<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &BarSeries,
    y_desc: &str,
    text_size: u32,
) -> Result<(), RenderError> {
    if series.is_empty() {
        return draw_placeholder(area, &series.title, text_size);
    }

    let last = last_slot(series.len());
    let (width, _) = area.dim_in_pixel();
    let plot_width = width.saturating_sub(text_size * 5);
    let max_chars = (plot_width / (last + 1) / char_width(text_size)).max(4) as usize;
    let labels: Vec<String> = series.labels.iter().map(|l| fit_label(l, max_chars)).collect();

    let label_at = |v: &SegmentValue<u32>| match v {
        SegmentValue::Exact(col) | SegmentValue::CenterOf(col) => {
            labels.get(*col as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    let mut chart = ChartBuilder::on(area)
        .caption(&series.title, (SANS, text_size * 3 / 2))
        .margin(text_size)
        .x_label_area_size(text_size * 2)
        .y_label_area_size(text_size * 3)
        .build_cartesian_2d((0u32..last).into_segmented(), 0u32..axis_limit(series.max_count()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels((last + 1) as usize)
        .x_label_formatter(&label_at)
        .y_desc(y_desc)
        .label_style((SANS, text_size))
        .axis_desc_style((SANS, text_size))
        .draw()?;

    chart.draw_series(series.counts.iter().enumerate().map(|(i, &count)| {
        let col = i as u32;
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(col), 0), (SegmentValue::Exact(col + 1), count)],
            series.color.filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }))?;

    Ok(())
}

fn draw_placeholder<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    text_size: u32,
) -> Result<(), RenderError> {
    let (width, height) = area.dim_in_pixel();
    let title_style = TextStyle::from((SANS, text_size * 3 / 2).into_font());
    let body_style = TextStyle::from((SANS, text_size).into_font()).color(&MUTED_COLOR);

    area.draw_text(title, &title_style, (text_size as i32, text_size as i32))?;
    area.draw_text(
        "No data",
        &body_style,
        ((width / 2) as i32 - (text_size * 2) as i32, (height / 2) as i32),
    )?;
    Ok(())
}
