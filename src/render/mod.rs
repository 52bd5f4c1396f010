//! Chart rendering
//!
//! Bar drawing is generic over the plotters backend so the same code feeds
//! the PNG files and the SVG embedded in the dashboard page.

pub mod bars;
pub mod charts;
pub mod fonts;

pub use bars::BarSeries;
pub use charts::{ChartRenderer, ChartSet};

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can occur while rendering charts
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Drawing error: {0}")]
    Drawing(String),

    #[error("Failed to load bundled font")]
    Font,
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(e.to_string())
    }
}
