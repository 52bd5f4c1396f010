use super::RenderError;
use once_cell::sync::OnceCell;
use plotters::style::{register_font, FontStyle};

pub const SANS: &str = "sans-serif";
pub const MONO: &str = "monospace";

static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");
static REGISTERED: OnceCell<bool> = OnceCell::new();

/// Register the bundled font under both families used by the charts.
///
/// Safe to call repeatedly; registration happens once per process.
pub fn ensure_registered() -> Result<(), RenderError> {
    let ok = *REGISTERED.get_or_init(|| {
        [SANS, MONO]
            .iter()
            .all(|family| register_font(family, FontStyle::Normal, FONT_DATA).is_ok())
    });

    if ok {
        Ok(())
    } else {
        Err(RenderError::Font)
    }
}
