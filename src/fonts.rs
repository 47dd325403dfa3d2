//! Mapping configured font references onto faces and layout metrics.

use cosmic::iced::Font;
use cosmic::iced::font::Weight;
use cosmic_toast_config::{FontSpec, FontWeight};
use cosmic_toast_util::CellMetrics;

use crate::constants::{LINE_HEIGHT_RATIO, MONO_ADVANCE_RATIO};

/// Monospace face for `font`.
pub fn face(font: &FontSpec) -> Font {
    let weight = match font.weight {
        FontWeight::Regular => Weight::Normal,
        FontWeight::Bold => Weight::Bold,
    };
    Font {
        weight,
        ..Font::MONOSPACE
    }
}

/// Cell metrics for `font`, rounded up so measured text is never narrower
/// than what the face draws.
pub fn cell_metrics(font: &FontSpec) -> CellMetrics {
    let size = f32::from(font.size);
    CellMetrics::new(
        scaled(size, MONO_ADVANCE_RATIO),
        scaled(size, LINE_HEIGHT_RATIO),
    )
}

fn scaled(size: f32, ratio: f32) -> i32 {
    (size * ratio).ceil() as i32
}
