//! Pixel-to-spreadsheet unit conversion and cell value typing.

use crate::model::CellValue;

/// CSS pixels per column-width character unit.
pub const PIXELS_PER_WIDTH_UNIT: f64 = 7.5;

/// Points per CSS pixel for row heights.
pub const POINTS_PER_PIXEL: f64 = 0.75;

/// Convert a CSS pixel width to column-width character units.
pub fn width_pixels_to_units(px: f64) -> f64 {
    px / PIXELS_PER_WIDTH_UNIT
}

/// Convert a CSS pixel height to row-height points.
pub fn height_pixels_to_units(px: f64) -> f64 {
    px * 3.0 / 4.0
}

/// Type the text of a table cell.
///
/// Empty text yields `None` (nothing is written). Integers are tried first,
/// then floats; anything else is kept as the original string. Non-finite
/// floats (`inf`, `NaN`) stay text since a spreadsheet cannot store them.
pub fn parse_cell_value(text: &str) -> Option<CellValue> {
    if text.is_empty() {
        return None;
    }

    if let Ok(n) = text.parse::<i64>() {
        return Some(CellValue::Int(n));
    }

    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(CellValue::Float(n)),
        _ => Some(CellValue::Text(text.to_string())),
    }
}
