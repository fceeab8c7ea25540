//! Translation of recognised CSS properties into [`Style`] values.

use super::declarations::{parse_declarations, Declarations};
use crate::model::{Alignment, Border, BorderWeight, Font, Side, Style};
use regex::Regex;
use std::sync::LazyLock;

/// Border properties in resolution order. Only the first one with a
/// non-empty value is honoured.
const BORDER_PROPERTIES: [&str; 5] = [
    "border",
    "border-left",
    "border-right",
    "border-top",
    "border-bottom",
];

const THIN_BORDER: &str = "1px solid black";

static SOLID_BLACK_BORDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+px solid black").expect("BUG: hardcoded border regex is statically valid")
});

static CSS_PIXELS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)px").expect("BUG: hardcoded pixel regex is statically valid")
});

static ATTRIBUTE_PIXELS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:px)?$").expect("BUG: hardcoded attribute regex is statically valid")
});

/// Build a [`Style`] from an inline style attribute.
///
/// Missing or blank input gives an empty style. Otherwise alignment and font
/// are always present (font weight has no unset state) and the border is set
/// only when a border property was declared.
pub fn extract_style(raw: Option<&str>) -> Style {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Style::default();
    };

    let declarations = parse_declarations(Some(raw));
    Style {
        border: extract_border(&declarations),
        alignment: Some(extract_alignment(&declarations)),
        font: Some(extract_font(&declarations)),
    }
}

/// Resolve the single border declaration that applies.
fn extract_border(declarations: &Declarations) -> Option<Border> {
    BORDER_PROPERTIES.iter().find_map(|&property| {
        let value = declarations.get(property).filter(|v| !v.is_empty())?;
        let side = border_side(value);
        Some(match property {
            "border-left" => Border::left(side),
            "border-right" => Border::right(side),
            "border-top" => Border::top(side),
            "border-bottom" => Border::bottom(side),
            _ => Border::all(side),
        })
    })
}

/// Map a border value to a side.
fn border_side(value: &str) -> Side {
    if value == THIN_BORDER {
        Side::new(BorderWeight::Thin)
    } else if SOLID_BLACK_BORDER.is_match(value) {
        Side::new(BorderWeight::Medium)
    } else {
        Side::plain()
    }
}

fn extract_alignment(declarations: &Declarations) -> Alignment {
    let wrap_text = match declarations.get("word-wrap").map(String::as_str) {
        Some("break-word") => Some(true),
        Some("normal") => Some(false),
        _ => None,
    };

    Alignment {
        horizontal: declarations.get("text-align").cloned(),
        wrap_text,
    }
}

fn extract_font(declarations: &Declarations) -> Font {
    Font {
        bold: declarations.get("font-weight").map(String::as_str) == Some("bold"),
    }
}

/// Row height in pixels from a `<tr>` style attribute.
///
/// `line-height` is consulted first, then `height`. Returns `None` when
/// neither is present or the value has no leading `<digits>px`.
pub fn extract_row_height(raw: Option<&str>) -> Option<u32> {
    let declarations = parse_declarations(raw);
    let value = declarations
        .get("line-height")
        .filter(|v| !v.is_empty())
        .or_else(|| declarations.get("height"))?;
    parse_css_pixels(value)
}

/// Leading `<digits>px` of a CSS value.
pub fn parse_css_pixels(value: &str) -> Option<u32> {
    CSS_PIXELS
        .captures(value.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// A pixel length from an HTML attribute such as `<col width="150px">`.
///
/// The `px` suffix is optional.
pub fn parse_pixel_attribute(value: &str) -> Option<u32> {
    ATTRIBUTE_PIXELS
        .captures(value.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
