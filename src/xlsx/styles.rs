//! Style table for xl/styles.xml.
//!
//! Fonts, borders and cell formats are deduplicated; index 0 of each list is
//! the unstyled default, so cells without a style need no `s` attribute.

use super::xml::{empty, end, into_string, new_writer, start};
use crate::error::Result;
use crate::model::{Alignment, Border, Font, Side, Style};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Writer;
use std::collections::HashMap;

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// Horizontal alignment keywords SpreadsheetML accepts.
const HORIZONTAL_KEYWORDS: [&str; 8] = [
    "general",
    "left",
    "center",
    "right",
    "fill",
    "justify",
    "centerContinuous",
    "distributed",
];

/// One entry of `cellXfs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct CellFormat {
    font_id: usize,
    border_id: usize,
    alignment: Option<Alignment>,
}

/// Collects the distinct styles used by a workbook.
#[derive(Debug)]
pub struct StyleTable {
    fonts: Vec<Font>,
    borders: Vec<Border>,
    formats: Vec<CellFormat>,
    by_style: HashMap<Style, u32>,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleTable {
    /// Create a table holding only the default entries.
    pub fn new() -> Self {
        Self {
            fonts: vec![Font::default()],
            borders: vec![Border::default()],
            formats: vec![CellFormat::default()],
            by_style: HashMap::new(),
        }
    }

    /// Register a style and return its `cellXfs` index.
    pub fn register(&mut self, style: &Style) -> u32 {
        if let Some(&id) = self.by_style.get(style) {
            return id;
        }

        let format = CellFormat {
            font_id: intern(&mut self.fonts, style.font.unwrap_or_default()),
            border_id: intern(&mut self.borders, style.border.unwrap_or_default()),
            alignment: style
                .alignment
                .as_ref()
                .map(supported_alignment)
                .filter(|a| !a.is_empty()),
        };
        let id = intern(&mut self.formats, format) as u32;
        self.by_style.insert(style.clone(), id);
        id
    }

    /// Number of distinct cell formats, including the default.
    pub fn format_count(&self) -> usize {
        self.formats.len()
    }

    /// Render xl/styles.xml.
    pub fn to_xml(&self) -> Result<String> {
        let mut w = new_writer()?;
        w.write_event(Event::Start(
            BytesStart::new("styleSheet").with_attributes([("xmlns", SPREADSHEET_NS)]),
        ))?;

        let count = self.fonts.len().to_string();
        w.write_event(Event::Start(
            BytesStart::new("fonts").with_attributes([("count", count.as_str())]),
        ))?;
        for font in &self.fonts {
            write_font(&mut w, font)?;
        }
        end(&mut w, "fonts")?;

        w.write_event(Event::Start(
            BytesStart::new("fills").with_attributes([("count", "2")]),
        ))?;
        for pattern in ["none", "gray125"] {
            start(&mut w, "fill")?;
            empty(&mut w, "patternFill", &[("patternType", pattern)])?;
            end(&mut w, "fill")?;
        }
        end(&mut w, "fills")?;

        let count = self.borders.len().to_string();
        w.write_event(Event::Start(
            BytesStart::new("borders").with_attributes([("count", count.as_str())]),
        ))?;
        for border in &self.borders {
            write_border(&mut w, border)?;
        }
        end(&mut w, "borders")?;

        w.write_event(Event::Start(
            BytesStart::new("cellStyleXfs").with_attributes([("count", "1")]),
        ))?;
        empty(
            &mut w,
            "xf",
            &[("numFmtId", "0"), ("fontId", "0"), ("fillId", "0"), ("borderId", "0")],
        )?;
        end(&mut w, "cellStyleXfs")?;

        let count = self.formats.len().to_string();
        w.write_event(Event::Start(
            BytesStart::new("cellXfs").with_attributes([("count", count.as_str())]),
        ))?;
        for format in &self.formats {
            write_format(&mut w, format)?;
        }
        end(&mut w, "cellXfs")?;

        w.write_event(Event::Start(
            BytesStart::new("cellStyles").with_attributes([("count", "1")]),
        ))?;
        empty(
            &mut w,
            "cellStyle",
            &[("name", "Normal"), ("xfId", "0"), ("builtinId", "0")],
        )?;
        end(&mut w, "cellStyles")?;

        end(&mut w, "styleSheet")?;
        into_string(w)
    }
}

/// Index of `item` in `list`, appending it first if absent.
fn intern<T: PartialEq>(list: &mut Vec<T>, item: T) -> usize {
    match list.iter().position(|existing| *existing == item) {
        Some(index) => index,
        None => {
            list.push(item);
            list.len() - 1
        }
    }
}

/// Drop horizontal keywords the file format cannot represent.
fn supported_alignment(alignment: &Alignment) -> Alignment {
    let horizontal = alignment.horizontal.as_deref().and_then(|keyword| {
        if HORIZONTAL_KEYWORDS.contains(&keyword) {
            Some(keyword.to_string())
        } else {
            log::warn!("text-align {:?} has no spreadsheet equivalent, dropping it", keyword);
            None
        }
    });

    Alignment {
        horizontal,
        wrap_text: alignment.wrap_text,
    }
}

fn write_font(w: &mut Writer<Vec<u8>>, font: &Font) -> Result<()> {
    start(w, "font")?;
    if font.bold {
        empty(w, "b", &[])?;
    }
    empty(w, "sz", &[("val", "11")])?;
    empty(w, "color", &[("theme", "1")])?;
    empty(w, "name", &[("val", "Calibri")])?;
    empty(w, "family", &[("val", "2")])?;
    empty(w, "scheme", &[("val", "minor")])?;
    end(w, "font")
}

fn write_border(w: &mut Writer<Vec<u8>>, border: &Border) -> Result<()> {
    start(w, "border")?;
    write_side(w, "left", border.left)?;
    write_side(w, "right", border.right)?;
    write_side(w, "top", border.top)?;
    write_side(w, "bottom", border.bottom)?;
    empty(w, "diagonal", &[])?;
    end(w, "border")
}

fn write_side(w: &mut Writer<Vec<u8>>, name: &str, side: Option<Side>) -> Result<()> {
    match side.and_then(|s| s.weight) {
        Some(weight) => {
            w.write_event(Event::Start(
                BytesStart::new(name).with_attributes([("style", weight.as_str())]),
            ))?;
            empty(w, "color", &[("rgb", "FF000000")])?;
            end(w, name)
        }
        None => empty(w, name, &[]),
    }
}

fn write_format(w: &mut Writer<Vec<u8>>, format: &CellFormat) -> Result<()> {
    let font_id = format.font_id.to_string();
    let border_id = format.border_id.to_string();
    let mut xf = BytesStart::new("xf").with_attributes([
        ("numFmtId", "0"),
        ("fontId", font_id.as_str()),
        ("fillId", "0"),
        ("borderId", border_id.as_str()),
        ("xfId", "0"),
    ]);
    if format.font_id > 0 {
        xf.push_attribute(("applyFont", "1"));
    }
    if format.border_id > 0 {
        xf.push_attribute(("applyBorder", "1"));
    }

    let Some(alignment) = &format.alignment else {
        w.write_event(Event::Empty(xf))?;
        return Ok(());
    };

    xf.push_attribute(("applyAlignment", "1"));
    w.write_event(Event::Start(xf))?;

    let mut element = BytesStart::new("alignment");
    if let Some(horizontal) = &alignment.horizontal {
        element.push_attribute(("horizontal", horizontal.as_str()));
    }
    if let Some(wrap) = alignment.wrap_text {
        element.push_attribute(("wrapText", if wrap { "1" } else { "0" }));
    }
    w.write_event(Event::Empty(element))?;
    end(w, "xf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_style_is_default_format() {
        let mut table = StyleTable::new();
        assert_eq!(table.register(&Style::default()), 0);
        assert_eq!(table.format_count(), 1);
    }

    #[test]
    fn test_register_deduplicates() {
        let mut table = StyleTable::new();
        let bold = Style::new().with_font(Font::bold());
        let boxed = Style::new().with_border(Border::all(Side::thin()));

        let a = table.register(&bold);
        let b = table.register(&boxed);
        assert_eq!(table.register(&bold), a);
        assert_ne!(a, b);
        assert_eq!(table.format_count(), 3);
    }

    #[test]
    fn test_equivalent_styles_share_format() {
        let mut table = StyleTable::new();
        // explicit non-bold font renders like no font at all
        let id = table.register(&Style::new().with_font(Font { bold: false }));
        assert_eq!(id, 0);
    }

    #[test]
    fn test_unsupported_horizontal_dropped() {
        let alignment = supported_alignment(&Alignment {
            horizontal: Some("start".to_string()),
            wrap_text: Some(true),
        });
        assert_eq!(alignment.horizontal, None);
        assert_eq!(alignment.wrap_text, Some(true));
    }

    #[test]
    fn test_styles_xml() {
        let mut table = StyleTable::new();
        table.register(
            &Style::new()
                .with_font(Font::bold())
                .with_border(Border::left(Side::medium()))
                .with_alignment(Alignment::horizontal("center")),
        );
        table.register(&Style::new().with_border(Border::top(Side::plain())));

        let xml = table.to_xml().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<fonts count="2">"#));
        assert!(xml.contains("<b/>"));
        assert!(xml.contains(r#"<left style="medium"><color rgb="FF000000"/></left>"#));
        assert!(xml.contains(r#"<cellXfs count="3">"#));
        assert!(xml.contains(r#"<alignment horizontal="center"/>"#));
        // a plain side is present but unstyled
        assert!(xml.contains(r#"<borders count="3">"#));
    }
}
