//! Table-to-grid layout.

use super::cursor::GridCursor;
use crate::css::{extract_row_height, extract_style};
use crate::error::Result;
use crate::model::{Border, MergeRange, Style, Worksheet};
use crate::units::{height_pixels_to_units, parse_cell_value};
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("BUG: hardcoded selector 'tr' is statically valid")
});

static TD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td").expect("BUG: hardcoded selector 'td' is statically valid")
});

/// Largest colspan honoured; matches the HTML parsing limit.
const MAX_COLSPAN: u32 = 1000;

/// Largest rowspan honoured; matches the HTML parsing limit.
const MAX_ROWSPAN: u32 = 65534;

/// Lay out every `<tr>` under `body` onto `sheet`.
///
/// Row `n` of the body fills sheet row `n`; cells are placed left to right,
/// skipping positions already covered by an earlier merge.
pub fn fill_sheet(sheet: &mut Worksheet, body: ElementRef<'_>, default_style: &Style) -> Result<()> {
    let mut cursor = GridCursor::new();

    for row in body.select(&TR_SELECTOR) {
        fill_row(sheet, &mut cursor, row, default_style)?;
        cursor.next_row();
    }

    log::debug!(
        "filled {} rows, {} merges on sheet {:?}",
        cursor.row(),
        sheet.merges.len(),
        sheet.title
    );
    Ok(())
}

fn fill_row(
    sheet: &mut Worksheet,
    cursor: &mut GridCursor,
    row: ElementRef<'_>,
    default_style: &Style,
) -> Result<()> {
    if let Some(px) = extract_row_height(row.value().attr("style")) {
        sheet.set_row_height(cursor.position().row, height_pixels_to_units(f64::from(px)));
    }

    for cell in row.select(&TD_SELECTOR) {
        let target = cursor.advance_past_merged(sheet)?;

        if let Some(value) = parse_cell_value(&cell_text(cell)) {
            log::trace!("{} = {:?}", target, value);
            sheet.set_value(target, value)?;
        }

        let colspan = span_attribute(cell, "colspan", MAX_COLSPAN);
        let rowspan = span_attribute(cell, "rowspan", MAX_ROWSPAN);
        let style = default_style.union(&extract_style(cell.value().attr("style")));

        if colspan > 1 || rowspan > 1 {
            let range = MergeRange::from_span(target, rowspan, colspan);
            log::debug!("merging {}", range);
            style_range(sheet, range, &style)?;
        } else {
            sheet.set_style(target, style);
        }

        cursor.advance_by(colspan);
    }

    Ok(())
}

/// Merge `range` and apply `style` to it.
///
/// Alignment and font go on the anchor cell only. Border sides are drawn on
/// the perimeter: the top side along the first row, the bottom side along the
/// last row, left and right along the outer columns. Sides are stacked onto
/// whatever border those cells already carry; interior cells are untouched.
pub fn style_range(sheet: &mut Worksheet, range: MergeRange, style: &Style) -> Result<()> {
    sheet.merge(range)?;
    let anchor = range.start;

    if let Some(alignment) = &style.alignment {
        sheet.style_mut(anchor).alignment = Some(alignment.clone());
    }
    if let Some(font) = style.font {
        sheet.style_mut(anchor).font = Some(font);
    }

    let Some(border) = style.border else {
        return Ok(());
    };

    for cell in range.cells() {
        let mut edge = Border::default();
        if cell.row == range.start.row {
            edge.top = border.top;
        }
        if cell.row == range.end.row {
            edge.bottom = border.bottom;
        }
        if cell.col == range.start.col {
            edge.left = border.left;
        }
        if cell.col == range.end.col {
            edge.right = border.right;
        }
        if edge.is_empty() {
            continue;
        }

        let target = sheet.style_mut(cell);
        target.border = Some(target.border.unwrap_or_default().combine(&edge));
    }

    Ok(())
}

/// Trimmed text content of a cell.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// A positive span attribute, defaulting to 1.
fn span_attribute(cell: ElementRef<'_>, name: &str, max: u32) -> u32 {
    let Some(raw) = cell.value().attr(name) else {
        return 1;
    };

    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n.min(max),
        _ => {
            log::warn!("ignoring invalid {}={:?}, using 1", name, raw);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, CellRef, CellValue, Font, Side};
    use scraper::Html;

    static TBODY_SELECTOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("tbody").unwrap());

    fn layout(html: &str, default_style: &Style) -> Worksheet {
        let document = Html::parse_document(html);
        let body = document.select(&TBODY_SELECTOR).next().unwrap();
        let mut sheet = Worksheet::new("Sheet");
        fill_sheet(&mut sheet, body, default_style).unwrap();
        sheet
    }

    fn at(row: u32, col: u32) -> CellRef {
        CellRef::new(row, col)
    }

    #[test]
    fn test_plain_grid() {
        let sheet = layout(
            "<table><tbody><tr><td>a</td><td>1</td></tr><tr><td>2.5</td><td></td></tr></tbody></table>",
            &Style::default(),
        );
        assert_eq!(sheet.value(at(1, 1)), Some(&CellValue::from("a")));
        assert_eq!(sheet.value(at(1, 2)), Some(&CellValue::Int(1)));
        assert_eq!(sheet.value(at(2, 1)), Some(&CellValue::Float(2.5)));
        assert_eq!(sheet.value(at(2, 2)), None);
        assert!(sheet.merges.is_empty());
    }

    #[test]
    fn test_colspan_merge() {
        let sheet = layout(
            r#"<table><tbody>
                <tr><td colspan="2">head</td></tr>
                <tr><td>x</td><td>y</td></tr>
            </tbody></table>"#,
            &Style::default(),
        );
        assert_eq!(sheet.merges, vec![MergeRange::new(at(1, 1), at(1, 2))]);
        assert_eq!(sheet.value(at(2, 1)), Some(&CellValue::from("x")));
        assert_eq!(sheet.value(at(2, 2)), Some(&CellValue::from("y")));
    }

    #[test]
    fn test_rowspan_shifts_next_row() {
        let sheet = layout(
            r#"<table><tbody>
                <tr><td rowspan="2">tall</td><td>b1</td></tr>
                <tr><td>b2</td></tr>
            </tbody></table>"#,
            &Style::default(),
        );
        assert_eq!(sheet.merges, vec![MergeRange::new(at(1, 1), at(2, 1))]);
        assert_eq!(sheet.value(at(2, 2)), Some(&CellValue::from("b2")));
        assert_eq!(sheet.value(at(2, 1)), None);
    }

    #[test]
    fn test_block_merge_and_interleaved_ghosts() {
        let sheet = layout(
            r#"<table><tbody>
                <tr><td>a</td><td colspan="2" rowspan="2">big</td><td>d</td></tr>
                <tr><td>e</td><td>h</td></tr>
                <tr><td>1</td><td>2</td><td>3</td><td>4</td></tr>
            </tbody></table>"#,
            &Style::default(),
        );
        assert_eq!(sheet.merges, vec![MergeRange::new(at(1, 2), at(2, 3))]);
        assert_eq!(sheet.value(at(1, 4)), Some(&CellValue::from("d")));
        assert_eq!(sheet.value(at(2, 1)), Some(&CellValue::from("e")));
        assert_eq!(sheet.value(at(2, 4)), Some(&CellValue::from("h")));
        assert_eq!(sheet.value(at(3, 4)), Some(&CellValue::Int(4)));
    }

    #[test]
    fn test_row_height() {
        let sheet = layout(
            r#"<table><tbody>
                <tr style="height: 20px"><td>a</td></tr>
                <tr><td>b</td></tr>
                <tr style="line-height: 40px; height: 10px"><td>c</td></tr>
            </tbody></table>"#,
            &Style::default(),
        );
        assert_eq!(sheet.row_height(1), Some(15.0));
        assert_eq!(sheet.row_height(2), None);
        assert_eq!(sheet.row_height(3), Some(30.0));
    }

    #[test]
    fn test_single_cell_gets_full_style() {
        let default = Style::new()
            .with_border(Border::all(Side::thin()))
            .with_alignment(Alignment::horizontal("left"));
        let sheet = layout(
            r#"<table><tbody><tr>
                <td>plain</td>
                <td style="text-align: center; font-weight: bold">styled</td>
            </tr></tbody></table>"#,
            &default,
        );

        assert_eq!(sheet.style(at(1, 1)), default);

        let styled = sheet.style(at(1, 2));
        assert_eq!(styled.border, Some(Border::all(Side::thin())));
        assert_eq!(styled.alignment, Some(Alignment::horizontal("center")));
        assert_eq!(styled.font, Some(Font::bold()));
    }

    #[test]
    fn test_invalid_spans_fall_back_to_one() {
        let sheet = layout(
            r#"<table><tbody><tr><td colspan="0">a</td><td colspan="x">b</td><td>c</td></tr></tbody></table>"#,
            &Style::default(),
        );
        assert!(sheet.merges.is_empty());
        assert_eq!(sheet.value(at(1, 3)), Some(&CellValue::from("c")));
    }

    #[test]
    fn test_style_range_perimeter_borders() {
        let mut sheet = Worksheet::new("Sheet");
        let range = MergeRange::new(at(1, 1), at(3, 3));
        let style = Style::new()
            .with_border(Border::all(Side::medium()))
            .with_alignment(Alignment::horizontal("center"))
            .with_font(Font::bold());

        style_range(&mut sheet, range, &style).unwrap();

        let corner = sheet.style(at(1, 1));
        assert_eq!(corner.alignment, Some(Alignment::horizontal("center")));
        assert_eq!(corner.font, Some(Font::bold()));
        let border = corner.border.unwrap();
        assert_eq!(border.top, Some(Side::medium()));
        assert_eq!(border.left, Some(Side::medium()));
        assert_eq!(border.right, None);
        assert_eq!(border.bottom, None);

        let bottom_right = sheet.style(at(3, 3)).border.unwrap();
        assert_eq!(bottom_right.bottom, Some(Side::medium()));
        assert_eq!(bottom_right.right, Some(Side::medium()));
        assert_eq!(bottom_right.top, None);

        let top_middle = sheet.style(at(1, 2));
        assert_eq!(top_middle.border, Some(Border::top(Side::medium())));
        assert_eq!(top_middle.alignment, None);

        assert!(sheet.style(at(2, 2)).is_empty());
    }

    #[test]
    fn test_style_range_stacks_onto_existing_border() {
        let mut sheet = Worksheet::new("Sheet");
        sheet.style_mut(at(1, 2)).border = Some(Border::bottom(Side::thin()));

        let style = Style::new().with_border(Border::top(Side::medium()));
        style_range(&mut sheet, MergeRange::new(at(1, 1), at(1, 2)), &style).unwrap();

        let border = sheet.style(at(1, 2)).border.unwrap();
        assert_eq!(border.top, Some(Side::medium()));
        assert_eq!(border.bottom, Some(Side::thin()));
    }

    #[test]
    fn test_style_range_without_style_still_merges() {
        let mut sheet = Worksheet::new("Sheet");
        style_range(&mut sheet, MergeRange::new(at(1, 1), at(2, 1)), &Style::default()).unwrap();
        assert_eq!(sheet.merges.len(), 1);
        assert!(sheet.cells.is_empty());
    }
}
