//! HTML document to workbook assembly.

use crate::css::parse_pixel_attribute;
use crate::error::{Error, Result};
use crate::layout::fill_sheet;
use crate::model::{Workbook, Worksheet};
use crate::options::ConvertOptions;
use crate::units::width_pixels_to_units;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::sync::LazyLock;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
});

static TBODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tbody").expect("BUG: hardcoded selector 'tbody' is statically valid")
});

static COLGROUP_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("colgroup").expect("BUG: hardcoded selector 'colgroup' is statically valid")
});

static COL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("col").expect("BUG: hardcoded selector 'col' is statically valid")
});

/// Largest `<col span>` honoured; matches the HTML parsing limit.
const MAX_COL_SPAN: u32 = 1000;

/// Convert the first table of an HTML document with the given options.
pub fn convert_with_options(html: &str, options: &ConvertOptions) -> Result<Workbook> {
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| Error::MissingComponent("table".to_string()))?;

    let mut workbook = Workbook::with_sheet_title(options.sheet_title.clone());
    let sheet = workbook.active_mut();

    if options.apply_column_widths {
        apply_column_widths(sheet, table);
    }

    let body = table
        .select(&TBODY_SELECTOR)
        .next()
        .ok_or_else(|| Error::MissingComponent("tbody".to_string()))?;

    fill_sheet(sheet, body, &options.default_style)?;

    log::debug!(
        "converted table into {} rows x {} columns",
        sheet.max_row(),
        sheet.max_column()
    );
    Ok(workbook)
}

/// Read an HTML file and convert its first table.
pub fn convert_file(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<Workbook> {
    let html = std::fs::read_to_string(path)?;
    convert_with_options(&html, options)
}

/// Convert the first table of an HTML document straight to XLSX bytes.
pub fn convert_to_xlsx(html: &str, options: &ConvertOptions) -> Result<Vec<u8>> {
    convert_with_options(html, options)?.to_xlsx()
}

/// Apply `<col width>` values from the table's first `<colgroup>`.
///
/// Each `<col>` covers `span` columns (default 1). A missing or unparsable
/// width leaves those columns at the default width.
fn apply_column_widths(sheet: &mut Worksheet, table: ElementRef<'_>) {
    let Some(colgroup) = table.select(&COLGROUP_SELECTOR).next() else {
        return;
    };

    let mut column = 1u32;
    for col in colgroup.select(&COL_SELECTOR) {
        let span = col
            .value()
            .attr("span")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&n| n >= 1)
            .map_or(1, |n| n.min(MAX_COL_SPAN));

        match col.value().attr("width").and_then(parse_pixel_attribute) {
            Some(px) => {
                let width = width_pixels_to_units(f64::from(px));
                for offset in 0..span {
                    sheet.set_column_width(column + offset, width);
                }
            }
            None => log::debug!("column {} has no pixel width", column),
        }

        column += span;
    }
}
