//! # tablexlsx
//!
//! Convert a styled HTML table into an XLSX spreadsheet.
//!
//! The first `<table>` of the input is laid out onto a single worksheet:
//! `colspan`/`rowspan` become merged ranges, `<colgroup>` widths become column
//! widths, row `height`/`line-height` become row heights, and a small subset of
//! inline CSS (borders, `text-align`, `word-wrap`, `font-weight`) becomes cell
//! formatting.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tablexlsx::{convert, convert_with_options, ConvertOptions};
//!
//! let html = r#"<table>
//!   <colgroup><col width="150px"><col width="75px"></colgroup>
//!   <tbody>
//!     <tr><td colspan="2" style="text-align: center; font-weight: bold">Totals</td></tr>
//!     <tr><td>Apples</td><td>12</td></tr>
//!   </tbody>
//! </table>"#;
//!
//! // Default options
//! let workbook = convert(html)?;
//! workbook.save("totals.xlsx")?;
//!
//! // With a default style applied beneath every cell's own CSS
//! let options = ConvertOptions::new()
//!     .with_default_css("border: 1px solid black")
//!     .with_sheet_title("Totals");
//! let bytes = convert_with_options(html, &options)?.to_xlsx()?;
//! # Ok::<(), tablexlsx::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`model`]: the in-memory workbook, cell coordinates and styles
//! - [`css`]: inline CSS parsing into styles
//! - [`units`]: pixel conversions and cell value typing
//! - [`layout`]: the table-to-grid layout engine
//! - [`xlsx`]: XLSX serialization
//! - [`render`]: JSON and plain text dumps

pub mod convert;
pub mod css;
pub mod error;
pub mod layout;
pub mod model;
pub mod options;
pub mod render;
pub mod units;
pub mod xlsx;

// Re-exports
pub use convert::{convert_file, convert_to_xlsx, convert_with_options};
pub use error::{Error, Result};
pub use model::{
    Alignment, Border, BorderWeight, Cell, CellRef, CellValue, Font, MergeRange, Side, Style,
    Workbook, Worksheet,
};
pub use options::ConvertOptions;

/// Convert the first table of an HTML document using default options.
///
/// # Example
///
/// ```
/// use tablexlsx::{convert, CellRef, CellValue};
///
/// let workbook = convert("<table><tr><td>1</td><td>1.5</td><td>x</td></tr></table>")?;
/// let sheet = workbook.active();
/// assert_eq!(sheet.value(CellRef::new(1, 1)), Some(&CellValue::Int(1)));
/// assert_eq!(sheet.value(CellRef::new(1, 2)), Some(&CellValue::Float(1.5)));
/// assert_eq!(sheet.value(CellRef::new(1, 3)), Some(&CellValue::from("x")));
/// # Ok::<(), tablexlsx::Error>(())
/// ```
pub fn convert(html: &str) -> Result<Workbook> {
    convert_with_options(html, &ConvertOptions::default())
}

/// Convert the first table of an HTML document, applying `default_style`
/// beneath every cell's own inline CSS.
pub fn convert_with_style(html: &str, default_style: &Style) -> Result<Workbook> {
    let options = ConvertOptions::new().with_default_style(default_style.clone());
    convert_with_options(html, &options)
}
