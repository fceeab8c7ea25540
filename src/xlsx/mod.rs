//! XLSX (Excel) workbook writer.
//!
//! This module serializes the in-memory [`Workbook`](crate::model::Workbook)
//! to the Office Open XML (.xlsx) format.
//!
//! # Example
//!
//! ```no_run
//! use tablexlsx::model::{CellRef, Workbook};
//!
//! let mut workbook = Workbook::new();
//! workbook.active_mut().set_value(CellRef::new(1, 1), "Total")?;
//! tablexlsx::xlsx::save(&workbook, "report.xlsx")?;
//! # Ok::<(), tablexlsx::Error>(())
//! ```

mod styles;
mod writer;
mod xml;

pub use styles::StyleTable;
pub use writer::{save, to_bytes, XlsxWriter};
