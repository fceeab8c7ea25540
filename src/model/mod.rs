//! Spreadsheet document model.
//!
//! This module defines the in-memory workbook the layout engine writes into:
//! cell coordinates, merge ranges, per-cell styles and sheet dimensions.
//! Serialization to a file format lives in [`crate::xlsx`].

mod cell_ref;
mod style;
mod workbook;

pub use cell_ref::*;
pub use style::*;
pub use workbook::*;
