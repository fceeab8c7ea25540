//! Output rendering for workbooks.
//!
//! Besides the XLSX package written by [`crate::xlsx`], a converted workbook
//! can be dumped as JSON or previewed as plain text.
//!
//! # Example
//!
//! ```no_run
//! use tablexlsx::render::{to_json, to_text, JsonFormat};
//!
//! let workbook = tablexlsx::convert("<table><tr><td>1</td></tr></table>")?;
//!
//! let json = to_json(&workbook, JsonFormat::Pretty)?;
//! let preview = to_text(workbook.active());
//! # Ok::<(), tablexlsx::Error>(())
//! ```

mod json;
mod text;

pub use json::{to_json, to_json_default, JsonFormat};
pub use text::to_text;
