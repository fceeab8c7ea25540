//! Layout engine: maps HTML table rows and cells onto worksheet coordinates.

mod cursor;
mod engine;

pub use cursor::GridCursor;
pub use engine::{fill_sheet, style_range};
