//! Inline CSS micro-parser.
//!
//! Only a small subset of properties is understood:
//!
//! - `border`, `border-left`, `border-right`, `border-top`, `border-bottom`
//! - `text-align`
//! - `word-wrap`
//! - `font-weight`
//! - `line-height` / `height` on table rows
//!
//! # Example
//!
//! ```
//! use tablexlsx::css::extract_style;
//! use tablexlsx::model::{Border, Side};
//!
//! let style = extract_style(Some("border: 1px solid black; font-weight: bold"));
//! assert_eq!(style.border, Some(Border::all(Side::thin())));
//! assert!(style.font.unwrap().bold);
//! ```

mod declarations;
mod extract;

pub use declarations::{parse_declarations, Declarations};
pub use extract::{
    extract_row_height, extract_style, parse_css_pixels, parse_pixel_attribute,
};
