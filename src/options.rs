//! Conversion options configuration.

use crate::css::extract_style;
use crate::model::{Style, DEFAULT_SHEET_TITLE};

/// Longest worksheet title Excel accepts.
const MAX_SHEET_TITLE_LEN: usize = 31;

/// Characters Excel forbids in worksheet titles.
const FORBIDDEN_TITLE_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Options for converting an HTML table into a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Style applied to every cell before its own inline CSS
    pub default_style: Style,

    /// Title of the generated worksheet
    pub sheet_title: String,

    /// Apply `<colgroup>` column widths
    pub apply_column_widths: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_style: Style::default(),
            sheet_title: DEFAULT_SHEET_TITLE.to_string(),
            apply_column_widths: true,
        }
    }
}

impl ConvertOptions {
    /// Create new convert options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default cell style.
    pub fn with_default_style(mut self, style: Style) -> Self {
        self.default_style = style;
        self
    }

    /// Set the default cell style from an inline CSS string.
    pub fn with_default_css(mut self, css: &str) -> Self {
        self.default_style = extract_style(Some(css));
        self
    }

    /// Set the worksheet title.
    ///
    /// Forbidden characters are removed and the title is cut to 31 characters.
    pub fn with_sheet_title(mut self, title: impl Into<String>) -> Self {
        self.sheet_title = sanitize_sheet_title(&title.into());
        self
    }

    /// Enable or disable the `<colgroup>` width pass.
    pub fn with_column_widths(mut self, apply: bool) -> Self {
        self.apply_column_widths = apply;
        self
    }
}

/// Make a title acceptable as an Excel worksheet name.
pub fn sanitize_sheet_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !FORBIDDEN_TITLE_CHARS.contains(c))
        .take(MAX_SHEET_TITLE_LEN)
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        DEFAULT_SHEET_TITLE.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Border, Side};

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert!(opts.default_style.is_empty());
        assert_eq!(opts.sheet_title, "Sheet");
        assert!(opts.apply_column_widths);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = ConvertOptions::new()
            .with_default_css("border: 1px solid black")
            .with_sheet_title("Report")
            .with_column_widths(false);

        assert_eq!(opts.default_style.border, Some(Border::all(Side::thin())));
        assert_eq!(opts.sheet_title, "Report");
        assert!(!opts.apply_column_widths);
    }

    #[test]
    fn test_sheet_title_sanitized() {
        assert_eq!(sanitize_sheet_title("Q1/Q2 [draft]"), "Q1Q2 draft");
        assert_eq!(sanitize_sheet_title("???"), "Sheet");
        assert_eq!(sanitize_sheet_title(&"x".repeat(40)).len(), 31);
    }
}
