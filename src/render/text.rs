//! Plain text grid preview.

use crate::model::{CellRef, Worksheet};

/// Render a worksheet as tab-separated rows.
///
/// Every row up to the sheet's extent is emitted, padded to its full width;
/// cells absorbed into a merge render empty.
pub fn to_text(sheet: &Worksheet) -> String {
    let rows = sheet.max_row();
    let cols = sheet.max_column();
    let mut output = String::new();

    for row in 1..=rows {
        let line: Vec<String> = (1..=cols)
            .map(|col| {
                sheet
                    .value(CellRef::new(row, col))
                    .map(|v| v.to_string().replace(['\t', '\n'], " "))
                    .unwrap_or_default()
            })
            .collect();
        output.push_str(&line.join("\t"));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MergeRange;

    #[test]
    fn test_to_text_grid() {
        let mut sheet = Worksheet::new("Sheet");
        sheet.set_value(CellRef::new(1, 1), "Total").unwrap();
        sheet
            .merge(MergeRange::new(CellRef::new(1, 1), CellRef::new(1, 2)))
            .unwrap();
        sheet.set_value(CellRef::new(2, 1), 3i64).unwrap();
        sheet.set_value(CellRef::new(2, 2), "a\tb").unwrap();

        assert_eq!(to_text(&sheet), "Total\t\n3\ta b\n");
    }

    #[test]
    fn test_to_text_empty_sheet() {
        assert_eq!(to_text(&Worksheet::new("Sheet")), "");
    }
}
