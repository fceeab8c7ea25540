//! In-memory spreadsheet document.

use super::{CellRef, MergeRange, Style};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Default worksheet title for new workbooks.
pub const DEFAULT_SHEET_TITLE: &str = "Sheet";

/// A scalar cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Check if the value is numeric.
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }

    /// Get the text if this is a string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// A stored cell: optional value plus style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,

    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub style: Style,
}

impl Cell {
    /// Check if the cell carries neither a value nor a style.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.style.is_empty()
    }
}

/// A single worksheet.
///
/// Cells absorbed into a merge ("ghost" cells) can still carry a style, so
/// borders can be drawn along a merged range's perimeter, but they never hold
/// a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    /// Sheet title
    pub title: String,

    /// Stored cells, keyed by coordinate
    #[serde(default)]
    pub cells: BTreeMap<CellRef, Cell>,

    /// Merged ranges in creation order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merges: Vec<MergeRange>,

    /// Column widths in character units, keyed by 1-based column
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub column_widths: BTreeMap<u32, f64>,

    /// Row heights in points, keyed by 1-based row
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub row_heights: BTreeMap<u32, f64>,
}

impl Worksheet {
    /// Create an empty worksheet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// The merge range that contains `cell`, if any.
    pub fn merge_at(&self, cell: CellRef) -> Option<&MergeRange> {
        self.merges.iter().find(|m| m.contains(cell))
    }

    /// Merges whose rows include `row`.
    pub fn merges_in_row(&self, row: u32) -> impl Iterator<Item = &MergeRange> {
        self.merges
            .iter()
            .filter(move |m| m.start.row <= row && row <= m.end.row)
    }

    /// Check if `cell` was absorbed into a merge and is not its anchor.
    pub fn is_merged_away(&self, cell: CellRef) -> bool {
        self.merge_at(cell).is_some_and(|m| m.start != cell)
    }

    /// Write a value. Ghost cells reject values.
    pub fn set_value(&mut self, cell: CellRef, value: impl Into<CellValue>) -> Result<()> {
        if self.is_merged_away(cell) {
            return Err(Error::MergedCell(cell.to_a1()));
        }
        self.cells.entry(cell).or_default().value = Some(value.into());
        Ok(())
    }

    /// Get the value of a cell.
    pub fn value(&self, cell: CellRef) -> Option<&CellValue> {
        self.cells.get(&cell).and_then(|c| c.value.as_ref())
    }

    /// Get the style of a cell (empty when the cell was never styled).
    pub fn style(&self, cell: CellRef) -> Style {
        self.cells
            .get(&cell)
            .map(|c| c.style.clone())
            .unwrap_or_default()
    }

    /// Replace the whole style of a cell.
    pub fn set_style(&mut self, cell: CellRef, style: Style) {
        self.cells.entry(cell).or_default().style = style;
    }

    /// Mutable access to a cell's style, creating the cell if needed.
    pub fn style_mut(&mut self, cell: CellRef) -> &mut Style {
        &mut self.cells.entry(cell).or_default().style
    }

    /// Get a stored cell.
    pub fn cell(&self, cell: CellRef) -> Option<&Cell> {
        self.cells.get(&cell)
    }

    /// Merge a rectangular range.
    ///
    /// The anchor keeps its value; values under the other cells are dropped.
    pub fn merge(&mut self, range: MergeRange) -> Result<()> {
        if !range.is_valid() {
            return Err(Error::InvalidRange(range.to_a1()));
        }
        if let Some(existing) = self.merges.iter().find(|m| m.overlaps(&range)) {
            return Err(Error::OverlappingMerge {
                new: range.to_a1(),
                existing: existing.to_a1(),
            });
        }

        for cell in range.cells().skip(1) {
            if let Some(stored) = self.cells.get_mut(&cell) {
                stored.value = None;
            }
        }
        self.merges.push(range);
        Ok(())
    }

    /// Set a column width in character units.
    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// Set a row height in points.
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    /// Highest row used by a cell or merge (0 for an empty sheet).
    pub fn max_row(&self) -> u32 {
        let cells = self.cells.keys().map(|c| c.row).max().unwrap_or(0);
        let merges = self.merges.iter().map(|m| m.end.row).max().unwrap_or(0);
        cells.max(merges)
    }

    /// Highest column used by a cell or merge (0 for an empty sheet).
    pub fn max_column(&self) -> u32 {
        let cells = self.cells.keys().map(|c| c.col).max().unwrap_or(0);
        let merges = self.merges.iter().map(|m| m.end.col).max().unwrap_or(0);
        cells.max(merges)
    }

    /// Check if the sheet has no cells and no merges.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.merges.is_empty()
    }

    /// Iterate over the cells of one row that carry a value or style.
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells
            .range(CellRef::new(row, 0)..=CellRef::new(row, u32::MAX))
            .filter(|(_, c)| !c.is_empty())
    }
}

/// A workbook with one or more worksheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Worksheets in tab order
    pub sheets: Vec<Worksheet>,

    /// Index of the active worksheet
    #[serde(default)]
    pub active: usize,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook {
    /// Create a workbook with a single empty worksheet.
    pub fn new() -> Self {
        Self::with_sheet_title(DEFAULT_SHEET_TITLE)
    }

    /// Create a workbook whose single worksheet has the given title.
    pub fn with_sheet_title(title: impl Into<String>) -> Self {
        Self {
            sheets: vec![Worksheet::new(title)],
            active: 0,
        }
    }

    /// The active worksheet.
    pub fn active(&self) -> &Worksheet {
        &self.sheets[self.active_index()]
    }

    /// Mutable access to the active worksheet.
    pub fn active_mut(&mut self) -> &mut Worksheet {
        let index = self.active_index();
        &mut self.sheets[index]
    }

    fn active_index(&self) -> usize {
        self.active.min(self.sheets.len().saturating_sub(1))
    }

    /// Serialize to XLSX bytes.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        crate::xlsx::to_bytes(self)
    }

    /// Write the workbook to an `.xlsx` file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::xlsx::save(self, path)
    }
}
