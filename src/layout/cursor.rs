//! Grid cursor over the worksheet being filled.

use crate::error::{Error, Result};
use crate::model::{CellRef, MergeRange, Worksheet, MAX_COLUMN};

/// Tracks the next grid position while table rows are laid out.
///
/// Offsets are 0-based internally; [`GridCursor::position`] reports the
/// 1-based cell they address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridCursor {
    row: u32,
    col: u32,
    /// Merges covering the current row, collected on its first scan.
    row_merges: Option<Vec<MergeRange>>,
}

impl GridCursor {
    /// A cursor at the first cell of the first row.
    pub fn new() -> Self {
        Self::default()
    }

    /// 0-based row offset.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// 0-based column offset.
    pub fn col(&self) -> u32 {
        self.col
    }

    /// The 1-based cell under the cursor.
    pub fn position(&self) -> CellRef {
        CellRef::new(self.row + 1, self.col + 1)
    }

    /// Move right past cells absorbed into earlier merges and return the
    /// first writable cell.
    ///
    /// Each ghost cell jumps the cursor to the column after the merge that
    /// absorbed it, so a row costs one pass over the merges covering it.
    /// Merges added while the row is being filled start at or left of the
    /// cursor and never hide cells to its right, so the row's merge list is
    /// read from the sheet once. Running past the last sheet column is an
    /// error.
    pub fn advance_past_merged(&mut self, sheet: &Worksheet) -> Result<CellRef> {
        let row = self.row + 1;
        let merges = self
            .row_merges
            .get_or_insert_with(|| sheet.merges_in_row(row).copied().collect());

        loop {
            let here = CellRef::new(row, self.col + 1);
            let Some(merge) = merges.iter().find(|m| m.contains(here) && m.start != here) else {
                return Ok(here);
            };
            if merge.end.col >= MAX_COLUMN {
                return Err(Error::GhostScan {
                    row,
                    col: merge.end.col,
                });
            }
            self.col = merge.end.col;
        }
    }

    /// Move right by a cell's colspan.
    pub fn advance_by(&mut self, colspan: u32) {
        self.col += colspan.max(1);
    }

    /// Start the next row at column 0.
    pub fn next_row(&mut self) {
        self.row += 1;
        self.col = 0;
        self.row_merges = None;
    }
}
