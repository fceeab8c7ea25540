//! Cell coordinates and merge ranges.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Last column index a worksheet can address (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;

/// A 1-based (row, column) grid coordinate.
///
/// Ordering is row-major, so a `BTreeMap<CellRef, _>` iterates in sheet order.
/// Serializes as its A1 string so it can be used as a JSON map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    /// Create a cell reference. Both indices are 1-based.
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Format as an A1-style reference (e.g. `B3`).
    pub fn to_a1(&self) -> String {
        format!("{}{}", column_letters(self.col), self.row)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Error::InvalidData(format!("Invalid cell reference: {}", s)))?;
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidData(format!("Invalid cell reference: {}", s)));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
            col = col
                .checked_mul(26)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| Error::InvalidData(format!("Column out of range: {}", s)))?;
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidData(format!("Invalid cell reference: {}", s)))?;
        if row == 0 {
            return Err(Error::InvalidData(format!("Invalid cell reference: {}", s)));
        }

        Ok(Self { row, col })
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> Self {
        cell.to_a1()
    }
}

impl TryFrom<String> for CellRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Convert a 1-based column index to its letter form (1 → `A`, 27 → `AA`).
pub fn column_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// An inclusive rectangular range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl MergeRange {
    /// Create a range from its top-left and bottom-right corners.
    pub fn new(start: CellRef, end: CellRef) -> Self {
        Self { start, end }
    }

    /// The range covered by a cell at `anchor` spanning `rowspan` × `colspan`.
    pub fn from_span(anchor: CellRef, rowspan: u32, colspan: u32) -> Self {
        Self {
            start: anchor,
            end: CellRef::new(
                anchor.row + rowspan.max(1) - 1,
                anchor.col + colspan.max(1) - 1,
            ),
        }
    }

    /// Check that the end corner does not lie above or left of the start.
    pub fn is_valid(&self) -> bool {
        self.start.row >= 1
            && self.start.col >= 1
            && self.end.row >= self.start.row
            && self.end.col >= self.start.col
    }

    /// Check if the range is a single cell.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        cell.row >= self.start.row
            && cell.row <= self.end.row
            && cell.col >= self.start.col
            && cell.col <= self.end.col
    }

    pub fn overlaps(&self, other: &MergeRange) -> bool {
        self.start.row <= other.end.row
            && other.start.row <= self.end.row
            && self.start.col <= other.end.col
            && other.start.col <= self.end.col
    }

    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> {
        let (start, end) = (self.start, self.end);
        (start.row..=end.row)
            .flat_map(move |row| (start.col..=end.col).map(move |col| CellRef::new(row, col)))
    }

    /// Format as an A1-style range (e.g. `A1:B2`).
    pub fn to_a1(&self) -> String {
        format!("{}:{}", self.start.to_a1(), self.end.to_a1())
    }
}

impl fmt::Display for MergeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
        assert_eq!(column_letters(703), "AAA");
    }

    #[test]
    fn test_a1_formatting() {
        assert_eq!(CellRef::new(1, 1).to_a1(), "A1");
        assert_eq!(CellRef::new(10, 28).to_a1(), "AB10");
        assert_eq!(CellRef::new(3, 2).to_string(), "B3");
    }

    #[test]
    fn test_a1_parsing() {
        assert_eq!("A1".parse::<CellRef>().unwrap(), CellRef::new(1, 1));
        assert_eq!("ab10".parse::<CellRef>().unwrap(), CellRef::new(10, 28));
        assert!("A0".parse::<CellRef>().is_err());
        assert!("10".parse::<CellRef>().is_err());
        assert!("A".parse::<CellRef>().is_err());
        assert!("A1B".parse::<CellRef>().is_err());
    }

    #[test]
    fn test_row_major_ordering() {
        assert!(CellRef::new(1, 5) < CellRef::new(2, 1));
        assert!(CellRef::new(2, 1) < CellRef::new(2, 2));
    }

    #[test]
    fn test_range_from_span() {
        let range = MergeRange::from_span(CellRef::new(2, 3), 2, 3);
        assert_eq!(range.to_a1(), "C2:E3");
        assert_eq!(range.row_count(), 2);
        assert_eq!(range.col_count(), 3);
        assert!(!range.is_single());

        let single = MergeRange::from_span(CellRef::new(1, 1), 1, 1);
        assert!(single.is_single());
    }

    #[test]
    fn test_range_contains_and_overlaps() {
        let a = MergeRange::new(CellRef::new(1, 1), CellRef::new(2, 2));
        let b = MergeRange::new(CellRef::new(2, 2), CellRef::new(3, 3));
        let c = MergeRange::new(CellRef::new(1, 3), CellRef::new(1, 4));

        assert!(a.contains(CellRef::new(2, 1)));
        assert!(!a.contains(CellRef::new(3, 1)));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_range_cells_row_major() {
        let range = MergeRange::new(CellRef::new(1, 1), CellRef::new(2, 2));
        let cells: Vec<String> = range.cells().map(|c| c.to_a1()).collect();
        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_serializes_as_a1_string() {
        let json = serde_json::to_string(&CellRef::new(2, 2)).unwrap();
        assert_eq!(json, "\"B2\"");
        let parsed: CellRef = serde_json::from_str("\"C4\"").unwrap();
        assert_eq!(parsed, CellRef::new(4, 3));
    }
}
