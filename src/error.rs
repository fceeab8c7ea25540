//! Error types for the tablexlsx library.

use std::io;
use thiserror::Error;

/// Result type alias for tablexlsx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a table into a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error writing the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error writing XML content.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required HTML component is missing (e.g. no `<table>`).
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A value was written into a cell absorbed by a merge.
    #[error("Cell {0} is part of a merged range and cannot hold a value")]
    MergedCell(String),

    /// A merge range whose end lies before its start.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A merge range that overlaps an existing merge.
    #[error("Merge {new} overlaps existing merge {existing}")]
    OverlappingMerge {
        /// The rejected range
        new: String,
        /// The range already present on the sheet
        existing: String,
    },

    /// The merged-cell scan ran past the sheet's extent without finding a free cell.
    #[error("No writable cell found in row {row} after column {col}")]
    GhostScan {
        /// 1-based row being filled
        row: u32,
        /// 1-based column where the scan gave up
        col: u32,
    },

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
