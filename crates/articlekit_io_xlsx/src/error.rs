//! I/O kernel error type.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading a source workbook or writing an output one.
#[derive(Debug, Error)]
pub enum XlsxIoError {
    /// Source path does not resolve to an existing file.
    #[error("Excel file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exists but could not be opened or parsed as a workbook.
    #[error("Failed to read workbook {}: {message}", path.display())]
    Workbook {
        /// Workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },

    /// Requested worksheet is missing, or the workbook has no worksheet at all.
    #[error("Worksheet {sheet:?} not found in {}", path.display())]
    SheetNotFound {
        /// Workbook path.
        path: PathBuf,
        /// Requested sheet name (`<first>` when none was given).
        sheet: String,
    },

    /// Table does not fit on one Excel worksheet.
    #[error("{0}")]
    Bounds(String),

    /// Writer was used after [`crate::XlsxWriter::close`].
    #[error("Cannot write after close().")]
    Closed,

    /// Error reported by `rust_xlsxwriter`.
    #[error("xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}
