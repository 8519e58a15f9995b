//! XLSX constants and default preset factories.

use crate::spec::{SpecAutofitCellsPolicy, SpecCellFormat};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel column width upper bound (character units).
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Padding added to the widest literal of a column.
pub const N_WIDTH_CELL_PADDING_DEFAULT: usize = 2;

/// Build the header format: bold, everything else left to Excel defaults.
pub fn derive_default_header_format() -> SpecCellFormat {
    SpecCellFormat { bold: true }
}

/// Build the default autofit policy (`max literal length + 2`).
pub fn derive_default_autofit_policy() -> SpecAutofitCellsPolicy {
    SpecAutofitCellsPolicy::default()
}
