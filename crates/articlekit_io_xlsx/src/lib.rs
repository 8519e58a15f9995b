//! `articlekit_io_xlsx` v1:
//! Rust-side spreadsheet I/O kernel.
//!
//! Module layout:
//! - `conf`   : constants and default presets
//! - `spec`   : cell/table models and reports
//! - `util`   : pure helper functions
//! - `reader` : worksheet -> cell grid (calamine)
//! - `writer` : cell table -> workbook (rust_xlsxwriter)
//! - `error`  : kernel error type
pub mod conf;
pub mod error;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_WIDTH_CELL_PADDING_DEFAULT,
    N_WIDTH_EXCEL_COLUMN_MAX, TUP_EXCEL_ILLEGAL,
};
pub use error::XlsxIoError;
pub use reader::{SpecSheetGrid, convert_cell_value_from_data, read_sheet_grid};
pub use spec::{
    EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecSheetTable, SpecSheetWritten,
    derive_integral_i64,
};
pub use util::{
    derive_column_widths, estimate_width_len, generate_row_chunks, sanitize_sheet_name,
    validate_table_bounds,
};
pub use writer::XlsxWriter;
