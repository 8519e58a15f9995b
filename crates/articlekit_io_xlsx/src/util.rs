//! Stateless helper utilities used by the XLSX reader and writer kernels.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::error::XlsxIoError;
use crate::spec::{EnumCellValue, SpecAutofitCellsPolicy, SpecSheetTable};

////////////////////////////////////////////////////////////////////////////////
// #region RowChunking

/// Generate `(row_start, row_len)` chunks for `n_rows_total`.
///
/// Chunks are contiguous, in order, and all but the last hold exactly
/// `size_rows_chunk` rows. `n_rows_total == 0` yields no chunk.
pub fn generate_row_chunks(n_rows_total: usize, size_rows_chunk: usize) -> Vec<(usize, usize)> {
    let mut l_chunks = Vec::new();
    if size_rows_chunk == 0 {
        return l_chunks;
    }
    let mut n_row_cursor = 0;
    while n_row_cursor < n_rows_total {
        let n_rows_per_chunk = usize::min(size_rows_chunk, n_rows_total - n_row_cursor);
        l_chunks.push((n_row_cursor, n_rows_per_chunk));
        n_row_cursor += n_rows_per_chunk;
    }
    l_chunks
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Reject tables that do not fit on one worksheet (header row included).
pub fn validate_table_bounds(table: &SpecSheetTable) -> Result<(), XlsxIoError> {
    if table.width() > N_NCOLS_EXCEL_MAX {
        return Err(XlsxIoError::Bounds(format!(
            "Table too wide: width={} exceeds Excel limit {N_NCOLS_EXCEL_MAX}.",
            table.width()
        )));
    }
    if table.height() + 1 > N_NROWS_EXCEL_MAX {
        return Err(XlsxIoError::Bounds(format!(
            "Table too tall: height={} (+1 header row) exceeds Excel limit {N_NROWS_EXCEL_MAX}.",
            table.height()
        )));
    }
    if let Some((n_idx_row, row)) = table
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != table.width())
    {
        return Err(XlsxIoError::Bounds(format!(
            "Row {n_idx_row} has {} cells; expected {}.",
            row.len(),
            table.width()
        )));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Autofit

/// Literal width of one cell value, in characters.
///
/// Integral floats are measured without `.0`: `3700123456789.0` counts 13.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    value
        .to_text()
        .map_or(0, |c_text| c_text.chars().count())
}

/// Column widths: widest header-or-body literal plus padding, capped.
pub fn derive_column_widths(table: &SpecSheetTable, policy: &SpecAutofitCellsPolicy) -> Vec<usize> {
    let mut l_width_by_col: Vec<usize> = table
        .headers
        .iter()
        .map(|c_header| c_header.chars().count())
        .collect();

    for row in &table.rows {
        for (n_idx_col, value) in row.iter().enumerate().take(l_width_by_col.len()) {
            l_width_by_col[n_idx_col] =
                usize::max(l_width_by_col[n_idx_col], estimate_width_len(value));
        }
    }

    l_width_by_col
        .into_iter()
        .map(|n_width| usize::min(policy.width_cell_max, n_width + policy.width_cell_padding))
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
