//! Shared helper functions.

use articlekit_io_xlsx::EnumCellValue;

/// Case-insensitive substring test (Unicode lowercase on both sides).
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `true` when at least one cell of the row is non-empty.
pub fn is_row_non_empty(row: &[EnumCellValue]) -> bool {
    row.iter().any(|value| !value.is_empty())
}

/// Read column `n_idx_col` of `row`; `None` index or out-of-range reads blank.
pub fn select_cell(row: &[EnumCellValue], n_idx_col: Option<usize>) -> EnumCellValue {
    n_idx_col
        .and_then(|n_idx| row.get(n_idx))
        .cloned()
        .unwrap_or_default()
}
