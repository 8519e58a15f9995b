//! Shared XLSX cell, table and report models.

use crate::conf::{N_WIDTH_CELL_PADDING_DEFAULT, N_WIDTH_EXCEL_COLUMN_MAX};

////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// Normalized cell value, shared by the reader and the writer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Whole-number value.
    Integer(i64),
    /// Floating-point value.
    Number(f64),
}

impl EnumCellValue {
    /// `true` for blank cells.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Literal text of the value: integral floats drop `.0` (`3700123456789`),
    /// other floats keep full precision.
    ///
    /// Returns `None` for blank cells.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::String(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Number(n) => Some(match derive_integral_i64(*n) {
                Some(n_int) => n_int.to_string(),
                None => n.to_string(),
            }),
        }
    }

    /// Numeric view of the value; text is trimmed and parsed.
    ///
    /// Never fails: anything that is not a finite number yields `None`.
    pub fn to_f64(&self) -> Option<f64> {
        let n_value = match self {
            Self::None => return None,
            Self::Integer(n) => *n as f64,
            Self::Number(n) => *n,
            Self::String(s) => s.trim().parse::<f64>().ok()?,
        };
        n_value.is_finite().then_some(n_value)
    }
}

/// Return the integer equal to `x` when `x` is a finite whole number in `i64` range.
pub fn derive_integral_i64(x: f64) -> Option<i64> {
    if !x.is_finite() || x.fract() != 0.0 {
        return None;
    }
    if x < i64::MIN as f64 || x >= i64::MAX as f64 {
        return None;
    }
    Some(x as i64)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellFormat

/// Cell format of a written row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Bold style.
    pub bold: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Table

/// One worksheet worth of data: a single header row plus body rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetTable {
    /// Header labels, one per column.
    pub headers: Vec<String>,
    /// Body rows; each row has `headers.len()` cells.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecSheetTable {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of body rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Autofit policy for column width inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Disable autofit when `false`.
    pub if_autofit: bool,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            if_autofit: true,
            width_cell_padding: N_WIDTH_CELL_PADDING_DEFAULT,
            width_cell_max: N_WIDTH_EXCEL_COLUMN_MAX,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Report

/// One sheet emitted by a write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetWritten {
    /// Sheet name as written (after sanitizing).
    pub sheet_name: String,
    /// Number of body rows written.
    pub cnt_rows: usize,
    /// Final column widths (empty when autofit is disabled).
    pub widths_col: Vec<usize>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_f64_tolerates_non_numeric_text() {
        assert_eq!(EnumCellValue::String(" 12.5 ".to_string()).to_f64(), Some(12.5));
        assert_eq!(EnumCellValue::String("sur devis".to_string()).to_f64(), None);
        assert_eq!(EnumCellValue::String("NaN".to_string()).to_f64(), None);
        assert_eq!(EnumCellValue::Integer(7).to_f64(), Some(7.0));
        assert_eq!(EnumCellValue::None.to_f64(), None);
    }

    #[test]
    fn to_text_renders_integral_floats_without_suffix() {
        assert_eq!(
            EnumCellValue::Number(12345.0).to_text().as_deref(),
            Some("12345")
        );
        assert_eq!(
            EnumCellValue::Number(3_700_123_456_789.0).to_text().as_deref(),
            Some("3700123456789")
        );
        assert_eq!(EnumCellValue::Number(0.25).to_text().as_deref(), Some("0.25"));
        assert_eq!(EnumCellValue::Integer(10).to_text().as_deref(), Some("10"));
        assert_eq!(EnumCellValue::None.to_text(), None);
    }

    #[test]
    fn derive_integral_i64_rejects_fractions_and_non_finite() {
        assert_eq!(derive_integral_i64(10.0), Some(10));
        assert_eq!(derive_integral_i64(-3.0), Some(-3));
        assert_eq!(derive_integral_i64(10.5), None);
        assert_eq!(derive_integral_i64(f64::NAN), None);
        assert_eq!(derive_integral_i64(f64::INFINITY), None);
    }
}
