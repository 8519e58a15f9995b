//! XLSX writer kernel that turns in-memory tables into workbook output.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::warn;

use crate::conf::{derive_default_autofit_policy, derive_default_header_format};
use crate::error::XlsxIoError;
use crate::spec::{EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecSheetTable, SpecSheetWritten};
use crate::util::{derive_column_widths, sanitize_sheet_name, validate_table_bounds};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_header: SpecCellFormat,
    policy_autofit: SpecAutofitCellsPolicy,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path, with bold header and `+2` autofit.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_header: derive_default_header_format(),
            policy_autofit: derive_default_autofit_policy(),
            if_closed: false,
        }
    }

    /// Output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        Ok(())
    }

    /// Write one sheet: header row in header format, then body rows.
    pub fn write_sheet(
        &mut self,
        table: &SpecSheetTable,
        sheet_name: &str,
    ) -> Result<SpecSheetWritten, XlsxIoError> {
        if self.if_closed {
            return Err(XlsxIoError::Closed);
        }
        validate_table_bounds(table)?;

        let c_sheet_name_clean = sanitize_sheet_name(sheet_name, "_");
        if c_sheet_name_clean != sheet_name {
            warn!("Sheet name {sheet_name:?} sanitized to {c_sheet_name_clean:?}.");
        }
        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&c_sheet_name_clean)?;

        for (n_idx_col, c_header) in table.headers.iter().enumerate() {
            let n_col = cast_col_num(n_idx_col)?;
            if c_header.is_empty() {
                worksheet.write_blank(0, n_col, &fmt_header)?;
            } else {
                worksheet.write_string_with_format(0, n_col, c_header, &fmt_header)?;
            }
        }
        for (n_idx_row, row) in table.rows.iter().enumerate() {
            for (n_idx_col, value) in row.iter().enumerate() {
                write_cell(worksheet, n_idx_row + 1, n_idx_col, value)?;
            }
        }

        let mut l_widths_col = Vec::new();
        if self.policy_autofit.if_autofit {
            l_widths_col = derive_column_widths(table, &self.policy_autofit);
            for (n_idx_col, n_width) in l_widths_col.iter().enumerate() {
                worksheet.set_column_width(cast_col_num(n_idx_col)?, *n_width as f64)?;
            }
        }

        Ok(SpecSheetWritten {
            sheet_name: c_sheet_name_clean,
            cnt_rows: table.height(),
            widths_col: l_widths_col,
        })
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
) -> Result<(), XlsxIoError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        // Blank body cells stay absent from the sheet.
        EnumCellValue::None => {}
        EnumCellValue::String(val) => {
            worksheet.write_string(n_row, n_col, val)?;
        }
        EnumCellValue::Integer(val) => {
            worksheet.write_number(n_row, n_col, *val as f64)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number(n_row, n_col, *val)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();
    if spec.bold {
        format = format.set_bold();
    }
    format
}

fn cast_row_num(value: usize) -> Result<u32, XlsxIoError> {
    u32::try_from(value).map_err(|_| XlsxIoError::Bounds(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16, XlsxIoError> {
    u16::try_from(value).map_err(|_| XlsxIoError::Bounds(format!("column index overflow: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook};

    fn table_sample() -> SpecSheetTable {
        SpecSheetTable {
            headers: vec!["Référence".to_string(), "Prix".to_string()],
            rows: vec![
                vec![
                    EnumCellValue::String("ACB00001".to_string()),
                    EnumCellValue::Integer(10),
                ],
                vec![EnumCellValue::None, EnumCellValue::Number(10.5)],
            ],
        }
    }

    #[test]
    fn write_sheet_roundtrips_through_calamine() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("out.xlsx");

        let mut writer = XlsxWriter::new(path.clone());
        let sheet = writer
            .write_sheet(&table_sample(), "Liste d'articles")
            .expect("write sheet");
        writer.close().expect("close");

        assert_eq!(sheet.sheet_name, "Liste d'articles");
        assert_eq!(sheet.cnt_rows, 2);
        assert_eq!(sheet.widths_col, vec![11, 6]);

        let mut workbook: Xlsx<_> = open_workbook(&path).expect("open");
        let range = workbook.worksheet_range("Liste d'articles").expect("range");
        assert_eq!(range.get((0, 0)), Some(&Data::String("Référence".to_string())));
        assert_eq!(range.get((1, 1)), Some(&Data::Float(10.0)));
        assert_eq!(range.get((2, 1)), Some(&Data::Float(10.5)));
        assert_eq!(range.get((2, 0)), Some(&Data::Empty));
    }

    #[test]
    fn header_format_is_bold_only() {
        assert_eq!(
            derive_rust_xlsx_format(&derive_default_header_format()),
            Format::new().set_bold()
        );
        assert_eq!(derive_rust_xlsx_format(&SpecCellFormat::default()), Format::new());
    }

    #[test]
    fn write_sheet_sanitizes_illegal_names() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(tmp.path().join("names.xlsx"));
        let sheet = writer
            .write_sheet(&table_sample(), "Articles 2024/25")
            .expect("write sheet");
        assert_eq!(sheet.sheet_name, "Articles 2024_25");
        writer.close().expect("close");
    }

    #[test]
    fn write_after_close_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(tmp.path().join("closed.xlsx"));
        writer.close().expect("close");
        writer.close().expect("close is idempotent");
        assert!(matches!(
            writer.write_sheet(&table_sample(), "S"),
            Err(XlsxIoError::Closed)
        ));
    }
}
