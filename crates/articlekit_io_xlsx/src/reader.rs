//! Worksheet reader: loads one sheet into an in-memory cell grid.
//!
//! The grid is addressed in absolute sheet coordinates: row 0 is spreadsheet
//! row 1 and column 0 is column `A`, even when the used range of the sheet
//! starts further down or to the right. Callers map columns by position, so
//! offsets must not shift with the first non-empty cell.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::XlsxIoError;
use crate::spec::EnumCellValue;

/// Rectangular cell grid read from a worksheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetGrid {
    rows: Vec<Vec<EnumCellValue>>,
    width: usize,
}

impl SpecSheetGrid {
    /// Build a grid from rows; shorter rows are padded with blanks.
    pub fn from_rows(mut rows: Vec<Vec<EnumCellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, EnumCellValue::None);
        }
        Self { rows, width }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// All rows in sheet order.
    pub fn rows(&self) -> &[Vec<EnumCellValue>] {
        &self.rows
    }

    /// Rows starting at 0-based index `n_row_start` (empty when out of range).
    pub fn rows_from(&self, n_row_start: usize) -> &[Vec<EnumCellValue>] {
        self.rows.get(n_row_start..).unwrap_or(&[])
    }

    /// Cell at `(row, col)`; out-of-range positions read as blank.
    pub fn cell(&self, n_idx_row: usize, n_idx_col: usize) -> &EnumCellValue {
        static BLANK: EnumCellValue = EnumCellValue::None;
        self.rows
            .get(n_idx_row)
            .and_then(|row| row.get(n_idx_col))
            .unwrap_or(&BLANK)
    }
}

/// Read one worksheet of `path` into a [`SpecSheetGrid`].
///
/// `sheet_name = None` selects the first sheet of the workbook. The format
/// (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`) is detected from the extension.
pub fn read_sheet_grid(path: &Path, sheet_name: Option<&str>) -> Result<SpecSheetGrid, XlsxIoError> {
    if !path.is_file() {
        return Err(XlsxIoError::NotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|err| XlsxIoError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let range = match sheet_name {
        Some(c_name) => {
            if !workbook.sheet_names().iter().any(|c_sheet| c_sheet == c_name) {
                return Err(XlsxIoError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: c_name.to_string(),
                });
            }
            workbook
                .worksheet_range(c_name)
                .map_err(|err| XlsxIoError::Workbook {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                })?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| XlsxIoError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: "<first>".to_string(),
            })?
            .map_err(|err| XlsxIoError::Workbook {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?,
    };

    let grid = derive_grid_from_range(&range);
    debug!(
        path = %path.display(),
        height = grid.height(),
        width = grid.width(),
        "worksheet loaded"
    );
    Ok(grid)
}

/// Place a calamine range into absolute sheet coordinates.
fn derive_grid_from_range(range: &Range<Data>) -> SpecSheetGrid {
    let Some((n_row_start, n_col_start)) = range.start() else {
        return SpecSheetGrid::default();
    };
    let n_row_start = n_row_start as usize;
    let n_col_start = n_col_start as usize;

    let mut l_rows: Vec<Vec<EnumCellValue>> = vec![Vec::new(); n_row_start];
    for row in range.rows() {
        let mut l_cells = vec![EnumCellValue::None; n_col_start];
        l_cells.extend(row.iter().map(convert_cell_value_from_data));
        l_rows.push(l_cells);
    }

    SpecSheetGrid::from_rows(l_rows)
}

/// Convert one calamine cell into the kernel cell model.
pub fn convert_cell_value_from_data(value: &Data) -> EnumCellValue {
    match value {
        Data::Empty => EnumCellValue::None,
        Data::String(s) if s.is_empty() => EnumCellValue::None,
        Data::String(s) => EnumCellValue::String(s.clone()),
        Data::Int(n) => EnumCellValue::Integer(*n),
        Data::Float(n) => EnumCellValue::Number(*n),
        Data::Bool(b) => EnumCellValue::String(if *b { "True" } else { "False" }.to_string()),
        _ => EnumCellValue::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn read_sheet_grid_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("absent.xlsx");
        assert!(matches!(
            read_sheet_grid(&path, None),
            Err(XlsxIoError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn read_sheet_grid_keeps_absolute_coordinates() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(2, 1, "title").expect("write");
        worksheet.write_number(4, 3, 10.5).expect("write");
        workbook.save(&path).expect("save");

        let grid = read_sheet_grid(&path, None).expect("read");
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.cell(2, 1), &EnumCellValue::String("title".to_string()));
        assert_eq!(grid.cell(4, 3), &EnumCellValue::Number(10.5));
        assert_eq!(grid.cell(0, 0), &EnumCellValue::None);
        assert_eq!(grid.cell(99, 99), &EnumCellValue::None);
    }

    #[test]
    fn read_sheet_grid_unknown_sheet_is_reported() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("named.xlsx");

        let mut workbook = Workbook::new();
        workbook
            .add_worksheet()
            .set_name("Articles")
            .expect("name")
            .write_string(0, 0, "x")
            .expect("write");
        workbook.save(&path).expect("save");

        assert!(read_sheet_grid(&path, Some("Articles")).is_ok());
        assert!(matches!(
            read_sheet_grid(&path, Some("Missing")),
            Err(XlsxIoError::SheetNotFound { .. })
        ));
    }

    #[test]
    fn from_rows_pads_short_rows() {
        let grid = SpecSheetGrid::from_rows(vec![
            vec![EnumCellValue::Integer(1)],
            vec![EnumCellValue::None, EnumCellValue::None, EnumCellValue::Integer(3)],
        ]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.rows()[0].len(), 3);
        assert!(grid.rows_from(5).is_empty());
    }

    #[test]
    fn convert_cell_value_from_data_maps_variants() {
        assert_eq!(convert_cell_value_from_data(&Data::Empty), EnumCellValue::None);
        assert_eq!(
            convert_cell_value_from_data(&Data::String(String::new())),
            EnumCellValue::None
        );
        assert_eq!(convert_cell_value_from_data(&Data::Int(4)), EnumCellValue::Integer(4));
        assert_eq!(
            convert_cell_value_from_data(&Data::Bool(true)),
            EnumCellValue::String("True".to_string())
        );
    }
}
