//! Chunked exporter: raw worksheet grid -> sequence of capped-size workbooks.
//!
//! One configurable component covers both source layouts; the layouts differ
//! only in [`SpecExportConfig`] (header row, column map, file-count policy).
//! Files are written one at a time and each is closed before the next starts,
//! so an interrupted run leaves every earlier file complete.

use std::fs;

use articlekit_io_xlsx::{
    EnumCellValue, SpecSheetGrid, SpecSheetTable, XlsxWriter, derive_integral_i64,
    generate_row_chunks, read_sheet_grid,
};
use tracing::{debug, info, warn};

use crate::report::{ReportExport, ReportExportBuilder, SpecExportedFile};
use crate::spec::{
    CatalogError, EnumFileCountPolicy, SpecExportChunk, SpecExportConfig, SpecExportRow,
};
use crate::util::{is_row_non_empty, select_cell};

/// Turn an integral float into an integer; leave every other value untouched.
///
/// `10.0 -> 10`, `10.5 -> 10.5`, blank stays blank, text stays text.
pub fn normalize_export_price(value: EnumCellValue) -> EnumCellValue {
    match value {
        EnumCellValue::Number(n) => match derive_integral_i64(n) {
            Some(n_int) => EnumCellValue::Integer(n_int),
            None => EnumCellValue::Number(n),
        },
        other => other,
    }
}

/// Extract export rows from the data part of `grid`.
///
/// A raw row is kept when any of its cells is non-empty, mapped or not.
pub fn extract_export_rows(grid: &SpecSheetGrid, config: &SpecExportConfig) -> Vec<SpecExportRow> {
    grid.rows_from(config.row_data_start())
        .iter()
        .filter(|row| is_row_non_empty(row))
        .map(|row| SpecExportRow {
            reference: select_cell(row, Some(config.col_reference)),
            description: select_cell(row, Some(config.col_description)),
            price: normalize_export_price(select_cell(row, Some(config.col_price))),
        })
        .collect()
}

/// Partition `n_rows_total` rows into per-file chunks.
///
/// All chunks but the last hold exactly `max_entries_per_file` rows; no empty
/// chunk is ever produced. Under [`EnumFileCountPolicy::FixedCap`] the plan
/// stops after `n` chunks.
pub fn plan_export_chunks(
    n_rows_total: usize,
    max_entries_per_file: usize,
    rule_file_count: EnumFileCountPolicy,
) -> Vec<SpecExportChunk> {
    let l_chunks = generate_row_chunks(n_rows_total, max_entries_per_file)
        .into_iter()
        .enumerate()
        .map(|(n_idx, (n_row_start, n_len))| SpecExportChunk {
            index_file: n_idx + 1,
            row_start_inclusive: n_row_start,
            row_end_exclusive: n_row_start + n_len,
        });

    match rule_file_count {
        EnumFileCountPolicy::FixedCap(n_files_max) => l_chunks.take(n_files_max).collect(),
        EnumFileCountPolicy::UnboundedByCeil => l_chunks.collect(),
    }
}

/// Export `grid` into chunked workbooks under `config.dir_out`.
///
/// `on_file` is called once per file, right after it is closed.
pub fn export_chunked_files<F>(
    grid: &SpecSheetGrid,
    config: &SpecExportConfig,
    mut on_file: F,
) -> Result<ReportExport, CatalogError>
where
    F: FnMut(&SpecExportedFile),
{
    config.validate()?;

    let l_rows_export = extract_export_rows(grid, config);
    let l_chunks = plan_export_chunks(
        l_rows_export.len(),
        config.max_entries_per_file,
        config.rule_file_count(),
    );

    let mut builder = ReportExportBuilder {
        cnt_rows_scanned: grid.rows_from(config.row_data_start()).len() as u64,
        cnt_rows_extracted: l_rows_export.len() as u64,
        ..Default::default()
    };

    let n_rows_planned = l_chunks.last().map_or(0, |chunk| chunk.row_end_exclusive);
    let n_rows_dropped = l_rows_export.len() - n_rows_planned;
    if n_rows_dropped > 0 {
        let c_msg = format!(
            "File cap reached: {n_rows_dropped} rows after row {n_rows_planned} were not exported."
        );
        warn!("{c_msg}");
        builder.cnt_rows_dropped = n_rows_dropped as u64;
        builder.add_warning(c_msg);
    }
    debug!(
        rows = l_rows_export.len(),
        files = l_chunks.len(),
        "export planned"
    );

    if !l_chunks.is_empty() {
        fs::create_dir_all(&config.dir_out)?;
    }

    for chunk in l_chunks {
        let table = SpecSheetTable {
            headers: config.headers.to_vec(),
            rows: l_rows_export[chunk.row_start_inclusive..chunk.row_end_exclusive]
                .iter()
                .map(SpecExportRow::to_cells)
                .collect(),
        };

        let mut writer = XlsxWriter::new(config.derive_path_file_out(chunk.index_file));
        let sheet = writer.write_sheet(&table, &config.sheet_title)?;
        writer.close()?;

        let file = SpecExportedFile {
            index_file: chunk.index_file,
            path_file_out: writer.file_out().to_path_buf(),
            cnt_rows: chunk.len(),
            widths_col: sheet.widths_col,
        };
        info!(path = %file.path_file_out.display(), rows = file.cnt_rows, "file written");
        on_file(&file);
        builder.add_file(file);
    }

    Ok(builder.build())
}

/// Read `config.path_file_in` and export it.
///
/// Fails with [`CatalogError::NotFound`] before opening anything when the
/// source path is not an existing file.
pub fn run_export<F>(config: &SpecExportConfig, on_file: F) -> Result<ReportExport, CatalogError>
where
    F: FnMut(&SpecExportedFile),
{
    config.validate()?;
    if !config.path_file_in.is_file() {
        return Err(CatalogError::NotFound(config.path_file_in.clone()));
    }
    let grid = read_sheet_grid(&config.path_file_in, config.sheet_name.as_deref())?;
    export_chunked_files(&grid, config, on_file)
}
