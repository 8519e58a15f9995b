//! Loader/normalizer: raw worksheet grid -> ordered article records.

use std::collections::BTreeSet;
use std::path::Path;

use articlekit_io_xlsx::{SpecSheetGrid, read_sheet_grid};
use tracing::debug;

use crate::spec::{CatalogError, EnumArticleField, SpecArticleLayout, SpecArticleRecord};
use crate::util::select_cell;

/// Normalized article set plus the schema it was read with.
///
/// Immutable once built; queries live in [`crate::query`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArticleTable {
    pub(crate) l_records: Vec<SpecArticleRecord>,
    pub(crate) set_fields: BTreeSet<EnumArticleField>,
}

impl ArticleTable {
    /// Build a table from already-normalized records and a schema.
    pub fn new(
        l_records: Vec<SpecArticleRecord>,
        fields: impl IntoIterator<Item = EnumArticleField>,
    ) -> Self {
        Self {
            l_records,
            set_fields: fields.into_iter().collect(),
        }
    }

    /// All records in source row order.
    pub fn records(&self) -> &[SpecArticleRecord] {
        &self.l_records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.l_records.len()
    }

    /// `true` when no record survived normalization.
    pub fn is_empty(&self) -> bool {
        self.l_records.is_empty()
    }

    /// `true` when `field` is part of the schema.
    pub fn has_field(&self, field: EnumArticleField) -> bool {
        self.set_fields.contains(&field)
    }

    /// Schema fields in display order.
    pub fn fields(&self) -> Vec<EnumArticleField> {
        self.set_fields.iter().copied().collect()
    }

    /// Schema labels in display order.
    pub fn columns(&self) -> Vec<String> {
        self.set_fields
            .iter()
            .map(|field| field.label().to_string())
            .collect()
    }
}

/// Load and normalize the article sheet at `path`.
///
/// Fails with [`CatalogError::NotFound`] before opening anything when the
/// path is not an existing file.
pub fn load_article_table(
    path: &Path,
    layout: &SpecArticleLayout,
    sheet_name: Option<&str>,
) -> Result<ArticleTable, CatalogError> {
    if !path.is_file() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }
    let grid = read_sheet_grid(path, sheet_name)?;
    Ok(normalize_article_grid(&grid, layout))
}

/// Map grid columns to article fields and drop rows with every field empty.
///
/// A field belongs to the schema when the layout declares a column for it and
/// the sheet is wide enough to hold that column. Fields outside the schema
/// stay empty on every record.
pub fn normalize_article_grid(grid: &SpecSheetGrid, layout: &SpecArticleLayout) -> ArticleTable {
    let set_fields: BTreeSet<EnumArticleField> = EnumArticleField::ALL
        .into_iter()
        .filter(|field| {
            layout
                .column_of(*field)
                .is_some_and(|n_idx_col| n_idx_col < grid.width())
        })
        .collect();

    let col_of = |field: EnumArticleField| {
        if set_fields.contains(&field) {
            layout.column_of(field)
        } else {
            None
        }
    };
    let n_col_reference = col_of(EnumArticleField::Reference);
    let n_col_description = col_of(EnumArticleField::Description);
    let n_col_family = col_of(EnumArticleField::Family);
    let n_col_sales_unit = col_of(EnumArticleField::SalesUnit);
    let n_col_price = col_of(EnumArticleField::Price);

    let l_rows = grid.rows_from(layout.row_data_start);
    let l_records: Vec<SpecArticleRecord> = l_rows
        .iter()
        .map(|row| SpecArticleRecord {
            reference: select_cell(row, n_col_reference).to_text(),
            description: select_cell(row, n_col_description).to_text(),
            family: select_cell(row, n_col_family).to_text(),
            sales_unit: select_cell(row, n_col_sales_unit).to_text(),
            price: select_cell(row, n_col_price),
        })
        .filter(|record| !record.is_empty())
        .collect();

    debug!(
        rows_scanned = l_rows.len(),
        records = l_records.len(),
        fields = ?set_fields,
        "article grid normalized"
    );

    ArticleTable {
        l_records,
        set_fields,
    }
}
