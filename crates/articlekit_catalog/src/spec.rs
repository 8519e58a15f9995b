//! Catalog models, configuration records and top-level error types.

use std::fmt;
use std::path::PathBuf;

use articlekit_io_xlsx::{EnumCellValue, XlsxIoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conf::{
    C_FILE_ARTICLE_LIST_DEFAULT, C_HEADER_DESCRIPTION, C_HEADER_PRICE, C_HEADER_REFERENCE,
    C_PREFIX_ARTICLE_LIST, C_SHEET_TITLE_EXPORT, N_MAX_ENTRIES_PER_FILE_DEFAULT,
};

////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Fatal catalog failures. Library code returns these; only the binary maps
/// them to exit codes.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Source path does not resolve to an existing file.
    #[error("Excel file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Source exists but could not be parsed as a workbook.
    #[error("Failed to read workbook {}: {message}", path.display())]
    Workbook {
        /// Workbook path.
        path: PathBuf,
        /// Reader error text.
        message: String,
    },

    /// Requested worksheet missing, or workbook without any sheet.
    #[error("Worksheet {sheet:?} not found in {}", path.display())]
    SheetNotFound {
        /// Workbook path.
        path: PathBuf,
        /// Requested sheet name.
        sheet: String,
    },

    /// Output workbook could not be produced.
    #[error("{0}")]
    Xlsx(String),

    /// Layout or export configuration rejected before any I/O.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output directory preparation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<XlsxIoError> for CatalogError {
    fn from(err: XlsxIoError) -> Self {
        match err {
            XlsxIoError::NotFound(path) => Self::NotFound(path),
            XlsxIoError::Workbook { path, message } => Self::Workbook { path, message },
            XlsxIoError::SheetNotFound { path, sheet } => Self::SheetNotFound { path, sheet },
            other => Self::Xlsx(other.to_string()),
        }
    }
}

/// Non-fatal: a semantic column expected by a query is absent from the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaWarning {
    /// Missing field.
    pub field: EnumArticleField,
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning: '{}' column not found", self.field.label())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ArticleModel

/// Semantic fields of an article row, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumArticleField {
    /// Article reference code.
    Reference,
    /// Free-text description.
    Description,
    /// Family/category.
    Family,
    /// Sales unit.
    SalesUnit,
    /// Unit price.
    Price,
}

impl EnumArticleField {
    /// All fields in display order.
    pub const ALL: [EnumArticleField; 5] = [
        Self::Reference,
        Self::Description,
        Self::Family,
        Self::SalesUnit,
        Self::Price,
    ];

    /// Column label used in listings.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Reference => "Référence",
            Self::Description => "Désignation",
            Self::Family => "Famille",
            Self::SalesUnit => "Unité_vente",
            Self::Price => "Prix",
        }
    }
}

/// Positional column map of the article sheet.
///
/// Columns are 0-based. `None` means the source has no such column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecArticleLayout {
    /// Number of leading rows (title block and header) before data begins.
    pub row_data_start: usize,
    /// Reference column.
    pub col_reference: Option<usize>,
    /// Description column.
    pub col_description: Option<usize>,
    /// Family column.
    pub col_family: Option<usize>,
    /// Sales unit column.
    pub col_sales_unit: Option<usize>,
    /// Price column.
    pub col_price: Option<usize>,
}

impl Default for SpecArticleLayout {
    /// `LISTE ARTICLE.xlsx`: header on row 7, data from row 8.
    fn default() -> Self {
        Self {
            row_data_start: 7,
            col_reference: Some(0),
            col_description: Some(3),
            col_family: Some(10),
            col_sales_unit: Some(12),
            col_price: Some(17),
        }
    }
}

impl SpecArticleLayout {
    /// Declared column for `field`.
    pub fn column_of(&self, field: EnumArticleField) -> Option<usize> {
        match field {
            EnumArticleField::Reference => self.col_reference,
            EnumArticleField::Description => self.col_description,
            EnumArticleField::Family => self.col_family,
            EnumArticleField::SalesUnit => self.col_sales_unit,
            EnumArticleField::Price => self.col_price,
        }
    }
}

/// One normalized article. Identity is the row position, not the reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecArticleRecord {
    /// Reference code.
    pub reference: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Family/category.
    pub family: Option<String>,
    /// Sales unit.
    pub sales_unit: Option<String>,
    /// Raw price cell; see [`Self::price_value`] for the numeric view.
    pub price: EnumCellValue,
}

impl SpecArticleRecord {
    /// Price coerced to a number; `None` when blank or not numeric.
    pub fn price_value(&self) -> Option<f64> {
        self.price.to_f64()
    }

    /// Text of `field` (price rendered as text), `None` when empty.
    pub fn field_text(&self, field: EnumArticleField) -> Option<String> {
        match field {
            EnumArticleField::Reference => self.reference.clone(),
            EnumArticleField::Description => self.description.clone(),
            EnumArticleField::Family => self.family.clone(),
            EnumArticleField::SalesUnit => self.sales_unit.clone(),
            EnumArticleField::Price => self.price.to_text(),
        }
    }

    /// `true` when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.reference.is_none()
            && self.description.is_none()
            && self.family.is_none()
            && self.sales_unit.is_none()
            && self.price.is_empty()
    }
}

/// Aggregate price figures over coercible prices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecPriceStatistics {
    /// Number of records with a coercible price.
    pub cnt_priced: usize,
    /// Smallest price.
    pub min: Option<f64>,
    /// Largest price.
    pub max: Option<f64>,
    /// Arithmetic mean.
    pub mean: Option<f64>,
}

/// Table-level statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecArticleStatistics {
    /// Number of records, priced or not.
    pub total_count: usize,
    /// Column labels of the schema.
    pub columns: Vec<String>,
    /// Distinct non-empty families; `None` when the family column is absent.
    pub distinct_family_count: Option<usize>,
    /// Price figures; `None` when the price column is absent.
    pub price: Option<SpecPriceStatistics>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportModel

/// How many output files an export may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumFileCountPolicy {
    /// At most `n` files; rows past `n * max_entries_per_file` are dropped.
    FixedCap(usize),
    /// `ceil(rows / max_entries_per_file)` files.
    UnboundedByCeil,
}

/// One exported line: reference, description, normalized price.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecExportRow {
    /// Raw reference cell.
    pub reference: EnumCellValue,
    /// Raw description cell.
    pub description: EnumCellValue,
    /// Price with integral floats turned into integers.
    pub price: EnumCellValue,
}

impl SpecExportRow {
    /// Cells in output column order.
    pub fn to_cells(&self) -> Vec<EnumCellValue> {
        vec![
            self.reference.clone(),
            self.description.clone(),
            self.price.clone(),
        ]
    }
}

/// Contiguous slice of export rows bound to one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecExportChunk {
    /// 1-based file index.
    pub index_file: usize,
    /// Inclusive row start.
    pub row_start_inclusive: usize,
    /// Exclusive row end.
    pub row_end_exclusive: usize,
}

impl SpecExportChunk {
    /// Number of rows in the chunk.
    pub fn len(&self) -> usize {
        self.row_end_exclusive - self.row_start_inclusive
    }

    /// `true` for a chunk without rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Chunked export configuration.
///
/// Serializable so it can be layered from presets, TOML files and the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecExportConfig {
    /// Source workbook.
    pub path_file_in: PathBuf,
    /// Source sheet; first sheet when unset.
    #[serde(default)]
    pub sheet_name: Option<String>,
    /// Destination directory for output files.
    pub dir_out: PathBuf,
    /// Output file name prefix (`{prefix}_{n}.xlsx`).
    pub prefix_file_out: String,
    /// 1-based header row; data begins on the next row.
    pub row_header: usize,
    /// Reference column (0-based).
    pub col_reference: usize,
    /// Description column (0-based).
    pub col_description: usize,
    /// Price column (0-based).
    pub col_price: usize,
    /// Output header labels.
    pub headers: [String; 3],
    /// Output sheet title.
    pub sheet_title: String,
    /// Row cap per output file.
    pub max_entries_per_file: usize,
    /// File cap; `None` means `ceil(rows / max_entries_per_file)` files.
    #[serde(default)]
    pub max_files: Option<usize>,
}

impl Default for SpecExportConfig {
    fn default() -> Self {
        Self {
            path_file_in: PathBuf::from(C_FILE_ARTICLE_LIST_DEFAULT),
            sheet_name: None,
            dir_out: PathBuf::from("."),
            prefix_file_out: C_PREFIX_ARTICLE_LIST.to_string(),
            row_header: 7,
            col_reference: 0,
            col_description: 3,
            col_price: 17,
            headers: [
                C_HEADER_REFERENCE.to_string(),
                C_HEADER_DESCRIPTION.to_string(),
                C_HEADER_PRICE.to_string(),
            ],
            sheet_title: C_SHEET_TITLE_EXPORT.to_string(),
            max_entries_per_file: N_MAX_ENTRIES_PER_FILE_DEFAULT,
            max_files: None,
        }
    }
}

impl SpecExportConfig {
    /// File-count policy derived from `max_files`.
    pub fn rule_file_count(&self) -> EnumFileCountPolicy {
        match self.max_files {
            Some(n) => EnumFileCountPolicy::FixedCap(n),
            None => EnumFileCountPolicy::UnboundedByCeil,
        }
    }

    /// 0-based grid index of the first data row.
    pub fn row_data_start(&self) -> usize {
        self.row_header
    }

    /// Output path of the `index_file`-th file (1-based).
    pub fn derive_path_file_out(&self, index_file: usize) -> PathBuf {
        self.dir_out
            .join(format!("{}_{index_file}.xlsx", self.prefix_file_out))
    }

    /// Reject configurations that cannot produce a meaningful export.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.max_entries_per_file == 0 {
            return Err(CatalogError::InvalidConfig(
                "`max_entries_per_file` must be >= 1.".to_string(),
            ));
        }
        if self.max_files == Some(0) {
            return Err(CatalogError::InvalidConfig(
                "`max_files` must be >= 1 or unset.".to_string(),
            ));
        }
        if self.row_header == 0 {
            return Err(CatalogError::InvalidConfig(
                "`row_header` is 1-based and must be >= 1.".to_string(),
            ));
        }
        if self.prefix_file_out.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "`prefix_file_out` must not be empty.".to_string(),
            ));
        }
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xlsx_not_found_maps_to_catalog_not_found() {
        let err: CatalogError = XlsxIoError::NotFound(PathBuf::from("x.xlsx")).into();
        assert!(matches!(err, CatalogError::NotFound(p) if p == PathBuf::from("x.xlsx")));
    }

    #[test]
    fn schema_warning_names_the_column() {
        let warning = SchemaWarning {
            field: EnumArticleField::Family,
        };
        assert_eq!(warning.to_string(), "Warning: 'Famille' column not found");
    }

    #[test]
    fn export_config_paths_are_one_based() {
        let cfg = SpecExportConfig {
            dir_out: PathBuf::from("out"),
            prefix_file_out: "liste_article2".to_string(),
            ..SpecExportConfig::default()
        };
        assert_eq!(
            cfg.derive_path_file_out(1),
            PathBuf::from("out").join("liste_article2_1.xlsx")
        );
        assert_eq!(cfg.row_data_start(), 7);
    }

    #[test]
    fn export_config_validation() {
        assert!(SpecExportConfig::default().validate().is_ok());
        for cfg in [
            SpecExportConfig {
                max_entries_per_file: 0,
                ..SpecExportConfig::default()
            },
            SpecExportConfig {
                max_files: Some(0),
                ..SpecExportConfig::default()
            },
            SpecExportConfig {
                row_header: 0,
                ..SpecExportConfig::default()
            },
        ] {
            assert!(matches!(cfg.validate(), Err(CatalogError::InvalidConfig(_))));
        }
    }

    #[test]
    fn record_price_value_is_a_try_parse() {
        let record = SpecArticleRecord {
            price: EnumCellValue::String("sur devis".to_string()),
            ..Default::default()
        };
        assert_eq!(record.price_value(), None);
        assert!(!record.is_empty());
        assert!(SpecArticleRecord::default().is_empty());
    }
}
