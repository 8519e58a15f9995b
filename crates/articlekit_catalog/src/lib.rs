//! `articlekit_catalog` v1:
//! Article catalog normalization, queries and chunked export.
//!
//! Module layout:
//! - `conf`   : constants and export presets
//! - `spec`   : records/layouts/configs/errors
//! - `loader` : worksheet grid -> [`ArticleTable`]
//! - `query`  : searches and statistics over an [`ArticleTable`]
//! - `export` : chunked workbook export
//! - `report` : export run report
//! - `util`   : shared helper functions

pub mod conf;
pub mod export;
pub mod loader;
pub mod query;
pub mod report;
pub mod spec;
mod util;

pub use articlekit_io_xlsx::EnumCellValue;
pub use conf::{
    N_MAX_ENTRIES_PER_FILE_DEFAULT, N_QUERY_LIMIT_DEFAULT, N_SUMMARY_ROWS_DEFAULT,
    derive_preset_article_list, derive_preset_price_list,
};
pub use export::{
    export_chunked_files, extract_export_rows, normalize_export_price, plan_export_chunks,
    run_export,
};
pub use loader::{ArticleTable, load_article_table, normalize_article_grid};
pub use query::ReportQuery;
pub use report::{ReportExport, ReportExportBuilder, SpecExportedFile};
pub use spec::{
    CatalogError, EnumArticleField, EnumFileCountPolicy, SchemaWarning, SpecArticleLayout,
    SpecArticleRecord, SpecArticleStatistics, SpecExportChunk, SpecExportConfig, SpecExportRow,
    SpecPriceStatistics,
};
