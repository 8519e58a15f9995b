//! Catalog constants and export presets.

use std::path::PathBuf;

use crate::spec::SpecExportConfig;

/// Default article list workbook.
pub const C_FILE_ARTICLE_LIST_DEFAULT: &str = "LISTE ARTICLE.xlsx";
/// Default price list workbook.
pub const C_FILE_PRICE_LIST_DEFAULT: &str = "liste_article.xlsx";
/// Output prefix of the article list export.
pub const C_PREFIX_ARTICLE_LIST: &str = "liste_article2";
/// Output prefix of the price list export.
pub const C_PREFIX_PRICE_LIST: &str = "liste_article";
/// Output sheet title.
pub const C_SHEET_TITLE_EXPORT: &str = "Liste d'articles";

/// Export header: reference.
pub const C_HEADER_REFERENCE: &str = "Référence";
/// Export header: description.
pub const C_HEADER_DESCRIPTION: &str = "Désignation";
/// Export header: price (article list).
pub const C_HEADER_PRICE: &str = "Prix";
/// Export header: price incl. tax (price list).
pub const C_HEADER_PRICE_TTC: &str = "Prix TTC";

/// Row cap per exported file.
pub const N_MAX_ENTRIES_PER_FILE_DEFAULT: usize = 2000;
/// File cap of the price list export.
pub const N_MAX_FILES_PRICE_LIST: usize = 5;
/// Default result limit for listings.
pub const N_QUERY_LIMIT_DEFAULT: usize = 50;
/// Rows shown by the summary when no action is requested.
pub const N_SUMMARY_ROWS_DEFAULT: usize = 10;

/// Price list: title on row 1, header on row 2, columns A/B/D, five files max.
pub fn derive_preset_price_list() -> SpecExportConfig {
    SpecExportConfig {
        path_file_in: PathBuf::from(C_FILE_PRICE_LIST_DEFAULT),
        prefix_file_out: C_PREFIX_PRICE_LIST.to_string(),
        row_header: 2,
        col_reference: 0,
        col_description: 1,
        col_price: 3,
        headers: [
            C_HEADER_REFERENCE.to_string(),
            C_HEADER_DESCRIPTION.to_string(),
            C_HEADER_PRICE_TTC.to_string(),
        ],
        max_files: Some(N_MAX_FILES_PRICE_LIST),
        ..SpecExportConfig::default()
    }
}

/// Article list: header on row 7, columns A/D/R, as many files as needed.
pub fn derive_preset_article_list() -> SpecExportConfig {
    SpecExportConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::EnumFileCountPolicy;

    #[test]
    fn presets_differ_only_in_layout_and_file_policy() {
        let cfg_price = derive_preset_price_list();
        let cfg_article = derive_preset_article_list();

        assert_eq!(
            (cfg_price.col_reference, cfg_price.col_description, cfg_price.col_price),
            (0, 1, 3)
        );
        assert_eq!(
            (cfg_article.col_reference, cfg_article.col_description, cfg_article.col_price),
            (0, 3, 17)
        );
        assert_eq!(cfg_price.rule_file_count(), EnumFileCountPolicy::FixedCap(5));
        assert_eq!(cfg_article.rule_file_count(), EnumFileCountPolicy::UnboundedByCeil);
        assert_eq!(cfg_price.max_entries_per_file, cfg_article.max_entries_per_file);
        assert_eq!(cfg_price.sheet_title, cfg_article.sheet_title);
    }
}
