//! Query layer: pure searches and statistics over an [`ArticleTable`].

use std::collections::BTreeSet;

use tracing::warn;

use crate::loader::ArticleTable;
use crate::spec::{
    EnumArticleField, SchemaWarning, SpecArticleRecord, SpecArticleStatistics,
    SpecPriceStatistics,
};
use crate::util::contains_ignore_case;

/// Result of one search: matching records in source order plus warnings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportQuery {
    /// Matching records, in source row order.
    pub records: Vec<SpecArticleRecord>,
    /// Non-fatal schema warnings.
    pub warnings: Vec<SchemaWarning>,
}

impl ReportQuery {
    /// Number of matches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ArticleTable {
    /// Case-insensitive substring search on the reference.
    pub fn search_by_reference(&self, term: &str) -> ReportQuery {
        self.search_field(EnumArticleField::Reference, term)
    }

    /// Case-insensitive substring search on the description.
    pub fn search_by_description(&self, term: &str) -> ReportQuery {
        self.search_field(EnumArticleField::Description, term)
    }

    /// Case-insensitive substring filter on the family.
    pub fn filter_by_family(&self, term: &str) -> ReportQuery {
        self.search_field(EnumArticleField::Family, term)
    }

    /// First `n` records.
    pub fn head(&self, n: usize) -> &[SpecArticleRecord] {
        &self.l_records[..usize::min(n, self.l_records.len())]
    }

    /// Count, distinct families and price min/max/mean.
    ///
    /// Records whose price does not coerce to a number are left out of the
    /// price figures but still counted in `total_count`.
    pub fn compute_statistics(&self) -> SpecArticleStatistics {
        let distinct_family_count = self.has_field(EnumArticleField::Family).then(|| {
            self.l_records
                .iter()
                .filter_map(|record| record.family.as_deref())
                .collect::<BTreeSet<_>>()
                .len()
        });

        let price = self
            .has_field(EnumArticleField::Price)
            .then(|| derive_price_statistics(&self.l_records));

        SpecArticleStatistics {
            total_count: self.l_records.len(),
            columns: self.columns(),
            distinct_family_count,
            price,
        }
    }

    fn search_field(&self, field: EnumArticleField, term: &str) -> ReportQuery {
        if !self.has_field(field) {
            let warning = SchemaWarning { field };
            warn!("{warning}");
            return ReportQuery {
                records: vec![],
                warnings: vec![warning],
            };
        }

        let records = self
            .l_records
            .iter()
            .filter(|record| {
                record
                    .field_text(field)
                    .is_some_and(|c_text| contains_ignore_case(&c_text, term))
            })
            .cloned()
            .collect();

        ReportQuery {
            records,
            warnings: vec![],
        }
    }
}

fn derive_price_statistics(records: &[SpecArticleRecord]) -> SpecPriceStatistics {
    let l_prices: Vec<f64> = records
        .iter()
        .filter_map(SpecArticleRecord::price_value)
        .collect();
    if l_prices.is_empty() {
        return SpecPriceStatistics::default();
    }

    let n_min = l_prices.iter().copied().fold(f64::INFINITY, f64::min);
    let n_max = l_prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n_mean = l_prices.iter().sum::<f64>() / l_prices.len() as f64;

    SpecPriceStatistics {
        cnt_priced: l_prices.len(),
        min: Some(n_min),
        max: Some(n_max),
        mean: Some(n_mean),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use articlekit_io_xlsx::EnumCellValue;

    fn record(reference: Option<&str>, family: Option<&str>, price: EnumCellValue) -> SpecArticleRecord {
        SpecArticleRecord {
            reference: reference.map(str::to_string),
            description: reference.map(|c_ref| format!("Article {c_ref}")),
            family: family.map(str::to_string),
            sales_unit: None,
            price,
        }
    }

    fn table_sample() -> ArticleTable {
        ArticleTable::new(
            vec![
                record(Some("ACB00001"), Some("ACB"), EnumCellValue::Integer(5)),
                record(None, Some("BIC"), EnumCellValue::None),
                record(Some("acb00002"), Some("ACB"), EnumCellValue::Number(15.0)),
                record(Some("XYZ"), None, EnumCellValue::String("n/a".to_string())),
            ],
            EnumArticleField::ALL,
        )
    }

    #[test]
    fn search_by_reference_is_case_insensitive_and_ordered() {
        let table = table_sample();
        let report = table.search_by_reference("ACB");

        assert!(report.warnings.is_empty());
        let l_refs: Vec<_> = report
            .records
            .iter()
            .map(|record| record.reference.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(l_refs, vec!["ACB00001", "acb00002"]);
    }

    #[test]
    fn search_results_are_a_subset_containing_the_term() {
        let table = table_sample();
        for term in ["a", "B0", "xyz", "", "nothing"] {
            let report = table.search_by_reference(term);
            for hit in &report.records {
                assert!(table.records().contains(hit));
                let c_ref = hit.reference.as_deref().expect("empty references never match");
                assert!(c_ref.to_lowercase().contains(&term.to_lowercase()));
            }
        }
    }

    #[test]
    fn empty_term_matches_every_non_empty_reference() {
        let report = table_sample().search_by_reference("");
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn filter_by_family_and_description() {
        let table = table_sample();
        assert_eq!(table.filter_by_family("acb").len(), 2);
        assert_eq!(table.filter_by_family("bic").len(), 1);
        assert_eq!(table.search_by_description("article xyz").len(), 1);
    }

    #[test]
    fn missing_field_returns_empty_result_with_warning() {
        let table = ArticleTable::new(
            table_sample().records().to_vec(),
            [EnumArticleField::Reference, EnumArticleField::Price],
        );
        let report = table.filter_by_family("ACB");

        assert!(report.is_empty());
        assert_eq!(
            report.warnings,
            vec![SchemaWarning {
                field: EnumArticleField::Family
            }]
        );
    }

    #[test]
    fn statistics_skip_uncoercible_prices() {
        let table = ArticleTable::new(
            vec![
                record(Some("A"), Some("F1"), EnumCellValue::Integer(5)),
                record(Some("B"), Some("F1"), EnumCellValue::None),
                record(Some("C"), Some("F2"), EnumCellValue::Number(15.0)),
            ],
            EnumArticleField::ALL,
        );
        let stats = table.compute_statistics();

        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.distinct_family_count, Some(2));
        let price = stats.price.expect("price column present");
        assert_eq!(price.cnt_priced, 2);
        assert_eq!(price.min, Some(5.0));
        assert_eq!(price.max, Some(15.0));
        assert_eq!(price.mean, Some(10.0));
    }

    #[test]
    fn statistics_without_any_coercible_price_are_undefined() {
        let table = ArticleTable::new(
            vec![record(Some("A"), None, EnumCellValue::String("?".to_string()))],
            EnumArticleField::ALL,
        );
        let price = table.compute_statistics().price.expect("price column present");
        assert_eq!(price, SpecPriceStatistics::default());
        assert_eq!(price.mean, None);
    }

    #[test]
    fn statistics_report_unavailable_families() {
        let table = ArticleTable::new(
            table_sample().records().to_vec(),
            [EnumArticleField::Reference],
        );
        let stats = table.compute_statistics();
        assert_eq!(stats.distinct_family_count, None);
        assert_eq!(stats.price, None);
        assert_eq!(stats.columns, vec!["Référence"]);
    }

    #[test]
    fn head_is_bounded_by_length() {
        let table = table_sample();
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(50).len(), 4);
    }
}
