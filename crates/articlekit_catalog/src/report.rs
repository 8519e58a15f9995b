//! Export report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// One output file written by an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportedFile {
    /// 1-based file index.
    pub index_file: usize,
    /// Written path.
    pub path_file_out: PathBuf,
    /// Data rows in the file (header excluded).
    pub cnt_rows: usize,
    /// Final column widths.
    pub widths_col: Vec<usize>,
}

impl fmt::Display for SpecExportedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saved {} with {} entries",
            self.path_file_out.display(),
            self.cnt_rows
        )
    }
}

/// Aggregate counters and diagnostics for one export run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportExport {
    /// Raw rows after the header row.
    pub cnt_rows_scanned: u64,
    /// Rows kept by the non-empty row rule.
    pub cnt_rows_extracted: u64,
    /// Rows written across all files.
    pub cnt_rows_written: u64,
    /// Rows left out by a fixed file cap.
    pub cnt_rows_dropped: u64,
    /// Files written, in order.
    pub files: Vec<SpecExportedFile>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportExport {
    /// Number of files written.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_rows_scanned".to_string(), self.cnt_rows_scanned);
        dict_counts.insert("cnt_rows_extracted".to_string(), self.cnt_rows_extracted);
        dict_counts.insert("cnt_rows_written".to_string(), self.cnt_rows_written);
        dict_counts.insert("cnt_rows_dropped".to_string(), self.cnt_rows_dropped);
        dict_counts.insert("cnt_files".to_string(), self.file_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} extracted={} written={} dropped={} files={} warnings={}",
            dict_counts["cnt_rows_scanned"],
            dict_counts["cnt_rows_extracted"],
            dict_counts["cnt_rows_written"],
            dict_counts["cnt_rows_dropped"],
            dict_counts["cnt_files"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[EXPORT]"))
    }
}

/// Mutable accumulator for export statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportExportBuilder {
    /// See [`ReportExport::cnt_rows_scanned`].
    pub cnt_rows_scanned: u64,
    /// See [`ReportExport::cnt_rows_extracted`].
    pub cnt_rows_extracted: u64,
    /// See [`ReportExport::cnt_rows_dropped`].
    pub cnt_rows_dropped: u64,
    /// See [`ReportExport::files`].
    pub files: Vec<SpecExportedFile>,
    /// See [`ReportExport::warnings`].
    pub warnings: Vec<String>,
}

impl ReportExportBuilder {
    /// Record one written file.
    pub fn add_file(&mut self, file: SpecExportedFile) {
        self.files.push(file);
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportExport {
        let cnt_rows_written = self.files.iter().map(|file| file.cnt_rows as u64).sum();
        ReportExport {
            cnt_rows_scanned: self.cnt_rows_scanned,
            cnt_rows_extracted: self.cnt_rows_extracted,
            cnt_rows_written,
            cnt_rows_dropped: self.cnt_rows_dropped,
            files: self.files,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_export_to_dict_and_format() {
        let mut builder = ReportExportBuilder {
            cnt_rows_scanned: 12,
            cnt_rows_extracted: 10,
            cnt_rows_dropped: 2,
            ..Default::default()
        };
        builder.add_file(SpecExportedFile {
            index_file: 1,
            path_file_out: PathBuf::from("liste_article_1.xlsx"),
            cnt_rows: 8,
            widths_col: vec![11, 13, 10],
        });
        builder.add_warning("w".to_string());
        let report = builder.build();

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_rows_written"], 8);
        assert_eq!(dict_counts["cnt_files"], 1);
        assert_eq!(
            report.to_string(),
            "[EXPORT] scanned=12 extracted=10 written=8 dropped=2 files=1 warnings=1"
        );
        assert_eq!(
            report.files[0].to_string(),
            "Saved liste_article_1.xlsx with 8 entries"
        );
    }
}
