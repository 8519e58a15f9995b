//! Plain-text rendering of tables, statistics and summaries.

use std::fmt::Write as _;

use articlekit_catalog::{ArticleTable, EnumArticleField, SpecArticleRecord, SpecArticleStatistics};

const C_BANNER: &str =
    "================================================================================";
const C_EMPTY_LISTING: &str = "(no articles)";

/// Render `records` as a right-aligned text table over `fields`.
pub fn format_records(records: &[SpecArticleRecord], fields: &[EnumArticleField]) -> String {
    if records.is_empty() || fields.is_empty() {
        return C_EMPTY_LISTING.to_string();
    }

    let l_cells: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| record.field_text(*field).unwrap_or_default())
                .collect()
        })
        .collect();

    let l_widths: Vec<usize> = fields
        .iter()
        .enumerate()
        .map(|(n_idx, field)| {
            l_cells
                .iter()
                .map(|row| row[n_idx].chars().count())
                .chain(std::iter::once(field.label().chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut c_out = String::new();
    let l_header: Vec<&str> = fields.iter().map(|field| field.label()).collect();
    push_aligned_line(&mut c_out, &l_header, &l_widths);
    for row in &l_cells {
        c_out.push('\n');
        let l_row: Vec<&str> = row.iter().map(String::as_str).collect();
        push_aligned_line(&mut c_out, &l_row, &l_widths);
    }
    c_out
}

fn push_aligned_line(c_out: &mut String, cells: &[&str], widths: &[usize]) {
    let l_parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c_cell, n_width)| format!("{c_cell:>n_width$}"))
        .collect();
    c_out.push_str(l_parts.join(" ").trim_end());
}

/// Render statistics as `  key: value` lines.
pub fn format_statistics(stats: &SpecArticleStatistics) -> String {
    let mut l_lines = vec![
        format!("  total_articles: {}", stats.total_count),
        format!("  columns: [{}]", stats.columns.join(", ")),
        format!(
            "  families: {}",
            stats
                .distinct_family_count
                .map_or_else(|| "N/A".to_string(), |n| n.to_string())
        ),
    ];
    if let Some(price) = &stats.price {
        for (c_key, value) in [
            ("min_price", price.min),
            ("max_price", price.max),
            ("avg_price", price.mean),
        ] {
            let c_value = value.map_or_else(|| "N/A".to_string(), |n| n.to_string());
            l_lines.push(format!("  {c_key}: {c_value}"));
        }
    }
    l_lines.join("\n")
}

/// Summary block: counts, price range and the first `n_rows` articles.
pub fn format_summary(table: &ArticleTable, n_rows: usize) -> String {
    let stats = table.compute_statistics();
    let mut c_out = String::new();

    // `write!` into a `String` cannot fail.
    let _ = writeln!(c_out, "\n{C_BANNER}");
    let _ = writeln!(c_out, "LISTE ARTICLE - Summary");
    let _ = writeln!(c_out, "{C_BANNER}");
    let _ = writeln!(c_out, "\nTotal articles: {}", stats.total_count);
    let _ = writeln!(c_out, "Columns: {}", stats.columns.join(", "));
    if let Some(n_families) = stats.distinct_family_count {
        let _ = writeln!(c_out, "Number of families: {n_families}");
    }
    if let Some(price) = &stats.price
        && let (Some(n_min), Some(n_max), Some(n_mean)) = (price.min, price.max, price.mean)
    {
        let _ = writeln!(c_out, "\nPrice range: {n_min:.0} - {n_max:.0}");
        let _ = writeln!(c_out, "Average price: {n_mean:.2}");
    }
    let _ = writeln!(c_out, "\nFirst {n_rows} articles:");
    let _ = writeln!(c_out, "{}", format_records(table.head(n_rows), &table.fields()));
    let _ = write!(c_out, "\n{C_BANNER}\n");
    c_out
}
