//! Command-line surface and export configuration layering.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use articlekit_catalog::conf::C_FILE_ARTICLE_LIST_DEFAULT;
use articlekit_catalog::{
    N_QUERY_LIMIT_DEFAULT, SpecArticleLayout, SpecExportConfig, derive_preset_article_list,
    derive_preset_price_list,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

/// Environment prefix of export configuration keys.
pub const C_ENV_PREFIX_EXPORT: &str = "ARTICLEKIT_EXPORT_";

/// Query and split article catalog workbooks.
#[derive(Debug, Parser)]
#[command(name = "articlekit", version)]
pub struct Cli {
    /// Increase log verbosity (`-v` info, `-vv` debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: EnumCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnumCommand {
    /// Read the article list and search, filter or summarize it.
    Query(ArgsQuery),
    /// Split a source sheet into capped-size workbooks.
    Export(ArgsExport),
}

#[derive(Debug, Args)]
pub struct ArgsQuery {
    /// Path to the article list workbook.
    #[arg(long, default_value = C_FILE_ARTICLE_LIST_DEFAULT)]
    pub file: PathBuf,

    /// Worksheet name; first sheet when omitted.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Display the summary.
    #[arg(long)]
    pub summary: bool,

    /// Search by reference (case-insensitive substring).
    #[arg(long, value_name = "REF")]
    pub search_ref: Option<String>,

    /// Search by description (case-insensitive substring).
    #[arg(long, value_name = "TEXT")]
    pub search_desc: Option<String>,

    /// Filter by family (case-insensitive substring).
    #[arg(long)]
    pub family: Option<String>,

    /// List all articles.
    #[arg(long)]
    pub all: bool,

    /// Display statistics.
    #[arg(long)]
    pub stats: bool,

    /// Limit number of results to display.
    #[arg(long, default_value_t = N_QUERY_LIMIT_DEFAULT)]
    pub limit: usize,

    #[command(flatten)]
    pub layout: ArgsLayout,
}

impl ArgsQuery {
    /// `true` when at least one action flag is set.
    pub fn has_action(&self) -> bool {
        self.summary
            || self.stats
            || self.all
            || self.search_ref.is_some()
            || self.search_desc.is_some()
            || self.family.is_some()
    }
}

/// Overrides of the positional article layout.
#[derive(Debug, Default, Args)]
pub struct ArgsLayout {
    /// Number of leading rows before data.
    #[arg(long)]
    pub row_data_start: Option<usize>,
    /// Reference column (0-based).
    #[arg(long)]
    pub col_reference: Option<usize>,
    /// Description column (0-based).
    #[arg(long)]
    pub col_description: Option<usize>,
    /// Family column (0-based).
    #[arg(long)]
    pub col_family: Option<usize>,
    /// Sales unit column (0-based).
    #[arg(long)]
    pub col_sales_unit: Option<usize>,
    /// Price column (0-based).
    #[arg(long)]
    pub col_price: Option<usize>,
}

impl ArgsLayout {
    /// Default layout with every given flag applied on top.
    pub fn resolve(&self) -> SpecArticleLayout {
        let layout = SpecArticleLayout::default();
        SpecArticleLayout {
            row_data_start: self.row_data_start.unwrap_or(layout.row_data_start),
            col_reference: self.col_reference.or(layout.col_reference),
            col_description: self.col_description.or(layout.col_description),
            col_family: self.col_family.or(layout.col_family),
            col_sales_unit: self.col_sales_unit.or(layout.col_sales_unit),
            col_price: self.col_price.or(layout.col_price),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumPreset {
    /// `liste_article.xlsx`, header row 2, columns A/B/D, five files max.
    PriceList,
    /// `LISTE ARTICLE.xlsx`, header row 7, columns A/D/R, unbounded.
    ArticleList,
}

impl EnumPreset {
    pub fn config(self) -> SpecExportConfig {
        match self {
            Self::PriceList => derive_preset_price_list(),
            Self::ArticleList => derive_preset_article_list(),
        }
    }
}

#[derive(Debug, Args)]
pub struct ArgsExport {
    /// Built-in layout to start from.
    #[arg(long, value_enum, default_value = "article-list")]
    pub preset: EnumPreset,

    /// TOML file layered over the preset.
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Source workbook.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Source worksheet name.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Output directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Output file prefix.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Rows per output file.
    #[arg(long)]
    pub max_entries: Option<usize>,

    /// Maximum number of output files.
    #[arg(long, conflicts_with = "unbounded")]
    pub max_files: Option<usize>,

    /// Write as many files as the rows need.
    #[arg(long)]
    pub unbounded: bool,

    /// 1-based header row; data starts on the next row.
    #[arg(long)]
    pub row_header: Option<usize>,
}

impl ArgsExport {
    /// Preset, then TOML file, then environment, then flags.
    pub fn resolve(&self) -> Result<SpecExportConfig> {
        let mut figment = Figment::from(Serialized::defaults(self.preset.config()));
        if let Some(path_config) = &self.config {
            ensure_config_file(path_config)?;
            figment = figment.merge(Toml::file(path_config));
        }
        let mut config: SpecExportConfig = figment
            .merge(Env::prefixed(C_ENV_PREFIX_EXPORT))
            .extract()
            .context("Failed to resolve export configuration")?;

        if let Some(path_file_in) = &self.input {
            config.path_file_in = path_file_in.clone();
        }
        if let Some(sheet_name) = &self.sheet {
            config.sheet_name = Some(sheet_name.clone());
        }
        if let Some(dir_out) = &self.out_dir {
            config.dir_out = dir_out.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.prefix_file_out = prefix.clone();
        }
        if let Some(n) = self.max_entries {
            config.max_entries_per_file = n;
        }
        if let Some(n) = self.max_files {
            config.max_files = Some(n);
        }
        if self.unbounded {
            config.max_files = None;
        }
        if let Some(n) = self.row_header {
            config.row_header = n;
        }
        Ok(config)
    }
}

fn ensure_config_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("Config file not found: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("articlekit").chain(args.iter().copied()))
            .expect("valid args")
    }

    fn export_args(args: &[&str]) -> ArgsExport {
        let mut l_args = vec!["export"];
        l_args.extend_from_slice(args);
        match parse(&l_args).command {
            EnumCommand::Export(args) => args,
            EnumCommand::Query(_) => panic!("expected export"),
        }
    }

    #[test]
    fn query_defaults() {
        let EnumCommand::Query(args) = parse(&["query"]).command else {
            panic!("expected query");
        };
        assert_eq!(args.file, PathBuf::from("LISTE ARTICLE.xlsx"));
        assert_eq!(args.limit, 50);
        assert!(!args.has_action());
        assert_eq!(args.layout.resolve(), SpecArticleLayout::default());
    }

    #[test]
    fn query_layout_overrides_apply() {
        let EnumCommand::Query(args) =
            parse(&["-v", "query", "--family", "ACB", "--col-price", "5"]).command
        else {
            panic!("expected query");
        };
        assert!(args.has_action());
        let layout = args.layout.resolve();
        assert_eq!(layout.col_price, Some(5));
        assert_eq!(layout.col_reference, Some(0));
    }

    #[test]
    fn export_layers_preset_toml_env_then_flags() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "export.toml",
                r#"
                prefix_file_out = "from_toml"
                max_entries_per_file = 100
                row_header = 3
                "#,
            )?;
            jail.set_env("ARTICLEKIT_EXPORT_MAX_ENTRIES_PER_FILE", "250");

            let config = export_args(&[
                "--preset",
                "price-list",
                "--config",
                "export.toml",
                "--row-header",
                "4",
            ])
            .resolve()
            .map_err(|err| err.to_string())?;

            assert_eq!(config.prefix_file_out, "from_toml");
            assert_eq!(config.max_entries_per_file, 250);
            assert_eq!(config.row_header, 4);
            assert_eq!(config.max_files, Some(5));
            assert_eq!(config.col_price, 3);
            Ok(())
        });
    }

    #[test]
    fn export_unbounded_clears_file_cap() {
        Jail::expect_with(|_| {
            let config = export_args(&["--preset", "price-list", "--unbounded"])
                .resolve()
                .map_err(|err| err.to_string())?;
            assert_eq!(config.max_files, None);
            Ok(())
        });
    }

    #[test]
    fn export_missing_config_file_is_an_error() {
        Jail::expect_with(|_| {
            let err = export_args(&["--config", "absent.toml"])
                .resolve()
                .expect_err("missing config");
            assert!(err.to_string().contains("absent.toml"));
            Ok(())
        });
    }
}
