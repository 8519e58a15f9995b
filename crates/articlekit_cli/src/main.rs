//! `articlekit` binary: query and export article catalog workbooks.

mod cli;
mod display;

use std::backtrace::{Backtrace, BacktraceStatus};
use std::process::ExitCode;

use anyhow::Result;
use articlekit_catalog::{
    CatalogError, N_SUMMARY_ROWS_DEFAULT, ReportQuery, load_article_table, run_export,
};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{ArgsExport, ArgsQuery, Cli, EnumCommand};
use crate::display::{format_records, format_statistics, format_summary};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CatalogError>() {
                Some(err_catalog @ CatalogError::NotFound(_)) => eprintln!("Error: {err_catalog}"),
                _ => eprintln!("{}", format_error_report(&err)),
            }
            ExitCode::FAILURE
        }
    }
}

/// Error chain plus a stack trace, captured here when the error carries none.
fn format_error_report(err: &anyhow::Error) -> String {
    let mut c_report = format!("An error occurred: {err:?}");
    if err.backtrace().status() != BacktraceStatus::Captured {
        c_report.push_str(&format!(
            "\n\nStack backtrace:\n{}",
            Backtrace::force_capture()
        ));
    }
    c_report
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(n_verbose: u8) {
    let c_level_default = match n_verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(c_level_default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn run(command: EnumCommand) -> Result<()> {
    match command {
        EnumCommand::Query(args) => run_query(&args),
        EnumCommand::Export(args) => run_export_command(&args),
    }
}

fn run_query(args: &ArgsQuery) -> Result<()> {
    let layout = args.layout.resolve();
    debug!(?layout, file = %args.file.display(), "loading article list");
    let table = load_article_table(&args.file, &layout, args.sheet.as_deref())?;
    info!(records = table.len(), "article list loaded");

    if !args.has_action() {
        print!("{}", format_summary(&table, N_SUMMARY_ROWS_DEFAULT));
        return Ok(());
    }

    let l_fields = table.fields();
    let print_matches = |c_title: String, report: ReportQuery, c_found: &str| {
        println!("\n{c_title}");
        let n_shown = usize::min(args.limit, report.len());
        println!("{}", format_records(&report.records[..n_shown], &l_fields));
        println!("\nFound {} {c_found}", report.len());
    };

    if args.summary {
        print!("{}", format_summary(&table, args.limit));
    }
    if args.stats {
        println!("\nStatistics:");
        println!("{}", format_statistics(&table.compute_statistics()));
    }
    if let Some(term) = &args.search_ref {
        print_matches(
            format!("Search results for reference '{term}':"),
            table.search_by_reference(term),
            "matching articles",
        );
    }
    if let Some(term) = &args.search_desc {
        print_matches(
            format!("Search results for description '{term}':"),
            table.search_by_description(term),
            "matching articles",
        );
    }
    if let Some(term) = &args.family {
        print_matches(
            format!("Articles in family '{term}':"),
            table.filter_by_family(term),
            "articles in this family",
        );
    }
    if args.all {
        println!("\nAll articles:");
        println!("{}", format_records(table.head(args.limit), &l_fields));
        println!(
            "\nShowing {} of {} articles",
            usize::min(args.limit, table.len()),
            table.len()
        );
    }
    Ok(())
}

fn run_export_command(args: &ArgsExport) -> Result<()> {
    let config = args.resolve()?;
    debug!(?config, "export configuration resolved");

    let report = run_export(&config, |file| println!("{file}"))?;
    info!("{report}");
    println!("Done.");
    Ok(())
}
