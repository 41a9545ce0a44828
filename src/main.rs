mod aggregation;
mod analysis_context;
mod catalog;
mod champion_stats;
mod coercion;
mod composition;
mod error;
mod match_loader;
mod metrics;
mod notice;
mod pipeline;
mod report;
mod team_resolver;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use log::error;

use analysis_context::*;
use error::Result;
use pipeline::*;
use report::*;

/*
    Reads the scrim match files of the roster and prints team, player, role, champion and draft
    statistics over the most recent matches on or after a start date.
    Defaults live in AnalysisContext; a JSON config file overrides them and flags override both.
*/
#[derive(Parser, Debug)]
#[command(name = "scrim_stats")]
#[command(about = "Aggregate scrim statistics for a tracked roster", long_about = None)]
struct Cli {
    /// JSON config file (roster, aliases, role synonyms, radar axes...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the DD_MM_YYYY_G<n>.json match files
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// First day to include, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    since: Option<NaiveDate>,

    /// Number of most recent matches to analyze
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=MAX_MATCH_COUNT as i64))]
    matches: Option<u16>,

    /// Write each table as CSV into this directory
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the whole report as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut context = match &cli.config {
        Some(path) => AnalysisContext::from_file(path)?,
        None => AnalysisContext::default(),
    };
    if let Some(dir) = cli.source_dir { context.source_dir = dir; }
    if let Some(date) = cli.since { context.start_date = date; }
    if let Some(n) = cli.matches { context.match_count = n as usize; }

    match run_analysis(&context)? {
        AnalysisOutcome::NoData { reason, notices } => {
            for n in &notices {
                println!("{n}");
            }
            println!("No data: {}", reason.describe());
        }
        AnalysisOutcome::Report(report) => {
            output_report(&report);
            if let Some(dir) = &cli.csv { export_csv(&report, dir)?; }
            if let Some(path) = &cli.json { export_json(&report, path)?; }
        }
    }

    Ok(())
}
