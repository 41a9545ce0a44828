use log::info;
use serde::Serialize;

use crate::aggregation::MatchAggregator;
use crate::analysis_context::AnalysisContext;
use crate::catalog::{scan_directory, select_window};
use crate::error::Result;
use crate::match_loader::load_match;
use crate::metrics::{derive_report, RunReport};
use crate::notice::Notice;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    NoMatchFiles,
    NoMatchesAfterStartDate,
    NoMatchesParsed,
}

impl NoDataReason {
    pub fn describe(&self) -> &'static str {
        match self {
            NoDataReason::NoMatchFiles => "no match file with the expected DD_MM_YYYY_G<n>.json name was found",
            NoDataReason::NoMatchesAfterStartDate => "no match found on or after the start date",
            NoDataReason::NoMatchesParsed => "none of the selected matches could be used (unreadable, or no roster player in them)",
        }
    }
}

#[derive(Debug)]
pub enum AnalysisOutcome {
    NoData { reason: NoDataReason, notices: Vec<Notice> },
    Report(Box<RunReport>),
}

/*
    One run over the source directory: pick the window of match files, fold each one that loads
    into a fresh aggregator, derive the report. A file that cannot be read or parsed is skipped
    with a notice. Only a problem with the directory itself is returned as an error.
*/
pub fn run_analysis(context: &AnalysisContext) -> Result<AnalysisOutcome> {
    context.validate()?;

    let files = scan_directory(&context.source_dir)?;
    if files.is_empty() {
        return Ok(AnalysisOutcome::NoData { reason: NoDataReason::NoMatchFiles, notices: Vec::new() });
    }

    let window = select_window(&files, context.start_date, context.match_count);
    if window.is_empty() {
        return Ok(AnalysisOutcome::NoData { reason: NoDataReason::NoMatchesAfterStartDate, notices: Vec::new() });
    }

    let mut aggregator = MatchAggregator::new(context);
    for file in &window {
        match load_match(file) {
            Ok(game) => { aggregator.add_match(&game); }
            Err(e) => aggregator.note(Notice::UnreadableFile {
                file: file.filename.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if aggregator.matches_parsed == 0 {
        return Ok(AnalysisOutcome::NoData { reason: NoDataReason::NoMatchesParsed, notices: aggregator.notices });
    }

    info!("Parsed {} of {} selected matches", aggregator.matches_parsed, window.len());
    Ok(AnalysisOutcome::Report(Box::new(derive_report(aggregator, window))))
}
