// src/runner.rs
//
// One batch run: fetch → extract → merge → aggregate → render → write → save.
// Everything that can fail on bad data fails before the first write, so a
// broken run leaves the previously published tree untouched.

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    config::AppOptions,
    core::net::{FileSource, HttpSource, Source},
    error::Result,
    export::{self, PublishContext},
    file,
    progress::Progress,
    specs,
    stats::{self, StatsReport, Window},
    store::{self, History},
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Draws found on the page this run.
    pub scraped: usize,
    /// Draws in the merged history.
    pub history_len: usize,
    /// Statistics window, when statistics were computed.
    pub window: Option<Window>,
    pub files_written: Vec<PathBuf>,
}

/// Top-level runner: pick the page source from the options and run.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(opts: &AppOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    let source: Box<dyn Source> = match &opts.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new()?),
    };
    run_with(opts, source.as_ref(), Utc::now(), progress)
}

/// Run against an explicit source and clock.
pub fn run_with(
    opts: &AppOptions,
    source: &dyn Source,
    now: DateTime<Utc>,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary> {
    let url = opts.results_url();

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching {url}"));
    }
    let scraped = specs::results::fetch(source, &url).inspect_err(|e| {
        loge!("Results: {e}; published files left untouched");
    })?;
    logf!("Results: {} draws on page", scraped.len());
    let scraped_len = scraped.len();

    let history = if opts.keep_history {
        store::merge(store::load(&opts.history_path())?, scraped)
    } else {
        History::from_records(scraped)
    };
    logf!("History: {} draws", history.len());

    let report = if opts.mode.includes_stats() {
        Some(compute_stats(opts, &history, now)?)
    } else {
        None
    };

    let ctx = PublishContext {
        updated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        source: url,
        period: opts.period_label(),
    };
    let docs = export::render(&history, report.as_ref(), &ctx)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(docs.len());
    }
    let files_written = file::write_documents(&opts.out_dir, &docs, progress.as_deref_mut())?;
    logf!("Published {} files to {}", files_written.len(), opts.out_dir.display());

    // only once the tree reflects it
    if opts.keep_history {
        store::save(&opts.history_path(), &history)?;
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(RunSummary {
        scraped: scraped_len,
        history_len: history.len(),
        window: report.map(|r| r.window),
        files_written,
    })
}

fn compute_stats(opts: &AppOptions, history: &History, now: DateTime<Utc>) -> Result<StatsReport> {
    let window = match opts.reference_date {
        Some(reference) => Window::years_back(reference, opts.window_years),
        None => Window::for_history(history, opts.window_years, now.date_naive()),
    };
    let report = stats::aggregate_all(history, &window).inspect_err(|e| {
        loge!("Stats: {e}; aborting before publish");
    })?;
    logf!(
        "Stats {}..{}: {} draws, never drawn last3={} last2={}",
        window.from,
        window.to,
        report.last3.draw_count,
        report.last3.never_drawn_count,
        report.last2.never_drawn_count,
    );
    Ok(report)
}
