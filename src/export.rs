// src/export.rs
//
// Shapes history and statistics into the published JSON tree:
//
//   index.json
//   latest.json
//   results.json
//   year/<yyyy>.json
//   stats/last3.json              stats/last2.json
//   stats/last3-by-date.json      stats/last2-by-date.json
//   stats/last3/date<d>.json      stats/last2/date<d>.json      (d = 1..=31)
//
// Everything is rendered to strings first; nothing touches disk here.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::consts::{API_DESCRIPTION, API_NAME, STATUS_OK};
use crate::draw::DrawRecord;
use crate::error::Result;
use crate::file::Document;
use crate::stats::{DayOfMonthStats, NumberLength, NumberStats, StatsReport, Window};
use crate::store::History;

/// Values shared by every document of one run.
#[derive(Clone, Debug)]
pub struct PublishContext {
    /// Run timestamp, RFC 3339 UTC.
    pub updated_at: String,
    /// Page the draws came from.
    pub source: String,
    /// Human label of the statistics window.
    pub period: String,
}

#[derive(Serialize)]
struct LatestDoc<'a> {
    status: &'static str,
    updated_at: &'a str,
    source: &'a str,
    data: Option<&'a DrawRecord>,
}

#[derive(Serialize)]
struct ResultsDoc<'a> {
    status: &'static str,
    updated_at: &'a str,
    source: &'a str,
    count: usize,
    data: &'a [DrawRecord],
}

#[derive(Serialize)]
struct YearDoc<'a> {
    status: &'static str,
    updated_at: &'a str,
    source: &'a str,
    year: String,
    count: usize,
    data: Vec<&'a DrawRecord>,
}

#[derive(Serialize)]
struct StatsDoc<'a> {
    status: &'static str,
    updated_at: &'a str,
    source: &'a str,
    period: &'a str,
    window: &'a Window,
    data: &'a NumberStats,
}

#[derive(Serialize)]
struct ByDateDoc<'a> {
    status: &'static str,
    updated_at: &'a str,
    source: &'a str,
    period: &'a str,
    count: usize,
    data: &'a BTreeMap<u32, DayOfMonthStats>,
}

#[derive(Serialize)]
struct DayDoc<'a> {
    status: &'static str,
    updated_at: &'a str,
    date: u32,
    period: &'a str,
    data: &'a DayOfMonthStats,
}

#[derive(Serialize)]
struct IndexDoc<'a> {
    status: &'static str,
    name: &'static str,
    description: &'static str,
    updated_at: &'a str,
    endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub latest: String,
    pub all_results: String,
    /// Newest year first.
    pub by_year: Vec<String>,
    pub stats_last3: String,
    pub stats_last2: String,
    pub stats_last3_by_date: String,
    pub stats_last3_date: Vec<String>,
    pub stats_last2_by_date: String,
    pub stats_last2_date: Vec<String>,
}

pub fn year_path(year: i32) -> String {
    format!("year/{year}.json")
}

pub fn stats_path(len: NumberLength) -> String {
    join!("stats/", len.field(), ".json")
}

pub fn by_date_path(len: NumberLength) -> String {
    join!("stats/", len.field(), "-by-date.json")
}

pub fn day_path(len: NumberLength, day: u32) -> String {
    format!("stats/{}/date{day}.json", len.field())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut s = serde_json::to_string_pretty(value)?;
    s.push('\n');
    Ok(s)
}

fn doc(rel_path: impl Into<String>, contents: String) -> Document {
    Document { rel_path: rel_path.into(), contents }
}

/// Render the whole tree. Statistics documents are included only when
/// `stats` is given.
pub fn render(
    history: &History,
    stats: Option<&StatsReport>,
    ctx: &PublishContext,
) -> Result<Vec<Document>> {
    let mut docs = render_results(history, ctx)?;
    if let Some(report) = stats {
        docs.extend(render_stats(report, ctx)?);
    }
    let index = render_index(history, ctx)?;
    docs.push(index);
    Ok(docs)
}

/// latest.json, results.json and one file per year.
pub fn render_results(history: &History, ctx: &PublishContext) -> Result<Vec<Document>> {
    let mut docs = Vec::new();

    docs.push(doc("latest.json", to_json(&LatestDoc {
        status: STATUS_OK,
        updated_at: &ctx.updated_at,
        source: &ctx.source,
        data: history.latest(),
    })?));

    docs.push(doc("results.json", to_json(&ResultsDoc {
        status: STATUS_OK,
        updated_at: &ctx.updated_at,
        source: &ctx.source,
        count: history.len(),
        data: history.records(),
    })?));

    for (year, records) in history.by_year() {
        docs.push(doc(year_path(year), to_json(&YearDoc {
            status: STATUS_OK,
            updated_at: &ctx.updated_at,
            source: &ctx.source,
            year: year.to_string(),
            count: records.len(),
            data: records,
        })?));
    }
    Ok(docs)
}

/// Per-length statistics, their day-of-month breakdowns and the per-day files.
pub fn render_stats(report: &StatsReport, ctx: &PublishContext) -> Result<Vec<Document>> {
    let mut docs = Vec::new();

    for len in NumberLength::ALL {
        docs.push(doc(stats_path(len), to_json(&StatsDoc {
            status: STATUS_OK,
            updated_at: &ctx.updated_at,
            source: &ctx.source,
            period: &ctx.period,
            window: &report.window,
            data: report.get(len),
        })?));

        let by_day = report.by_day(len);
        docs.push(doc(by_date_path(len), to_json(&ByDateDoc {
            status: STATUS_OK,
            updated_at: &ctx.updated_at,
            source: &ctx.source,
            period: &ctx.period,
            count: by_day.len(),
            data: by_day,
        })?));

        for (&day, stats) in by_day {
            docs.push(doc(day_path(len, day), to_json(&DayDoc {
                status: STATUS_OK,
                updated_at: &ctx.updated_at,
                date: day,
                period: &ctx.period,
                data: stats,
            })?));
        }
    }
    Ok(docs)
}

/// Stats endpoints are always listed: a `latest` run leaves the files of the
/// last full run in place.
pub fn endpoints(history: &History) -> Endpoints {
    let days = |len: NumberLength| -> Vec<String> { (1..=31).map(|d| day_path(len, d)).collect() };
    Endpoints {
        latest: s!("latest.json"),
        all_results: s!("results.json"),
        by_year: history.by_year().keys().rev().map(|&y| year_path(y)).collect(),
        stats_last3: stats_path(NumberLength::Three),
        stats_last2: stats_path(NumberLength::Two),
        stats_last3_by_date: by_date_path(NumberLength::Three),
        stats_last3_date: days(NumberLength::Three),
        stats_last2_by_date: by_date_path(NumberLength::Two),
        stats_last2_date: days(NumberLength::Two),
    }
}

pub fn render_index(history: &History, ctx: &PublishContext) -> Result<Document> {
    Ok(doc("index.json", to_json(&IndexDoc {
        status: STATUS_OK,
        name: API_NAME,
        description: API_DESCRIPTION,
        updated_at: &ctx.updated_at,
        endpoints: endpoints(history),
    })?))
}
