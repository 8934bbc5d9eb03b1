// src/stats.rs
//! # Digit statistics over a window of draws
//!
//! Everything here is a pure function of a [`History`] and an explicit
//! [`Window`]; nothing reads the clock. The two number spaces are handled
//! independently: 3-digit statistics read `last3`, 2-digit statistics read
//! `last2`.
//!
//! For each space the output partitions every possible number:
//! - `frequency_distribution` holds numbers drawn at least once, bucketed by
//!   how many times they were drawn;
//! - `never_drawn` holds the rest.
//!
//! so `never_drawn_count + Σ bucket sizes == 10^L` always holds.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::draw::{DrawRecord, is_digits};
use crate::error::StatsError;
use crate::store::History;

/// Which suffix a statistic is computed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberLength {
    Two,
    Three,
}

impl NumberLength {
    pub const ALL: [NumberLength; 2] = [NumberLength::Three, NumberLength::Two];

    pub fn digits(self) -> usize {
        match self {
            NumberLength::Two => 2,
            NumberLength::Three => 3,
        }
    }

    /// Size of the number space, 10^L.
    pub fn space(self) -> usize {
        10usize.pow(self.digits() as u32)
    }

    /// Record field the statistic reads, also the published file stem.
    pub fn field(self) -> &'static str {
        match self {
            NumberLength::Two => "last2",
            NumberLength::Three => "last3",
        }
    }

    fn pick(self, rec: &DrawRecord) -> &str {
        match self {
            NumberLength::Two => &rec.numbers.last2,
            NumberLength::Three => &rec.numbers.last3,
        }
    }

    /// Zero-padded string for `n`, e.g. 7 -> "007" for L=3.
    pub fn format(self, n: usize) -> String {
        format!("{:0width$}", n, width = self.digits())
    }

    /// Numeric value of a well-formed suffix, None otherwise.
    fn parse(self, value: &str) -> Option<usize> {
        if !is_digits(value, self.digits()) {
            return None;
        }
        value.parse().ok()
    }
}

/// Inclusive date range `[from, to]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Window {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Window {
    /// `years` calendar years back from `reference`, both ends included.
    /// A Feb 29 reference lands on Feb 28 when the start year has none.
    pub fn years_back(reference: NaiveDate, years: u32) -> Self {
        let from = reference
            .checked_sub_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: reference }
    }

    /// Window ending at the newest draw, or at `today` when there are none.
    pub fn for_history(history: &History, years: u32, today: NaiveDate) -> Self {
        let reference = history.latest().map(|r| r.date).unwrap_or(today);
        Self::years_back(reference, years)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Per-digit counts by place value. `hundreds` is absent for 2-digit numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DigitPositionStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hundreds: Option<u32>,
    pub tens: u32,
    pub units: u32,
    pub total: u32,
}

impl DigitPositionStats {
    fn from_counts(len: NumberLength, c: &[u32; 3]) -> Self {
        match len {
            NumberLength::Three => Self {
                hundreds: Some(c[0]),
                tens: c[1],
                units: c[2],
                total: c[0] + c[1] + c[2],
            },
            NumberLength::Two => Self {
                hundreds: None,
                tens: c[0],
                units: c[1],
                total: c[0] + c[1],
            },
        }
    }

    /// Sum over the individual positions.
    pub fn position_sum(&self) -> u32 {
        self.hundreds.unwrap_or(0) + self.tens + self.units
    }
}

/// occurrence count -> numbers drawn exactly that often (ascending). No zero bucket.
pub type FrequencyDistribution = BTreeMap<u32, Vec<String>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NumberStats {
    /// Draws inside the window.
    pub draw_count: usize,
    /// Keyed "0".."9".
    pub digit_position_stats: BTreeMap<String, DigitPositionStats>,
    pub frequency_distribution: FrequencyDistribution,
    pub never_drawn: Vec<String>,
    pub never_drawn_count: usize,
}

impl NumberStats {
    /// Numbers with at least one occurrence.
    pub fn drawn_count(&self) -> usize {
        self.frequency_distribution.values().map(Vec::len).sum()
    }
}

/// Statistics for the draws that fell on one day of the month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayOfMonthStats {
    pub date: u32,
    pub draw_count: usize,
    pub digit_position_stats: BTreeMap<String, DigitPositionStats>,
    pub frequency_distribution: FrequencyDistribution,
}

/// Everything the publisher needs for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsReport {
    pub window: Window,
    pub last3: NumberStats,
    pub last2: NumberStats,
    pub last3_by_day: BTreeMap<u32, DayOfMonthStats>,
    pub last2_by_day: BTreeMap<u32, DayOfMonthStats>,
}

impl StatsReport {
    pub fn get(&self, len: NumberLength) -> &NumberStats {
        match len {
            NumberLength::Three => &self.last3,
            NumberLength::Two => &self.last2,
        }
    }

    pub fn by_day(&self, len: NumberLength) -> &BTreeMap<u32, DayOfMonthStats> {
        match len {
            NumberLength::Three => &self.last3_by_day,
            NumberLength::Two => &self.last2_by_day,
        }
    }
}

/// Statistics for one number length over the draws inside `window`.
pub fn aggregate(
    history: &History,
    window: &Window,
    len: NumberLength,
) -> Result<NumberStats, StatsError> {
    count(history.iter().filter(|r| window.contains(r.date)), len)
}

/// Same statistics restricted to draws on day `day` of any month.
pub fn aggregate_by_day_of_month(
    history: &History,
    window: &Window,
    len: NumberLength,
) -> Result<BTreeMap<u32, DayOfMonthStats>, StatsError> {
    (1..=31u32)
        .map(|day| -> Result<(u32, DayOfMonthStats), StatsError> {
            let s = count(
                history
                    .iter()
                    .filter(|r| window.contains(r.date) && r.date.day() == day),
                len,
            )?;
            Ok((
                day,
                DayOfMonthStats {
                    date: day,
                    draw_count: s.draw_count,
                    digit_position_stats: s.digit_position_stats,
                    frequency_distribution: s.frequency_distribution,
                },
            ))
        })
        .collect()
}

/// Both lengths, plus the day-of-month breakdowns.
pub fn aggregate_all(history: &History, window: &Window) -> Result<StatsReport, StatsError> {
    Ok(StatsReport {
        window: *window,
        last3: aggregate(history, window, NumberLength::Three)?,
        last2: aggregate(history, window, NumberLength::Two)?,
        last3_by_day: aggregate_by_day_of_month(history, window, NumberLength::Three)?,
        last2_by_day: aggregate_by_day_of_month(history, window, NumberLength::Two)?,
    })
}

fn count<'a>(
    records: impl Iterator<Item = &'a DrawRecord>,
    len: NumberLength,
) -> Result<NumberStats, StatsError> {
    let mut hits = vec![0u32; len.space()];
    // [digit][position], position 0 is the leftmost place
    let mut places = [[0u32; 3]; 10];
    let mut draw_count = 0usize;

    for rec in records {
        let value = len.pick(rec);
        let n = len.parse(value).ok_or_else(|| StatsError::MalformedRecord {
            date: rec.date,
            field: len.field(),
            value: s!(value),
        })?;
        hits[n] += 1;
        for (pos, b) in value.bytes().enumerate() {
            places[(b - b'0') as usize][pos] += 1;
        }
        draw_count += 1;
    }

    let digit_position_stats = places
        .iter()
        .enumerate()
        .map(|(d, c)| (d.to_string(), DigitPositionStats::from_counts(len, c)))
        .collect();

    let mut frequency_distribution = FrequencyDistribution::new();
    let mut never_drawn = Vec::new();
    for (n, &k) in hits.iter().enumerate() {
        if k == 0 {
            never_drawn.push(len.format(n));
        } else {
            frequency_distribution.entry(k).or_default().push(len.format(n));
        }
    }

    Ok(NumberStats {
        draw_count,
        digit_position_stats,
        frequency_distribution,
        never_drawn_count: never_drawn.len(),
        never_drawn,
    })
}
