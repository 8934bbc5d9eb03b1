// src/store.rs
//
// The persisted draw history. Ascending by date, one record per date; the only
// way in is `merge`, which is what keeps those two invariants.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::draw::DrawRecord;
use crate::error::{Error, Result};
use crate::file;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History(Vec<DrawRecord>);

impl History {
    /// Build from records in any order; later duplicates win.
    pub fn from_records(records: Vec<DrawRecord>) -> Self {
        merge(History::default(), records)
    }

    pub fn records(&self) -> &[DrawRecord] { &self.0 }
    pub fn iter(&self) -> std::slice::Iter<'_, DrawRecord> { self.0.iter() }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Newest draw.
    pub fn latest(&self) -> Option<&DrawRecord> { self.0.last() }

    pub fn get(&self, date: NaiveDate) -> Option<&DrawRecord> {
        self.0
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.0[i])
    }

    /// Records grouped by Gregorian year, each group still ascending.
    pub fn by_year(&self) -> BTreeMap<i32, Vec<&DrawRecord>> {
        let mut out: BTreeMap<i32, Vec<&DrawRecord>> = BTreeMap::new();
        for r in &self.0 {
            out.entry(r.date.year()).or_default().push(r);
        }
        out
    }
}

/// Fold `new` into `existing`. Keyed by date; on conflict the record from
/// `new` replaces the stored one (and within `new`, the later one wins).
pub fn merge(existing: History, new: Vec<DrawRecord>) -> History {
    let mut by_date: BTreeMap<NaiveDate, DrawRecord> =
        existing.0.into_iter().map(|r| (r.date, r)).collect();

    let mut replaced = 0usize;
    for rec in new {
        if let Some(old) = by_date.insert(rec.date, rec) {
            if by_date.get(&old.date).is_some_and(|cur| cur.numbers != old.numbers) {
                replaced += 1;
            }
        }
    }
    if replaced > 0 {
        logw!("History: {replaced} stored draw(s) corrected by the latest scrape");
    }

    History(by_date.into_values().collect())
}

/// Load the stored history. A missing file is an empty history; a record
/// whose suffixes do not match its 4-digit number is an error.
pub fn load(path: &Path) -> Result<History> {
    if !path.exists() {
        logd!("History: {} not found, starting empty", path.display());
        return Ok(History::default());
    }
    let text = fs::read_to_string(path)?;
    let records: Vec<DrawRecord> = serde_json::from_str(&text)?;
    if let Some(bad) = records.iter().find(|r| !r.numbers.is_well_formed()) {
        loge!("History: {} holds a malformed draw on {}", path.display(), bad.date);
        return Err(Error::InvalidHistory {
            path: path.to_path_buf(),
            date: bad.date,
            last4: bad.numbers.last4.clone(),
            last3: bad.numbers.last3.clone(),
            last2: bad.numbers.last2.clone(),
        });
    }
    let history = History::from_records(records);
    logd!("History: loaded {} draws from {}", history.len(), path.display());
    Ok(history)
}

pub fn save(path: &Path, history: &History) -> Result<()> {
    let mut json = serde_json::to_string_pretty(history)?;
    json.push('\n');
    file::write_atomic(path, json.as_bytes())?;
    logd!("History: saved {} draws to {}", history.len(), path.display());
    Ok(())
}
