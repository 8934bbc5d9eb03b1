// tests/publish_e2e.rs
//
// Full batch runs against an in-memory results page.
//
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, TimeZone, Utc};
use lotto_scrape::config::{AppOptions, Mode};
use lotto_scrape::core::net::StaticSource;
use lotto_scrape::progress::Progress;
use lotto_scrape::runner::run_with;
use lotto_scrape::{store, DrawRecord, Error, History};
use serde_json::Value;

const PAGE: &str = r#"
<html><body><table>
  <tr><td class="stats-title3">งวดวันที่</td><td class="stats-title3">4 ตัว</td><td class="stats-title3">3 ตัว</td><td class="stats-title3">2 ตัว</td></tr>
  <tr><td class="stats-title"><a href="jackpot.php?contentID=502">06/02/2569</a></td><td>7430</td><td>430</td><td>30</td></tr>
  <tr><td class="stats-title"><a href="jackpot.php?contentID=501">05/02/2569</a></td><td>4401</td><td>401</td><td>01</td></tr>
  <tr><td class="stats-title"><a href="jackpot.php?contentID=400">30/12/2568</a></td><td>0012</td><td>012</td><td>12</td></tr>
</table></body></html>
"#;

fn opts(root: &Path, mode: Mode) -> AppOptions {
    AppOptions {
        mode,
        out_dir: root.join("api"),
        store_dir: root.join(".store"),
        ..AppOptions::default()
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 6, 12, 0, 0).unwrap()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: usize,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, _path: &Path) { self.done += 1; }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn full_run_publishes_every_document() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), Mode::Full);
    let mut rec = Recorder::default();

    let summary = run_with(&o, &StaticSource(PAGE.into()), now(), Some(&mut rec)).unwrap();
    assert_eq!(summary.scraped, 3);
    assert_eq!(summary.history_len, 3);
    assert_eq!(rec.total, summary.files_written.len());
    assert_eq!(rec.done, rec.total);
    assert!(rec.finished);

    let api = o.out_dir.clone();
    // latest, results, 2 years, 2 x (stats + by-date + 31 days), index
    assert_eq!(summary.files_written.len(), 2 + 2 + 2 * (2 + 31) + 1);

    let latest = read_json(&api.join("latest.json"));
    assert_eq!(latest["status"], "ok");
    assert_eq!(latest["updated_at"], "2026-02-06T12:00:00Z");
    assert_eq!(latest["data"]["date"], "2026-02-06");
    assert_eq!(latest["data"]["date_thai"], "06/02/2569");
    assert_eq!(latest["data"]["numbers"]["last4"], "7430");

    let results = read_json(&api.join("results.json"));
    assert_eq!(results["count"], 3);
    assert_eq!(results["data"][0]["date"], "2025-12-30");
    assert_eq!(results["data"][0]["numbers"]["last4"], "0012");
    assert_eq!(results["data"][2]["date"], "2026-02-06");

    let y2025 = read_json(&api.join("year/2025.json"));
    assert_eq!(y2025["year"], "2025");
    assert_eq!(y2025["count"], 1);

    let last3 = read_json(&api.join("stats/last3.json"));
    assert_eq!(last3["period"], "10 ปีย้อนหลัง");
    assert_eq!(last3["window"]["from"], "2016-02-06");
    assert_eq!(last3["window"]["to"], "2026-02-06");
    assert_eq!(last3["data"]["never_drawn_count"], 997);
    assert_eq!(last3["data"]["frequency_distribution"]["1"], serde_json::json!(["012", "401", "430"]));
    assert_eq!(last3["data"]["digit_position_stats"]["4"]["hundreds"], 2);

    let last2 = read_json(&api.join("stats/last2.json"));
    assert_eq!(last2["data"]["never_drawn_count"], 97);

    let by_date = read_json(&api.join("stats/last3-by-date.json"));
    assert_eq!(by_date["count"], 31);
    assert_eq!(by_date["data"]["6"]["frequency_distribution"]["1"][0], "430");

    let day30 = read_json(&api.join("stats/last2/date30.json"));
    assert_eq!(day30["date"], 30);
    assert_eq!(day30["data"]["frequency_distribution"]["1"][0], "12");

    let index = read_json(&api.join("index.json"));
    assert_eq!(index["endpoints"]["by_year"], serde_json::json!(["year/2026.json", "year/2025.json"]));
    assert_eq!(index["endpoints"]["stats_last3"], "stats/last3.json");
    assert_eq!(index["endpoints"]["stats_last2_date"].as_array().unwrap().len(), 31);

    // history persisted for the next run
    let stored = store::load(&o.history_path()).unwrap();
    assert_eq!(stored.len(), 3);
}

#[test]
fn latest_mode_skips_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), Mode::Latest);

    let summary = run_with(&o, &StaticSource(PAGE.into()), now(), None).unwrap();
    assert!(summary.window.is_none());
    assert_eq!(summary.files_written.len(), 2 + 2 + 1);
    assert!(!o.out_dir.join("stats").exists());
    assert!(o.out_dir.join("index.json").exists());
}

#[test]
fn stored_history_is_merged_and_kept() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), Mode::Full);

    let older = DrawRecord::new(NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(), "9876").unwrap();
    let stale = DrawRecord::new(NaiveDate::from_ymd_opt(2026, 2, 6).unwrap(), "0000").unwrap();
    store::save(&o.history_path(), &History::from_records(vec![older, stale])).unwrap();

    let summary = run_with(&o, &StaticSource(PAGE.into()), now(), None).unwrap();
    assert_eq!(summary.history_len, 4);

    let results = read_json(&o.out_dir.join("results.json"));
    assert_eq!(results["data"][0]["numbers"]["last4"], "9876");
    assert!(results["data"][0]["detail_url"].is_null());
    assert_eq!(
        results["data"][3]["detail_url"],
        "https://lotto.thaiorc.com/lao/jackpot.php?contentID=502"
    );
    assert_eq!(results["data"][3]["numbers"]["last4"], "7430");
    assert!(o.out_dir.join("year/2020.json").exists());
}

#[test]
fn reference_date_pins_the_window() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts(dir.path(), Mode::Full);
    o.reference_date = NaiveDate::from_ymd_opt(2026, 1, 31);
    o.window_years = 1;

    let summary = run_with(&o, &StaticSource(PAGE.into()), now(), None).unwrap();
    let window = summary.window.unwrap();
    assert_eq!(window.to, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());

    let last3 = read_json(&o.out_dir.join("stats/last3.json"));
    assert_eq!(last3["period"], "1 ปีย้อนหลัง");
    assert_eq!(last3["data"]["draw_count"], 1);
    assert_eq!(last3["data"]["never_drawn_count"], 999);
}

#[test]
fn failed_extraction_leaves_published_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), Mode::Full);
    run_with(&o, &StaticSource(PAGE.into()), now(), None).unwrap();
    let before = fs::read_to_string(o.out_dir.join("latest.json")).unwrap();

    let later = Utc.with_ymd_and_hms(2026, 2, 7, 12, 0, 0).unwrap();
    let err = run_with(&o, &StaticSource("<html>maintenance</html>".into()), later, None).unwrap_err();
    assert!(matches!(err, Error::Extract(_)));

    let after = fs::read_to_string(o.out_dir.join("latest.json")).unwrap();
    assert_eq!(before, after);
    assert_eq!(store::load(&o.history_path()).unwrap().len(), 3);
}

#[test]
fn malformed_history_aborts_before_publishing() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), Mode::Full);

    fs::create_dir_all(&o.store_dir).unwrap();
    fs::write(
        o.history_path(),
        r#"[{"date": "2025-06-01", "numbers": {"last4": "1234", "last3": "23", "last2": "34"}}]"#,
    )
    .unwrap();

    let err = run_with(&o, &StaticSource(PAGE.into()), now(), None).unwrap_err();
    assert!(matches!(err, Error::InvalidHistory { .. }));
    assert!(!o.out_dir.exists());
}

#[test]
fn stored_suffix_disagreeing_with_last4_is_not_published() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), Mode::Full);

    fs::create_dir_all(&o.store_dir).unwrap();
    fs::write(
        o.history_path(),
        r#"[{"date": "2025-06-01", "numbers": {"last4": "1234", "last3": "999", "last2": "77"}}]"#,
    )
    .unwrap();

    let err = run_with(&o, &StaticSource(PAGE.into()), now(), None).unwrap_err();
    assert!(matches!(err, Error::InvalidHistory { .. }));
    assert!(!o.out_dir.join("stats/last3.json").exists());
    assert!(!o.out_dir.join("results.json").exists());
}

#[test]
fn history_is_not_saved_when_publishing_fails() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), Mode::Latest);

    // a plain file where the output directory should be
    fs::write(&o.out_dir, "not a directory").unwrap();

    assert!(run_with(&o, &StaticSource(PAGE.into()), now(), None).is_err());
    assert!(!o.history_path().exists());
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), Mode::Full);

    run_with(&o, &StaticSource(PAGE.into()), now(), None).unwrap();
    let first = fs::read_to_string(o.out_dir.join("stats/last3.json")).unwrap();
    run_with(&o, &StaticSource(PAGE.into()), now(), None).unwrap();
    let second = fs::read_to_string(o.out_dir.join("stats/last3.json")).unwrap();
    assert_eq!(first, second);
}
