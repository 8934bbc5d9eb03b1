// tests/cli_options.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use lotto_scrape::cli::{parse_args, Command};
use lotto_scrape::config::{AppOptions, Mode};
use lotto_scrape::Error;

fn run_opts(args: &[&str]) -> AppOptions {
    match parse_args(args.iter().copied()).unwrap() {
        Command::Run(opts) => opts,
        Command::Help => panic!("unexpected help"),
    }
}

#[test]
fn defaults() {
    let opts = run_opts(&[]);
    assert_eq!(opts, AppOptions::default());
    assert_eq!(opts.mode, Mode::Full);
    assert_eq!(opts.window_years, 10);
    assert_eq!(opts.history_path(), PathBuf::from(".store").join("history.json"));
    assert_eq!(opts.period_label(), "10 ปีย้อนหลัง");
    assert_eq!(opts.results_url(), "https://lotto.thaiorc.com/lao/lottery.php");
}

#[test]
fn all_flags() {
    let opts = run_opts(&[
        "--mode", "LATEST",
        "-o", "public/api",
        "--store", "state",
        "--no-history",
        "--years", "5",
        "--reference-date", "2026-02-06",
        "--input", "page.html",
    ]);
    assert_eq!(opts.mode, Mode::Latest);
    assert!(!opts.mode.includes_stats());
    assert_eq!(opts.out_dir, PathBuf::from("public/api"));
    assert_eq!(opts.store_dir, PathBuf::from("state"));
    assert!(!opts.keep_history);
    assert_eq!(opts.window_years, 5);
    assert_eq!(opts.period_label(), "5 ปีย้อนหลัง");
    assert_eq!(opts.reference_date, NaiveDate::from_ymd_opt(2026, 2, 6));
    assert_eq!(opts.input, Some(PathBuf::from("page.html")));
}

#[test]
fn help_short_circuits() {
    assert_eq!(parse_args(["--years", "3", "-h", "--bogus"]).unwrap(), Command::Help);
}

#[test]
fn rejects_bad_values() {
    for args in [
        vec!["--mode", "weekly"],
        vec!["--years", "0"],
        vec!["--years", "-1"],
        vec!["--reference-date", "06/02/2569"],
        vec!["--out"],
        vec!["--frobnicate"],
    ] {
        let err = parse_args(args.clone()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }), "{args:?} gave {err}");
    }
}
