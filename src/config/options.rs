// src/config/options.rs
use std::path::PathBuf;

use chrono::NaiveDate;

use super::consts::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Results documents plus every statistics document.
    #[default]
    Full,
    /// Results documents only (latest, results, years, index).
    Latest,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Some(Mode::Full),
            "latest" => Some(Mode::Latest),
            _ => None,
        }
    }

    pub fn includes_stats(self) -> bool {
        matches!(self, Mode::Full)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub mode: Mode,
    /// Root directory of the published JSON tree.
    pub out_dir: PathBuf,
    /// Where `history.json` lives between runs.
    pub store_dir: PathBuf,
    /// When false the store is neither read nor written.
    pub keep_history: bool,
    pub window_years: u32,
    /// Pins the end of the statistics window; defaults to the newest draw.
    pub reference_date: Option<NaiveDate>,
    /// Read the results page from a saved file instead of the network.
    pub input: Option<PathBuf>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Full,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            store_dir: PathBuf::from(STORE_DIR),
            keep_history: true,
            window_years: WINDOW_YEARS,
            reference_date: None,
            input: None,
        }
    }
}

impl AppOptions {
    pub fn history_path(&self) -> PathBuf {
        self.store_dir.join(HISTORY_FILE)
    }

    pub fn results_url(&self) -> String {
        join!(BASE_URL, RESULTS_PATH)
    }

    /// Human label published next to statistics, e.g. "10 ปีย้อนหลัง".
    pub fn period_label(&self) -> String {
        format!("{} {}", self.window_years, PERIOD_SUFFIX)
    }
}
