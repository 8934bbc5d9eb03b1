// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://lotto.thaiorc.com";
pub const RESULTS_PATH: &str = "/lao/lottery.php";
pub const DETAIL_PATH: &str = "/lao/jackpot.php";
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "th,en;q=0.9";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const HISTORY_FILE: &str = "history.json";

// Export
pub const DEFAULT_OUT_DIR: &str = "api";
pub const STATUS_OK: &str = "ok";
pub const API_NAME: &str = "Lao Lottery API";
pub const API_DESCRIPTION: &str = "ข้อมูลผลหวยลาว scraped จาก thaiorc.com";

// Stats
pub const WINDOW_YEARS: u32 = 10;
pub const PERIOD_SUFFIX: &str = "ปีย้อนหลัง"; // "<n> years back"
