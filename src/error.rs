//! Error types for lotto_scrape
//!
//! One crate-wide [`Error`] plus the two domain errors the pipeline can raise
//! on bad data: [`ExtractError`] (the results page did not look like we expect)
//! and [`StatsError`] (a stored record cannot be counted).

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for lotto_scrape operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for lotto_scrape
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid command-line value or option combination
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the bad setting
        message: String,
    },

    /// Transport-level failure talking to the source site
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The source site answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Status code returned
        status: u16,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Renaming a finished temp file into place failed
    #[error("could not replace file: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// The results page could not be turned into draw records
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Aggregation refused the history
    #[error("statistics failed: {0}")]
    Stats(#[from] StatsError),

    /// A record in the stored history breaks the draw invariants
    #[error("stored history {}: draw {date} has last4 {last4:?}, last3 {last3:?}, last2 {last2:?}", .path.display())]
    InvalidHistory {
        /// History file that was loaded
        path: PathBuf,
        /// Draw date of the offending record
        date: NaiveDate,
        /// Stored 4-digit number
        last4: String,
        /// Stored 3-digit suffix
        last3: String,
        /// Stored 2-digit suffix
        last2: String,
    },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config { message: message.into() }
    }
}

/// Results-page extraction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// No draw rows were found anywhere in the page
    #[error("no draw rows found in results page")]
    NoResults,

    /// Date link text is not a `DD/MM/YYYY` Buddhist-era date
    #[error("unparseable draw date {raw:?}")]
    BadDate {
        /// Text as it appeared on the page
        raw: String,
    },

    /// The 4-digit cell is not exactly four digits
    #[error("draw {date}: bad 4-digit number {raw:?}")]
    BadNumber {
        /// Draw date
        date: NaiveDate,
        /// Text as it appeared on the page
        raw: String,
    },

    /// A printed suffix column disagrees with the 4-digit number
    #[error("draw {date}: {field} is {found:?} but last4 implies {expected:?}")]
    Inconsistent {
        /// Draw date
        date: NaiveDate,
        /// `last3` or `last2`
        field: &'static str,
        /// Suffix derived from last4
        expected: String,
        /// Text as it appeared on the page
        found: String,
    },
}

/// Statistics aggregation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// A record's suffix is not a zero-padded numeric string of the right width
    #[error("malformed record {date}: {field} = {value:?}")]
    MalformedRecord {
        /// Draw date of the offending record
        date: NaiveDate,
        /// `last3` or `last2`
        field: &'static str,
        /// The stored value
        value: String,
    },
}
