// src/draw.rs
//
// One lottery draw. `last3` and `last2` are always suffixes of `last4`; they
// are kept as strings because leading zeros are significant.

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::consts::{BASE_URL, DETAIL_PATH};
use crate::core::thai;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Numbers {
    pub last4: String,
    pub last3: String,
    pub last2: String,
}

impl Numbers {
    /// Derive the suffixes from a 4-digit number. Returns None unless `last4`
    /// is exactly four ASCII digits.
    pub fn from_last4(last4: &str) -> Option<Self> {
        if !is_digits(last4, 4) {
            return None;
        }
        Some(Self {
            last4: s!(last4),
            last3: s!(&last4[1..]),
            last2: s!(&last4[2..]),
        })
    }

    /// Width and suffix checks for every field.
    pub fn is_well_formed(&self) -> bool {
        is_digits(&self.last4, 4)
            && is_digits(&self.last3, 3)
            && is_digits(&self.last2, 2)
            && self.last4.ends_with(&self.last3)
            && self.last4.ends_with(&self.last2)
    }
}

/// `s` is exactly `width` ASCII digits.
pub fn is_digits(s: &str, width: usize) -> bool {
    s.len() == width && s.bytes().all(|b| b.is_ascii_digit())
}

/// `date_thai` is written on output and ignored on input.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DrawRecord {
    pub date: NaiveDate,
    pub numbers: Numbers,
    #[serde(default)]
    pub detail_url: Option<String>,
}

impl DrawRecord {
    pub fn new(date: NaiveDate, last4: &str) -> Option<Self> {
        Some(Self { date, numbers: Numbers::from_last4(last4)?, detail_url: None })
    }

    pub fn with_content_id(mut self, content_id: &str) -> Self {
        self.detail_url = Some(format!("{BASE_URL}{DETAIL_PATH}?contentID={content_id}"));
        self
    }

    pub fn date_thai(&self) -> String {
        thai::format_thai_date(self.date)
    }
}

impl Serialize for DrawRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("DrawRecord", 4)?;
        st.serialize_field("date", &self.date)?;
        st.serialize_field("date_thai", &self.date_thai())?;
        st.serialize_field("numbers", &self.numbers)?;
        // always present, null without a detail link
        st.serialize_field("detail_url", &self.detail_url)?;
        st.end()
    }
}
