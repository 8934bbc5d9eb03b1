// src/core/thai.rs
// Thai text and calendar helpers: TIS-620 / windows-874 decoding and
// Buddhist-era dates (BE year = CE year + 543).

use chrono::{Datelike, NaiveDate};

pub const BE_OFFSET: i32 = 543;

/// Decode a response body. Valid UTF-8 is taken as is; anything else is
/// treated as windows-874, the superset of TIS-620 the source site serves.
pub fn decode_body(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => decode_windows_874(bytes),
    }
}

pub fn decode_windows_874(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| windows_874_char(b)).collect()
}

fn windows_874_char(b: u8) -> char {
    match b {
        0x00..=0x7F => b as char,
        0x80 => '\u{20AC}',
        0x85 => '\u{2026}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0xA0 => '\u{00A0}',
        // Thai block is a straight offset: 0xA1 -> U+0E01 ... 0xFB -> U+0E5B
        0xA1..=0xDA | 0xDF..=0xFB => char::from_u32(b as u32 + 0x0D60).unwrap_or('\u{FFFD}'),
        _ => '\u{FFFD}',
    }
}

/// `06/02/2569` -> 2026-02-06.
pub fn parse_thai_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year_be: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year_be - BE_OFFSET, month, day)
}

/// 2026-02-06 -> `06/02/2569`.
pub fn format_thai_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year() + BE_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buddhist_era_round_trip() {
        let d = parse_thai_date("06/02/2569").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 6).unwrap());
        assert_eq!(format_thai_date(d), "06/02/2569");
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_thai_date("31/02/2569"), None);
        assert_eq!(parse_thai_date("2569-02-06"), None);
        assert_eq!(parse_thai_date("06/02/2569/1"), None);
        assert_eq!(parse_thai_date(""), None);
    }

    #[test]
    fn decodes_tis620_thai_block() {
        // "เลข" in TIS-620
        let bytes = [0xE0, 0xC5, 0xA2, b' ', b'0'];
        assert_eq!(decode_body(&bytes), "เลข 0");
    }

    #[test]
    fn utf8_passes_through() {
        assert_eq!(decode_body("เลข 0".as_bytes()), "เลข 0");
    }
}
