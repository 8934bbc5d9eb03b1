// src/specs/results.rs
//
// The results page lists one draw per row, newest first:
//
//   <tr>
//     <td class="stats-title"><a href="jackpot.php?contentID=123">06/02/2569</a></td>
//     <td>7430</td> <td>430</td> <td>30</td>
//   </tr>
//
// Header rows carry `stats-title3` and are skipped.

use std::time::Instant;

use crate::core::html::{
    attr_value, cell_text, class_list, next_tag_block_ci, next_tag_block_lc, open_tag, tag_blocks_ci, to_lower,
};
use crate::core::net::Source;
use crate::core::sanitize::digits_only;
use crate::core::thai::parse_thai_date;
use crate::draw::DrawRecord;
use crate::error::{ExtractError, Result};

const DATA_CLASS: &str = "stats-title";
const HEADER_CLASS: &str = "stats-title3";

/// Fetch the results page and extract its draws, in page order.
pub fn fetch(source: &dyn Source, url: &str) -> Result<Vec<DrawRecord>> {
    let doc = source.fetch(url)?;
    let t = Instant::now();
    let draws = parse_doc(&doc)?;
    logd!("Results: parsed {} draws in {:?}", draws.len(), t.elapsed());
    Ok(draws)
}

/// Split out for unit tests.
pub fn parse_doc(doc: &str) -> std::result::Result<Vec<DrawRecord>, ExtractError> {
    let mut out = Vec::new();
    // lowered once; offsets line up with `doc`
    let lc = to_lower(doc);

    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_lc(&lc, "<tr", "</tr>", pos) {
        let tr = &doc[tr_s..tr_e];

        // Layout rows wrap whole tables; the block then ends at an inner </tr>.
        // Step inside and take the innermost rows instead.
        if let Some(inner) = lc[tr_s + 3..tr_e].find("<tr") {
            pos = tr_s + 3 + inner;
            continue;
        }
        pos = tr_e;

        if let Some(rec) = parse_row(tr)? {
            out.push(rec);
        }
    }

    if out.is_empty() {
        return Err(ExtractError::NoResults);
    }
    Ok(out)
}

fn parse_row(tr: &str) -> std::result::Result<Option<DrawRecord>, ExtractError> {
    let tds = tag_blocks_ci(tr, "<td", "</td>");
    if tds.len() != 4 {
        return Ok(None);
    }

    let classes = class_list(open_tag(tds[0]));
    let is_data = classes.iter().any(|c| c == DATA_CLASS);
    let is_header = classes.iter().any(|c| c == HEADER_CLASS);
    if !is_data || is_header {
        return Ok(None);
    }

    let Some((a_s, a_e)) = next_tag_block_ci(tds[0], "<a", "</a>", 0) else {
        return Ok(None);
    };
    let link = &tds[0][a_s..a_e];

    let date_raw = cell_text(link);
    let date = parse_thai_date(&date_raw).ok_or_else(|| ExtractError::BadDate { raw: date_raw.clone() })?;

    let last4 = cell_text(tds[1]);
    if digits_only(&last4).is_empty() {
        // announced but not drawn yet
        logd!("Results: {date} has no number yet, skipping");
        return Ok(None);
    }
    let mut rec = DrawRecord::new(date, &last4)
        .ok_or_else(|| ExtractError::BadNumber { date, raw: last4.clone() })?;

    check_suffix(&rec, "last3", &rec.numbers.last3, &cell_text(tds[2]))?;
    check_suffix(&rec, "last2", &rec.numbers.last2, &cell_text(tds[3]))?;

    if let Some(id) = attr_value(open_tag(link), "href").as_deref().and_then(content_id) {
        rec = rec.with_content_id(&id);
    }
    Ok(Some(rec))
}

fn check_suffix(
    rec: &DrawRecord,
    field: &'static str,
    expected: &str,
    found: &str,
) -> std::result::Result<(), ExtractError> {
    if expected == found {
        return Ok(());
    }
    Err(ExtractError::Inconsistent {
        date: rec.date,
        field,
        expected: s!(expected),
        found: s!(found),
    })
}

/// `jackpot.php?contentID=123&x=1` -> "123".
fn content_id(href: &str) -> Option<String> {
    const KEY: &str = "contentID=";
    let at = href.find(KEY)? + KEY.len();
    let id: String = href[at..].chars().take_while(|c| c.is_ascii_digit()).collect();
    if id.is_empty() { None } else { Some(id) }
}
