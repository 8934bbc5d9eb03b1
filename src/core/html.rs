// src/core/html.rs
// Naive, case-insensitive tag scanning. Only ASCII is lowered, so byte offsets
// in the lowered copy line up with the input (Thai text included).

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Find the next complete `open ... close` block at or after `from`.
/// Returns byte offsets `(start_of_open_tag, end_of_close_tag)`.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    next_tag_block_lc(&to_lower(s), o, c, from)
}

/// Same as [`next_tag_block_ci`] over a copy already passed through
/// [`to_lower`]. Offsets are valid in the original text too, so callers
/// scanning a whole page lower it once and slice the original.
pub fn next_tag_block_lc(lc: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = lc[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + cl.len();
    Some((start, end))
}

/// All `open ... close` blocks inside `s`, in document order.
pub fn tag_blocks_ci<'a>(s: &'a str, o: &str, c: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_tag_block_lc(&lc, o, c, pos) {
        out.push(&s[b_s..b_e]);
        pos = b_e;
    }
    out
}

/// The opening tag of a block, `<td class="x">` for `<td class="x">...</td>`.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Value of attribute `name` in an opening tag. Handles `"..."`, `'...'` and bare values.
pub fn attr_value(tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(tag);
    let needle = join!(&to_lower(name), "=");
    let mut from = 0usize;
    let at = loop {
        let i = lc.get(from..)?.find(&needle)? + from;
        // must be a whole attribute name, not the tail of another one
        let boundary = lc[..i].chars().last().is_none_or(|c| c.is_whitespace());
        if boundary { break i; }
        from = i + needle.len();
    };
    let rest = &tag[at + needle.len()..];
    let value = match rest.chars().next()? {
        q @ ('"' | '\'') => {
            let body = &rest[1..];
            &body[..body.find(q)?]
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(rest.len());
            &rest[..end]
        }
    };
    Some(value.to_string())
}

/// Whitespace-separated `class` tokens of an opening tag.
pub fn class_list(tag: &str) -> Vec<String> {
    attr_value(tag, "class")
        .map(|v| v.split_whitespace().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Visible text of a block: inner HTML, entities decoded, tags dropped, whitespace collapsed.
pub fn cell_text(block: &str) -> String {
    let inner = inner_after_open_tag(block);
    strip_tags(super::sanitize::normalize_entities(&inner))
}
