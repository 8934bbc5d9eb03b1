// src/specs/mod.rs
//! # Page extraction specs
//!
//! Each spec knows *where the ground truth lives in the HTML* of one page and
//! turns it into typed, validated values. Nothing outside this module walks
//! raw HTML.
//!
//! ## Conventions
//! - Case-insensitive tag detection via `core::html`; no full-document regexes.
//! - Scan locally inside known blocks (`<tr>…</tr>`, `<td class="stats-title">…`).
//! - `parse_doc` is pure and unit-tested; `fetch` is the thin I/O wrapper.
//! - Rows that are clearly layout are skipped; rows that look like data but do
//!   not validate are errors.

pub mod results;
