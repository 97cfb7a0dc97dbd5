//! View-source reconstruction.
//!
//! Some fetch paths hand back a browser's syntax-highlighted "view-source"
//! rendering instead of the page itself: a table with one row per source
//! line, where each `<td class="line-content">` cell holds that line
//! HTML-escaped and wrapped in highlighting spans. This module stitches the
//! original markup back together so it can be parsed normally.
//!
//! Cells are located by scanning the raw text rather than parsing it. A cell
//! whose `</td>` is missing before the next cell opens is dropped.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::entities::decode_entities;

static CELL_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<td\b[^>]*>").unwrap());
static CELL_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</td\s*>").unwrap());
static CLASS_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).unwrap()
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

const LINE_CONTENT_CLASS: &str = "line-content";

/// Recover page markup from a view-source dump.
///
/// Returns the input unchanged (borrowed) when it contains no line-content
/// cells. Otherwise returns the cells' text, tag-stripped and entity-decoded,
/// joined with `\n` in scan order.
pub fn reconstruct_source(raw: &str) -> Cow<'_, str> {
    let lines = line_contents(raw);
    if lines.is_empty() {
        return Cow::Borrowed(raw);
    }

    tracing::debug!(lines = lines.len(), "Reconstructed view-source dump");
    let rebuilt: Vec<String> = lines
        .into_iter()
        .map(|cell| {
            let stripped = TAG.replace_all(cell, "");
            decode_entities(&stripped).into_owned()
        })
        .collect();

    Cow::Owned(rebuilt.join("\n"))
}

/// Returns `true` if `raw` looks like a view-source dump.
pub fn is_view_source(raw: &str) -> bool {
    CELL_OPEN
        .find_iter(raw)
        .any(|open| is_line_content_cell(open.as_str()))
}

/// Inner text of every well-formed line-content cell, in document order.
fn line_contents(raw: &str) -> Vec<&str> {
    let opens: Vec<_> = CELL_OPEN.find_iter(raw).collect();
    let mut cells = Vec::new();

    for (idx, open) in opens.iter().enumerate() {
        if !is_line_content_cell(open.as_str()) {
            continue;
        }

        let region_end = opens.get(idx + 1).map_or(raw.len(), regex::Match::start);
        let region = &raw[open.end()..region_end];

        match CELL_CLOSE.find(region) {
            Some(close) => cells.push(&region[..close.start()]),
            None => tracing::debug!(offset = open.start(), "Skipping unterminated line cell"),
        }
    }

    cells
}

fn is_line_content_cell(open_tag: &str) -> bool {
    CLASS_ATTR.captures(open_tag).is_some_and(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .any(|value| value.as_str().contains(LINE_CONTENT_CLASS))
    })
}
