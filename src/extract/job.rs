//! Per-job item parsing.
//!
//! Job items carry no reliable classes for their fields, so each field is
//! recognized by the shape of its text instead of its position:
//!
//! | Field      | Shape                                   |
//! |------------|-----------------------------------------|
//! | level      | 1-3 digits                              |
//! | experience | `1,234 / 5,600`                         |
//! | name       | anything else with a letter in it       |
//!
//! Unplayed jobs show `-` for level and experience while still naming the
//! job, so placeholders must never win the name slot.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use super::text::{attr, element_text, first_image, normalize};
use crate::model::JobEntry;

const BLOCK_TAGS: &[&str] = &["div", "span", "p"];
static LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,3}$").unwrap());
static EXP_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9][0-9,.]*)\s*/\s*([0-9][0-9,.]*)$").unwrap());

/// "No value" markers. The second is an en dash mangled by a UTF-8 →
/// Windows-1252 round trip.
pub const PLACEHOLDERS: &[&str] = &["-", "\u{e2}\u{20ac}\u{201c}"];

const TOOLTIP_ATTRS: &[&str] = &["data-tooltip", "title", "aria-label"];

/// Fields recovered from one job item. `name` is `None` when nothing in the
/// item looked like a job name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedJob {
    pub icon: Option<String>,
    pub level: u32,
    pub name: Option<String>,
    pub tooltip: Option<String>,
    pub exp: u64,
    pub exp_max: u64,
}

impl ParsedJob {
    /// Finished entry, or `None` if no name was resolved.
    pub fn into_entry(self) -> Option<JobEntry> {
        let name = self.name?;
        Some(JobEntry {
            icon: self.icon,
            level: self.level,
            tooltip: self.tooltip.unwrap_or_else(|| name.clone()),
            name,
            exp: self.exp,
            exp_max: self.exp_max,
        })
    }
}

/// Parse one job item (`<li>`) into its fields.
pub fn parse_job_entry(item: ElementRef<'_>) -> ParsedJob {
    let mut job = ParsedJob {
        icon: first_image(item),
        ..ParsedJob::default()
    };
    let mut level_found = false;
    let mut exp_found = false;

    for block in sub_blocks(item) {
        let text = element_text(block);
        if text.is_empty() {
            continue;
        }

        if !level_found {
            if let Some(level) = parse_level(&text) {
                job.level = level;
                level_found = true;
                continue;
            }
        }

        if !exp_found {
            if let Some((exp, exp_max)) = parse_exp_pair(&text) {
                job.exp = exp;
                job.exp_max = exp_max;
                exp_found = true;
                continue;
            }
        }

        if job.name.is_none() && is_name_candidate(&text) {
            job.tooltip = tooltip_for(block, item);
            job.name = Some(text);
        }
    }

    job
}

/// Text-owning `div`/`span`/`p` elements of the item, in document order.
///
/// Every non-blank text node is owned by its nearest block ancestor. A block
/// nested inside another owner is folded into it, so a field is always read
/// whole. An item with no owners is treated as a single block.
fn sub_blocks(item: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut blocks: Vec<ElementRef<'_>> = Vec::new();

    for node in item.descendants() {
        let has_text = node
            .value()
            .as_text()
            .is_some_and(|text| !text.trim().is_empty());
        if !has_text {
            continue;
        }

        let owner = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != item.id())
            .filter_map(ElementRef::wrap)
            .find(|element| BLOCK_TAGS.contains(&element.value().name()));
        let Some(owner) = owner else {
            continue;
        };

        if blocks
            .iter()
            .any(|&block| block == owner || is_within(owner, block))
        {
            continue;
        }
        blocks.retain(|&block| !is_within(block, owner));
        blocks.push(owner);
    }

    if blocks.is_empty() {
        vec![item]
    } else {
        blocks
    }
}

fn is_within(inner: ElementRef<'_>, outer: ElementRef<'_>) -> bool {
    inner.ancestors().any(|ancestor| ancestor.id() == outer.id())
}

/// Level text: 1-3 ASCII digits and nothing else.
pub fn parse_level(text: &str) -> Option<u32> {
    if LEVEL.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// `current / max` experience, thousands separators allowed.
pub fn parse_exp_pair(text: &str) -> Option<(u64, u64)> {
    let caps = EXP_PAIR.captures(text)?;
    let current = parse_grouped(&caps[1])?;
    let max = parse_grouped(&caps[2])?;
    Some((current, max))
}

fn parse_grouped(digits: &str) -> Option<u64> {
    digits
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .ok()
}

pub fn is_placeholder(text: &str) -> bool {
    PLACEHOLDERS.contains(&text)
}

/// Non-empty, not a placeholder, and contains at least one letter.
pub fn is_name_candidate(text: &str) -> bool {
    !text.is_empty() && !is_placeholder(text) && text.chars().any(char::is_alphabetic)
}

/// Explicit tooltip on the name block or an enclosing element inside the
/// item.
fn tooltip_for<'a>(block: ElementRef<'a>, item: ElementRef<'a>) -> Option<String> {
    let mut current = Some(block);
    while let Some(element) = current {
        if element == item {
            break;
        }
        if let Some(tooltip) = TOOLTIP_ATTRS.iter().find_map(|name| attr(element, name)) {
            return Some(normalize(tooltip));
        }
        current = element.parent().and_then(ElementRef::wrap);
    }
    None
}
