//! Character page extraction.
//!
//! Turns the raw text of a character's class/job page into a
//! [`CharacterJobs`] record. The pipeline is synchronous and never fails:
//! irregular markup degrades to empty fields rather than errors.
//!
//! # Stages
//!
//! | Stage | Module |
//! |-------|--------|
//! | view-source unwrapping | [`source`] |
//! | character reference decoding | [`entities`] |
//! | section label mapping | [`category`] |
//! | per-item field recognition | [`job`] |
//! | section walking | [`aggregate`] |
//!
//! # Example
//!
//! ```rust
//! use lodestone_jobs::extract::parse_character_page;
//!
//! let html = r#"<h3>Tank</h3><ul><li><div>90</div><div>Paladin</div><div>0 / 0</div></li></ul>"#;
//! let jobs = parse_character_page(html);
//! assert_eq!(jobs.combat.tank.jobs[0].name, "Paladin");
//! ```

pub mod aggregate;
pub mod category;
pub mod entities;
pub mod job;
pub mod source;
pub mod text;

use scraper::Html;

use crate::model::CharacterJobs;

pub use aggregate::aggregate;
pub use category::{map_category, Category, Group};
pub use job::{parse_job_entry, ParsedJob};
pub use source::{is_view_source, reconstruct_source};
pub use text::normalize;

/// Parse raw page text (plain HTML or a view-source dump).
pub fn parse_character_page(raw: &str) -> CharacterJobs {
    let markup = reconstruct_source(raw);
    let document = Html::parse_document(&markup);
    aggregate(&document)
}
