use std::path::Path;

use anyhow::{Context, Result};

use lodestone_jobs::extract::{is_view_source, parse_character_page, Group};

use super::output::print_json;

pub fn cmd_parse(file: &Path, compact: bool) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let raw = String::from_utf8_lossy(&bytes);

    let jobs = parse_character_page(&raw);
    tracing::info!(
        view_source = is_view_source(&raw),
        combat = jobs.group_job_count(Group::Combat),
        vocation = jobs.group_job_count(Group::Vocation),
        "Parsed {}",
        file.display()
    );
    print_json(&jobs, compact)
}
