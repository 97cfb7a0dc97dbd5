//! Section walking and record assembly.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::category::{map_category, Category};
use super::job::parse_job_entry;
use super::text::{element_text, first_image, first_match};
use crate::model::{CharacterJobs, Details};

static CHARACTER_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".frame__chara__name").unwrap());
static CHARACTER_WORLD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".frame__chara__world").unwrap());
static HEADER: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

/// Build the job record from a parsed character page.
///
/// Missing identity elements, unknown section labels, headers without a
/// following list and items without a name are all skipped quietly.
pub fn aggregate(document: &Html) -> CharacterJobs {
    let root = document.root_element();
    let mut jobs = CharacterJobs {
        details: Details {
            name: first_match(root, &CHARACTER_NAME)
                .map(element_text)
                .unwrap_or_default(),
            world: first_match(root, &CHARACTER_WORLD)
                .map(element_text)
                .unwrap_or_default(),
        },
        ..CharacterJobs::default()
    };

    for header in document.select(&HEADER) {
        let label = element_text(header).to_lowercase();
        let Some(category) = map_category(&label) else {
            continue;
        };
        collect_section(&mut jobs, category, header);
    }

    tracing::debug!(
        name = %jobs.details.name,
        world = %jobs.details.world,
        jobs = jobs.job_count(),
        "Aggregated character page"
    );
    jobs
}

fn collect_section(jobs: &mut CharacterJobs, category: Category, header: ElementRef<'_>) {
    let slot = jobs.slot_mut(category);
    if slot.icon.is_none() {
        slot.icon = first_image(header);
    }

    let Some(list) = following_list(header) else {
        tracing::debug!(%category, "Section has no job list");
        return;
    };

    let before = slot.jobs.len();
    slot.jobs.extend(
        list.children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li")
            .filter_map(|item| parse_job_entry(item).into_entry()),
    );
    tracing::debug!(%category, added = slot.jobs.len() - before, "Collected section");
}

/// First `ul`/`ol` among the header's following siblings.
fn following_list(header: ElementRef<'_>) -> Option<ElementRef<'_>> {
    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| matches!(sibling.value().name(), "ul" | "ol"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> CharacterJobs {
        aggregate(&Html::parse_document(html))
    }

    const JOB: &str = r#"<li><img src="pld.png"><div>90</div><div data-tooltip="Paladin / Gladiator">Paladin</div><div>0 / 0</div></li>"#;

    #[test]
    fn single_tank_section() {
        let jobs = run(&format!("<html><body><h3>Tank</h3><ul>{JOB}</ul></body></html>"));

        assert_eq!(jobs.combat.tank.jobs.len(), 1);
        assert!(jobs.combat.healer.jobs.is_empty());
        let paladin = &jobs.combat.tank.jobs[0];
        assert_eq!(paladin.name, "Paladin");
        assert_eq!(paladin.level, 90);
        assert_eq!(paladin.tooltip, "Paladin / Gladiator");
        assert_eq!(paladin.icon.as_deref(), Some("pld.png"));
    }

    #[test]
    fn missing_identity_defaults_to_empty() {
        let jobs = run("<html><body><p>nothing here</p></body></html>");
        assert_eq!(jobs.details, Details::default());
        assert_eq!(jobs, CharacterJobs::default());
    }

    #[test]
    fn reads_identity_block() {
        let jobs = run(
            r#"<div class="frame__chara">
                 <p class="frame__chara__name">  Alyx   Example </p>
                 <p class="frame__chara__world">Gilgamesh [Aether]</p>
               </div>"#,
        );
        assert_eq!(jobs.details.name, "Alyx Example");
        assert_eq!(jobs.details.world, "Gilgamesh [Aether]");
    }

    #[test]
    fn list_need_not_be_adjacent() {
        let jobs = run(&format!(
            "<h4>Healer</h4><p>blurb</p><div class=\"spacer\"></div><ul>{JOB}</ul>"
        ));
        assert_eq!(jobs.combat.healer.jobs.len(), 1);
    }

    #[test]
    fn header_without_list_is_skipped() {
        let jobs = run("<div><h3><img src=\"tank.png\">Tank</h3><p>no jobs</p></div>");
        assert!(jobs.combat.tank.jobs.is_empty());
        assert_eq!(jobs.combat.tank.icon.as_deref(), Some("tank.png"));
    }

    #[test]
    fn unknown_sections_are_ignored() {
        let jobs = run(&format!("<h3>Achievements</h3><ul>{JOB}</ul>"));
        assert_eq!(jobs.job_count(), 0);
    }

    #[test]
    fn nameless_items_are_dropped() {
        let jobs = run(&format!(
            "<h3>Melee DPS</h3><ul><li><div>0</div><div>-</div><div>0 / 0</div></li>{JOB}</ul>"
        ));
        assert_eq!(jobs.combat.melee_dps.jobs.len(), 1);
        assert_eq!(jobs.combat.melee_dps.jobs[0].name, "Paladin");
    }

    #[test]
    fn only_direct_items_are_parsed() {
        let jobs = run(
            "<h3>Tank</h3><ul><li><div>90</div><div>Warrior</div>\
             <ul><li><div>Nested</div></li></ul></li></ul>",
        );
        let names: Vec<_> = jobs.combat.tank.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["Warrior"]);
    }

    #[test]
    fn first_header_icon_wins_and_jobs_accumulate() {
        let jobs = run(&format!(
            "<section><h3><img src=\"first.png\">Tank</h3><ul>{JOB}</ul></section>\
             <section><h3><img src=\"second.png\">Tank</h3>\
             <ul><li><div>80</div><div>Warrior</div></li></ul></section>"
        ));
        let tank = &jobs.combat.tank;
        assert_eq!(tank.icon.as_deref(), Some("first.png"));
        let names: Vec<_> = tank.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["Paladin", "Warrior"]);
    }

    #[test]
    fn vocation_sections_land_in_their_group() {
        let jobs = run(
            "<h3>Disciples of the Hand</h3><ul><li><div>100</div><div>Carpenter</div><div>1 / 2</div></li></ul>\
             <h3>Disciples of the Land</h3><ul><li><div>-</div><div>Miner</div><div>-</div></li></ul>",
        );
        assert_eq!(jobs.vocation.hand.jobs[0].name, "Carpenter");
        assert_eq!(jobs.vocation.land.jobs[0].name, "Miner");
        assert_eq!(jobs.vocation.land.jobs[0].level, 0);
    }

    #[test]
    fn header_label_is_case_and_whitespace_insensitive() {
        let jobs = run(&format!("<h2>  PHYSICAL\n  Ranged   DPS </h2><ol>{JOB}</ol>"));
        assert_eq!(jobs.combat.physical_ranged_dps.jobs.len(), 1);
        assert!(jobs.combat.melee_dps.jobs.is_empty());
    }
}
