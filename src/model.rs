//! Output record for a character's job progression.
//!
//! Every taxonomy slot is a named struct field, so the JSON shape is fixed:
//! an unrecognized section label has nowhere to go.

use serde::{Deserialize, Serialize};

use crate::extract::category::{Category, Group};

/// One job/class as shown on the character page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntry {
    #[serde(rename = "job_icon")]
    pub icon: Option<String>,
    #[serde(rename = "job_level")]
    pub level: u32,
    #[serde(rename = "job_name")]
    pub name: String,
    #[serde(rename = "job_name_tooltip")]
    pub tooltip: String,
    #[serde(rename = "job_exp")]
    pub exp: u64,
    #[serde(rename = "job_exp_max")]
    pub exp_max: u64,
}

/// A taxonomy slot: header icon plus jobs in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub icon: Option<String>,
    pub jobs: Vec<JobEntry>,
}

/// Disciples of War / Magic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatJobs {
    #[serde(rename = "Tank")]
    pub tank: CategorySlot,
    #[serde(rename = "Healer")]
    pub healer: CategorySlot,
    #[serde(rename = "Melee DPS")]
    pub melee_dps: CategorySlot,
    #[serde(rename = "Physical Ranged DPS")]
    pub physical_ranged_dps: CategorySlot,
    #[serde(rename = "Magical Ranged DPS")]
    pub magical_ranged_dps: CategorySlot,
    #[serde(rename = "Limited Jobs")]
    pub limited_jobs: CategorySlot,
}

/// Disciples of the Hand / Land.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocationJobs {
    #[serde(rename = "Disciples of the Hand")]
    pub hand: CategorySlot,
    #[serde(rename = "Disciples of the Land")]
    pub land: CategorySlot,
}

/// Character identity shown in the page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    pub name: String,
    pub world: String,
}

/// Parsed job progression for one character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterJobs {
    pub details: Details,
    #[serde(rename = "DoW/DoM")]
    pub combat: CombatJobs,
    #[serde(rename = "DoH/DoL")]
    pub vocation: VocationJobs,
}

impl CharacterJobs {
    pub fn slot(&self, category: Category) -> &CategorySlot {
        match category {
            Category::Tank => &self.combat.tank,
            Category::Healer => &self.combat.healer,
            Category::MeleeDps => &self.combat.melee_dps,
            Category::PhysicalRangedDps => &self.combat.physical_ranged_dps,
            Category::MagicalRangedDps => &self.combat.magical_ranged_dps,
            Category::LimitedJobs => &self.combat.limited_jobs,
            Category::Hand => &self.vocation.hand,
            Category::Land => &self.vocation.land,
        }
    }

    pub fn slot_mut(&mut self, category: Category) -> &mut CategorySlot {
        match category {
            Category::Tank => &mut self.combat.tank,
            Category::Healer => &mut self.combat.healer,
            Category::MeleeDps => &mut self.combat.melee_dps,
            Category::PhysicalRangedDps => &mut self.combat.physical_ranged_dps,
            Category::MagicalRangedDps => &mut self.combat.magical_ranged_dps,
            Category::LimitedJobs => &mut self.combat.limited_jobs,
            Category::Hand => &mut self.vocation.hand,
            Category::Land => &mut self.vocation.land,
        }
    }

    /// Total number of jobs across all slots.
    pub fn job_count(&self) -> usize {
        Category::ALL
            .iter()
            .map(|&category| self.slot(category).jobs.len())
            .sum()
    }

    /// Number of jobs in one group.
    pub fn group_job_count(&self, group: Group) -> usize {
        Category::ALL
            .iter()
            .filter(|category| category.group() == group)
            .map(|&category| self.slot(category).jobs.len())
            .sum()
    }
}
