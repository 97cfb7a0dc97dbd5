//! Section label to taxonomy slot mapping.
//!
//! Headers are free-form text (sometimes with icons or extra markup), so
//! labels are matched by substring in a fixed priority order. There is no
//! bare "dps" rule; each DPS slot needs its full qualifier.

use std::fmt;

/// Top-level grouping of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Disciples of War / Magic.
    Combat,
    /// Disciples of the Hand / Land.
    Vocation,
}

impl Group {
    /// Key used for this group in the JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Group::Combat => "DoW/DoM",
            Group::Vocation => "DoH/DoL",
        }
    }
}

/// One of the eight fixed taxonomy slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tank,
    Healer,
    MeleeDps,
    PhysicalRangedDps,
    MagicalRangedDps,
    LimitedJobs,
    Hand,
    Land,
}

impl Category {
    /// All slots in output order.
    pub const ALL: [Category; 8] = [
        Category::Tank,
        Category::Healer,
        Category::MeleeDps,
        Category::PhysicalRangedDps,
        Category::MagicalRangedDps,
        Category::LimitedJobs,
        Category::Hand,
        Category::Land,
    ];

    pub fn group(self) -> Group {
        match self {
            Category::Hand | Category::Land => Group::Vocation,
            _ => Group::Combat,
        }
    }

    /// Key used for this slot in the JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Category::Tank => "Tank",
            Category::Healer => "Healer",
            Category::MeleeDps => "Melee DPS",
            Category::PhysicalRangedDps => "Physical Ranged DPS",
            Category::MagicalRangedDps => "Magical Ranged DPS",
            Category::LimitedJobs => "Limited Jobs",
            Category::Hand => "Disciples of the Hand",
            Category::Land => "Disciples of the Land",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group().key(), self.key())
    }
}

/// Substring rules, first match wins.
const COMBAT_RULES: &[(&str, Category)] = &[
    ("tank", Category::Tank),
    ("healer", Category::Healer),
    ("melee dps", Category::MeleeDps),
    ("physical ranged dps", Category::PhysicalRangedDps),
    ("magical ranged dps", Category::MagicalRangedDps),
    ("limited", Category::LimitedJobs),
];

/// Map a normalized, lowercased section label to its taxonomy slot.
pub fn map_category(label: &str) -> Option<Category> {
    if let Some(&(_, category)) = COMBAT_RULES
        .iter()
        .find(|(needle, _)| label.contains(*needle))
    {
        return Some(category);
    }

    if label.contains("disciples of the hand") || label == "hand" {
        return Some(Category::Hand);
    }
    if label.contains("disciples of the land") || label == "land" {
        return Some(Category::Land);
    }

    None
}
