// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::entity::{CategoryTag, Entity};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Cross-country kind of an attraction, independent of its region.
///
/// `Notable` is never derived for an entity; it is the key of the cross-cutting
/// "most photographed" toggle, which is tracked on [`Entity::notable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    NationalPark,
    HeritageSite,
    Jyotirlinga,
    ShaktiPeetha,
    CharDham,
    Temple,
    Fort,
    TrekkingRoute,
    Notable,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::NationalPark,
        Category::HeritageSite,
        Category::Jyotirlinga,
        Category::ShaktiPeetha,
        Category::CharDham,
        Category::Temple,
        Category::Fort,
        Category::TrekkingRoute,
        Category::Notable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::NationalPark => "National Parks",
            Category::HeritageSite => "Heritage Sites",
            Category::Jyotirlinga => "Jyotirlingas",
            Category::ShaktiPeetha => "Shakti Peethas",
            Category::CharDham => "Char Dham",
            Category::Temple => "Temples",
            Category::Fort => "Forts & Castles",
            Category::TrekkingRoute => "Trekking Routes",
            Category::Notable => "Most Photographed",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        let q = s.trim().to_lowercase();
        Category::ALL.iter().copied().find(|c| {
            serde_json::to_value(c)
                .ok()
                .and_then(|v| v.as_str().map(|id| id == q))
                .unwrap_or(false)
                || c.label().to_lowercase() == q
        })
    }
}

/// Derives the entity's category. Table tags decide first; untagged rows fall
/// back to their designation text.
pub fn derive_category(entity: &Entity) -> Option<Category> {
    if let Some(tag) = entity.category_tag {
        return match tag {
            CategoryTag::Heritage | CategoryTag::Transboundary => Some(Category::HeritageSite),
            CategoryTag::Jyotirlinga => Some(Category::Jyotirlinga),
            CategoryTag::ShaktiPeetha => Some(Category::ShaktiPeetha),
            CategoryTag::CharDham => Some(Category::CharDham),
            CategoryTag::Temple => Some(Category::Temple),
            CategoryTag::Fort | CategoryTag::Castle => Some(Category::Fort),
            CategoryTag::Trekking => Some(Category::TrekkingRoute),
            CategoryTag::Monastery => None,
        };
    }

    let designation = entity.designation.to_lowercase();
    if designation.contains("national park") {
        Some(Category::NationalPark)
    } else if designation.contains("world heritage") {
        Some(Category::HeritageSite)
    } else {
        None
    }
}

/// Free-text fallback for the notable flag when a table carries no `Notable` column.
pub fn mentions_most_photographed(text: &str) -> bool {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        regex::Regex::new(r"(?i)\bmost[\s_-]*photographed\b").expect("static regex")
    });
    re.is_match(text)
}

/// Parses a structured `Notable` cell. Blank or unrecognised values are `None` so
/// the caller can fall back to the text heuristic.
pub fn parse_notable_flag(cell: &str) -> Option<bool> {
    match cell.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}
