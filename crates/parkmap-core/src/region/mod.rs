// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod classifier;

pub use classifier::classify;

use serde::{Deserialize, Serialize};

/// Top level of the two-level taxonomy: a country or a continental grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionGroup {
    UnitedStates,
    India,
    Nepal,
    Japan,
    Canada,
    Australia,
    NewZealand,
    UnitedKingdom,
    SriLanka,
    CostaRica,
    WorldHeritage,
}

impl RegionGroup {
    pub const ALL: [RegionGroup; 11] = [
        RegionGroup::UnitedStates,
        RegionGroup::India,
        RegionGroup::Nepal,
        RegionGroup::Japan,
        RegionGroup::Canada,
        RegionGroup::Australia,
        RegionGroup::NewZealand,
        RegionGroup::UnitedKingdom,
        RegionGroup::SriLanka,
        RegionGroup::CostaRica,
        RegionGroup::WorldHeritage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RegionGroup::UnitedStates => "United States",
            RegionGroup::India => "India",
            RegionGroup::Nepal => "Nepal",
            RegionGroup::Japan => "Japan",
            RegionGroup::Canada => "Canada",
            RegionGroup::Australia => "Australia",
            RegionGroup::NewZealand => "New Zealand",
            RegionGroup::UnitedKingdom => "United Kingdom",
            RegionGroup::SriLanka => "Sri Lanka",
            RegionGroup::CostaRica => "Costa Rica",
            RegionGroup::WorldHeritage => "World Heritage",
        }
    }

    /// Leaves of this group, in display order.
    pub fn regions(&self) -> Vec<RegionKey> {
        RegionKey::ALL
            .iter()
            .copied()
            .filter(|k| k.group() == *self)
            .collect()
    }
}

/// A leaf of the closed region taxonomy. Every classified entity maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionKey {
    UsWest,
    UsMidwest,
    UsSouth,
    UsNortheast,
    UsAlaska,
    UsHawaii,
    IndiaParks,
    IndiaHeritage,
    IndiaJyotirlingas,
    IndiaShaktiPeethas,
    IndiaCharDham,
    IndiaForts,
    IndiaMonasteries,
    NepalParks,
    NepalTemples,
    NepalHeritage,
    NepalTreks,
    JapanParks,
    JapanTemples,
    JapanCastles,
    Canada,
    Australia,
    NewZealand,
    UnitedKingdom,
    SriLanka,
    CostaRica,
    HeritageEurope,
    HeritageAfrica,
    HeritageLatinAmerica,
    HeritageAsia,
    HeritageMiddleEast,
    HeritageTransboundary,
}

impl RegionKey {
    pub const ALL: [RegionKey; 32] = [
        RegionKey::UsWest,
        RegionKey::UsMidwest,
        RegionKey::UsSouth,
        RegionKey::UsNortheast,
        RegionKey::UsAlaska,
        RegionKey::UsHawaii,
        RegionKey::IndiaParks,
        RegionKey::IndiaHeritage,
        RegionKey::IndiaJyotirlingas,
        RegionKey::IndiaShaktiPeethas,
        RegionKey::IndiaCharDham,
        RegionKey::IndiaForts,
        RegionKey::IndiaMonasteries,
        RegionKey::NepalParks,
        RegionKey::NepalTemples,
        RegionKey::NepalHeritage,
        RegionKey::NepalTreks,
        RegionKey::JapanParks,
        RegionKey::JapanTemples,
        RegionKey::JapanCastles,
        RegionKey::Canada,
        RegionKey::Australia,
        RegionKey::NewZealand,
        RegionKey::UnitedKingdom,
        RegionKey::SriLanka,
        RegionKey::CostaRica,
        RegionKey::HeritageEurope,
        RegionKey::HeritageAfrica,
        RegionKey::HeritageLatinAmerica,
        RegionKey::HeritageAsia,
        RegionKey::HeritageMiddleEast,
        RegionKey::HeritageTransboundary,
    ];

    pub fn group(&self) -> RegionGroup {
        use RegionKey::*;
        match self {
            UsWest | UsMidwest | UsSouth | UsNortheast | UsAlaska | UsHawaii => {
                RegionGroup::UnitedStates
            }
            IndiaParks | IndiaHeritage | IndiaJyotirlingas | IndiaShaktiPeethas
            | IndiaCharDham | IndiaForts | IndiaMonasteries => RegionGroup::India,
            NepalParks | NepalTemples | NepalHeritage | NepalTreks => RegionGroup::Nepal,
            JapanParks | JapanTemples | JapanCastles => RegionGroup::Japan,
            Canada => RegionGroup::Canada,
            Australia => RegionGroup::Australia,
            NewZealand => RegionGroup::NewZealand,
            UnitedKingdom => RegionGroup::UnitedKingdom,
            SriLanka => RegionGroup::SriLanka,
            CostaRica => RegionGroup::CostaRica,
            HeritageEurope | HeritageAfrica | HeritageLatinAmerica | HeritageAsia
            | HeritageMiddleEast | HeritageTransboundary => RegionGroup::WorldHeritage,
        }
    }

    pub fn label(&self) -> &'static str {
        use RegionKey::*;
        match self {
            UsWest => "West",
            UsMidwest => "Midwest",
            UsSouth => "South",
            UsNortheast => "Northeast",
            UsAlaska => "Alaska",
            UsHawaii => "Hawaii",
            IndiaParks => "National Parks",
            IndiaHeritage => "Heritage Sites",
            IndiaJyotirlingas => "Jyotirlingas",
            IndiaShaktiPeethas => "Shakti Peethas",
            IndiaCharDham => "Char Dham",
            IndiaForts => "Forts",
            IndiaMonasteries => "Monasteries",
            NepalParks => "National Parks",
            NepalTemples => "Temples",
            NepalHeritage => "Heritage Sites",
            NepalTreks => "Trekking Routes",
            JapanParks => "National Parks",
            JapanTemples => "Temples & Shrines",
            JapanCastles => "Castles",
            Canada => "Canada",
            Australia => "Australia",
            NewZealand => "New Zealand",
            UnitedKingdom => "United Kingdom",
            SriLanka => "Sri Lanka",
            CostaRica => "Costa Rica",
            HeritageEurope => "Europe",
            HeritageAfrica => "Africa",
            HeritageLatinAmerica => "Latin America",
            HeritageAsia => "Asia",
            HeritageMiddleEast => "Middle East",
            HeritageTransboundary => "Transboundary",
        }
    }

    /// Stable string id, identical to the serde representation.
    pub fn id(&self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .unwrap_or_default()
    }

    /// Label qualified by its group, e.g. "Nepal Temples". Single-bucket
    /// countries, whose leaf repeats the group, stay as "Canada".
    pub fn full_label(&self) -> String {
        let group = self.group().label();
        if group == self.label() {
            group.to_string()
        } else {
            format!("{} {}", group, self.label())
        }
    }

    /// Case-insensitive lookup by id (`us-west`), by [`Self::full_label`], or by
    /// the bare label when no other key shares it ("Europe", not "National Parks").
    pub fn parse(s: &str) -> Option<RegionKey> {
        let q = s.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }
        if let Some(key) = RegionKey::ALL
            .iter()
            .copied()
            .find(|k| k.id() == q || k.full_label().to_lowercase() == q)
        {
            return Some(key);
        }
        let mut by_label = RegionKey::ALL
            .iter()
            .copied()
            .filter(|k| k.label().to_lowercase() == q);
        match (by_label.next(), by_label.next()) {
            (Some(key), None) => Some(key),
            _ => None,
        }
    }
}
