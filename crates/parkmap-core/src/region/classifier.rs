// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use super::RegionKey;
use crate::entity::{CategoryTag, Entity};

pub const UNITED_STATES: &str = "United States";

const US_WEST: &[&str] = &[
    "WA", "OR", "CA", "NV", "ID", "MT", "WY", "UT", "CO", "AZ", "NM", "AS", "GU", "MP",
];
const US_MIDWEST: &[&str] = &[
    "ND", "SD", "NE", "KS", "MN", "IA", "MO", "WI", "IL", "IN", "MI", "OH",
];
const US_SOUTH: &[&str] = &[
    "TX", "OK", "AR", "LA", "MS", "AL", "TN", "KY", "GA", "FL", "SC", "NC", "VA", "WV", "MD",
    "DE", "DC", "PR", "VI",
];
const US_NORTHEAST: &[&str] = &["PA", "NY", "NJ", "CT", "RI", "MA", "VT", "NH", "ME"];

const EUROPE: &[&str] = &[
    "France", "Germany", "Italy", "Spain", "Portugal", "Greece", "Croatia", "Austria",
    "Switzerland", "Netherlands", "Belgium", "Czech Republic", "Poland", "Norway", "Sweden",
    "Ireland", "Iceland",
];
const AFRICA: &[&str] = &[
    "Egypt", "Morocco", "Kenya", "Tanzania", "Ethiopia", "South Africa", "Zimbabwe", "Zambia",
    "Namibia", "Botswana", "Madagascar", "Tunisia",
];
const LATIN_AMERICA: &[&str] = &[
    "Mexico", "Peru", "Brazil", "Argentina", "Chile", "Colombia", "Ecuador", "Bolivia",
    "Guatemala", "Cuba",
];
const ASIA: &[&str] = &[
    "China", "Bhutan", "Thailand", "Vietnam", "Cambodia", "Indonesia", "Malaysia",
    "South Korea", "Philippines", "Laos", "Myanmar", "Mongolia",
];
const MIDDLE_EAST: &[&str] = &[
    "Jordan", "Turkey", "Iran", "Israel", "United Arab Emirates", "Oman", "Saudi Arabia",
    "Lebanon",
];

/// One step of the decision order. Matching is case-insensitive on country names
/// and subdivision codes.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Tag alone, regardless of country.
    Tag(CategoryTag),
    /// Country plus one of its recognized tags.
    CountryTag(&'static str, CategoryTag),
    /// Country regardless of tag; used as the per-country default bucket.
    Country(&'static str),
    CountryIn(&'static [&'static str]),
    /// Country plus at least one subdivision code in the set.
    Subdivision(&'static str, &'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, entity: &Entity) -> bool {
        match *self {
            Matcher::Tag(tag) => entity.category_tag == Some(tag),
            Matcher::CountryTag(country, tag) => {
                same_country(&entity.country, country) && entity.category_tag == Some(tag)
            }
            Matcher::Country(country) => same_country(&entity.country, country),
            Matcher::CountryIn(countries) => {
                countries.iter().any(|c| same_country(&entity.country, c))
            }
            Matcher::Subdivision(country, codes) => {
                same_country(&entity.country, country)
                    && entity.subdivisions.iter().any(|s| {
                        let s = s.trim();
                        codes.iter().any(|c| c.eq_ignore_ascii_case(s))
                    })
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RegionRule {
    pub matcher: Matcher,
    pub region: RegionKey,
}

const fn rule(matcher: Matcher, region: RegionKey) -> RegionRule {
    RegionRule { matcher, region }
}

/// Ordered decision table, first match wins. The transboundary tag is checked
/// before any country routing; the two single-state US buckets precede the four
/// multi-state buckets, and the final US rule defaults to the West.
pub static RULES: &[RegionRule] = &[
    rule(Matcher::Tag(CategoryTag::Transboundary), RegionKey::HeritageTransboundary),
    // India
    rule(Matcher::CountryTag("India", CategoryTag::Heritage), RegionKey::IndiaHeritage),
    rule(Matcher::CountryTag("India", CategoryTag::Jyotirlinga), RegionKey::IndiaJyotirlingas),
    rule(Matcher::CountryTag("India", CategoryTag::ShaktiPeetha), RegionKey::IndiaShaktiPeethas),
    rule(Matcher::CountryTag("India", CategoryTag::CharDham), RegionKey::IndiaCharDham),
    rule(Matcher::CountryTag("India", CategoryTag::Fort), RegionKey::IndiaForts),
    rule(Matcher::CountryTag("India", CategoryTag::Monastery), RegionKey::IndiaMonasteries),
    rule(Matcher::Country("India"), RegionKey::IndiaParks),
    // Nepal
    rule(Matcher::CountryTag("Nepal", CategoryTag::Temple), RegionKey::NepalTemples),
    rule(Matcher::CountryTag("Nepal", CategoryTag::Heritage), RegionKey::NepalHeritage),
    rule(Matcher::CountryTag("Nepal", CategoryTag::Trekking), RegionKey::NepalTreks),
    rule(Matcher::Country("Nepal"), RegionKey::NepalParks),
    // Japan
    rule(Matcher::CountryTag("Japan", CategoryTag::Temple), RegionKey::JapanTemples),
    rule(Matcher::CountryTag("Japan", CategoryTag::Castle), RegionKey::JapanCastles),
    rule(Matcher::Country("Japan"), RegionKey::JapanParks),
    // Single-bucket countries
    rule(Matcher::Country("Canada"), RegionKey::Canada),
    rule(Matcher::Country("Australia"), RegionKey::Australia),
    rule(Matcher::Country("New Zealand"), RegionKey::NewZealand),
    rule(Matcher::Country("United Kingdom"), RegionKey::UnitedKingdom),
    rule(Matcher::Country("Sri Lanka"), RegionKey::SriLanka),
    rule(Matcher::Country("Costa Rica"), RegionKey::CostaRica),
    // Heritage-only countries
    rule(Matcher::CountryIn(EUROPE), RegionKey::HeritageEurope),
    rule(Matcher::CountryIn(AFRICA), RegionKey::HeritageAfrica),
    rule(Matcher::CountryIn(LATIN_AMERICA), RegionKey::HeritageLatinAmerica),
    rule(Matcher::CountryIn(ASIA), RegionKey::HeritageAsia),
    rule(Matcher::CountryIn(MIDDLE_EAST), RegionKey::HeritageMiddleEast),
    // United States
    rule(Matcher::Subdivision(UNITED_STATES, &["AK"]), RegionKey::UsAlaska),
    rule(Matcher::Subdivision(UNITED_STATES, &["HI"]), RegionKey::UsHawaii),
    rule(Matcher::Subdivision(UNITED_STATES, US_WEST), RegionKey::UsWest),
    rule(Matcher::Subdivision(UNITED_STATES, US_MIDWEST), RegionKey::UsMidwest),
    rule(Matcher::Subdivision(UNITED_STATES, US_SOUTH), RegionKey::UsSouth),
    rule(Matcher::Subdivision(UNITED_STATES, US_NORTHEAST), RegionKey::UsNortheast),
    rule(Matcher::Country(UNITED_STATES), RegionKey::UsWest),
];

/// Maps an entity to its region, or `None` when no rule applies (the entity is
/// then kept out of the map and out of region-scoped counts).
pub fn classify(entity: &Entity) -> Option<RegionKey> {
    classify_with(RULES, entity)
}

pub fn classify_with(rules: &[RegionRule], entity: &Entity) -> Option<RegionKey> {
    rules
        .iter()
        .find(|r| r.matcher.matches(entity))
        .map(|r| r.region)
}

fn same_country(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b)
}
