// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::category::{derive_category, Category};
use crate::entity::Entity;
use crate::region::{classify, RegionKey};
use crate::visited::VisitedSet;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_TOP_N: usize = 10;

/// Counter that remembers the order keys were first seen in.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    /// All counts in first-seen order.
    pub fn entries(&self) -> Vec<RankedCount> {
        self.entries
            .iter()
            .map(|(name, count)| RankedCount {
                name: name.clone(),
                count: *count,
            })
            .collect()
    }

    /// Highest `n` counts, descending; equal counts keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<RankedCount> {
        let mut ranked = self.entries();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountryBreakdown {
    pub country: String,
    pub total: usize,
    pub geolocated: usize,
    /// Every subdivision, first-seen order. A multi-state entity counts once in each.
    pub subdivisions: Vec<RankedCount>,
    pub top_subdivisions: Vec<RankedCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub total: usize,
    pub geolocated: usize,
    pub unclassified: usize,
    pub countries: Vec<CountryBreakdown>,
    /// Non-zero region counts in taxonomy order.
    pub regions: Vec<(RegionKey, usize)>,
    /// Non-zero category counts; `Notable` counts flagged entities.
    pub categories: Vec<(Category, usize)>,
    pub top_countries: Vec<RankedCount>,
}

#[derive(Default)]
struct CountryAcc {
    total: usize,
    geolocated: usize,
    subdivisions: Tally,
}

/// Counts over any entity list, filtered or not. Blank-named entities are
/// skipped; non-geolocated ones still count towards country totals.
pub fn aggregate<'a, I>(entities: I, top_n: usize) -> Aggregate
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut out = Aggregate::default();
    let mut countries = Tally::new();
    let mut per_country: Vec<CountryAcc> = Vec::new();
    let mut country_slot: HashMap<String, usize> = HashMap::new();
    let mut regions: HashMap<RegionKey, usize> = HashMap::new();
    let mut categories: HashMap<Category, usize> = HashMap::new();

    for entity in entities {
        if !entity.has_valid_name() {
            continue;
        }
        out.total += 1;
        if entity.is_geolocated() {
            out.geolocated += 1;
        }

        let country = entity.country.trim();
        countries.add(country);
        let slot = *country_slot.entry(country.to_string()).or_insert_with(|| {
            per_country.push(CountryAcc::default());
            per_country.len() - 1
        });
        let acc = &mut per_country[slot];
        acc.total += 1;
        if entity.is_geolocated() {
            acc.geolocated += 1;
        }
        for sub in &entity.subdivisions {
            acc.subdivisions.add(sub.trim());
        }

        match classify(entity) {
            Some(key) => *regions.entry(key).or_default() += 1,
            None => out.unclassified += 1,
        }
        if let Some(category) = derive_category(entity) {
            *categories.entry(category).or_default() += 1;
        }
        if entity.notable {
            *categories.entry(Category::Notable).or_default() += 1;
        }
    }

    out.countries = countries
        .entries()
        .into_iter()
        .zip(per_country)
        .map(|(c, acc)| CountryBreakdown {
            country: c.name,
            total: acc.total,
            geolocated: acc.geolocated,
            top_subdivisions: acc.subdivisions.top(top_n),
            subdivisions: acc.subdivisions.entries(),
        })
        .collect();
    out.top_countries = countries.top(top_n);
    out.regions = RegionKey::ALL
        .iter()
        .filter_map(|k| regions.get(k).map(|n| (*k, *n)))
        .collect();
    out.categories = Category::ALL
        .iter()
        .filter_map(|c| categories.get(c).map(|n| (*c, *n)))
        .collect();
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisitedProgress {
    pub visited: usize,
    pub total: usize,
    /// 0.0 for an empty list.
    pub percent: f64,
}

pub fn visited_progress<'a, I>(entities: I, visited: &VisitedSet) -> VisitedProgress
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut total = 0usize;
    let mut seen = 0usize;
    for entity in entities {
        if !entity.has_valid_name() {
            continue;
        }
        total += 1;
        if visited.contains(entity) {
            seen += 1;
        }
    }
    let percent = if total == 0 {
        0.0
    } else {
        seen as f64 * 100.0 / total as f64
    };
    VisitedProgress {
        visited: seen,
        total,
        percent: if percent.is_finite() { percent } else { 0.0 },
    }
}
