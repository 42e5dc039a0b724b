// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::category::{derive_category, Category};
use crate::entity::Entity;
use crate::region::{classify, RegionGroup, RegionKey};
use crate::visited::VisitedSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the user can toggle. Built fully populated from the closed region
/// and category sets; every `with_*` call returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityState {
    regions: BTreeMap<RegionKey, bool>,
    categories: BTreeMap<Category, bool>,
    search: String,
    visited_only: bool,
    unvisited_only: bool,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityState {
    pub fn new() -> Self {
        Self {
            regions: RegionKey::ALL.iter().map(|k| (*k, true)).collect(),
            categories: Category::ALL.iter().map(|c| (*c, true)).collect(),
            search: String::new(),
            visited_only: false,
            unvisited_only: false,
        }
    }

    /// Absent keys count as hidden.
    pub fn region_enabled(&self, key: RegionKey) -> bool {
        self.regions.get(&key).copied().unwrap_or(false)
    }

    pub fn category_enabled(&self, category: Category) -> bool {
        self.categories.get(&category).copied().unwrap_or(false)
    }

    pub fn any_region_enabled(&self) -> bool {
        self.regions.values().any(|on| *on)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn visited_only(&self) -> bool {
        self.visited_only
    }

    pub fn unvisited_only(&self) -> bool {
        self.unvisited_only
    }

    pub fn with_region(mut self, key: RegionKey, on: bool) -> Self {
        self.regions.insert(key, on);
        self
    }

    pub fn with_group(mut self, group: RegionGroup, on: bool) -> Self {
        for key in group.regions() {
            self.regions.insert(key, on);
        }
        self
    }

    pub fn with_all_regions(mut self, on: bool) -> Self {
        for v in self.regions.values_mut() {
            *v = on;
        }
        self
    }

    pub fn with_category(mut self, category: Category, on: bool) -> Self {
        self.categories.insert(category, on);
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    /// Turning one visit filter on clears the other.
    pub fn with_visited_only(mut self, on: bool) -> Self {
        self.visited_only = on;
        if on {
            self.unvisited_only = false;
        }
        self
    }

    pub fn with_unvisited_only(mut self, on: bool) -> Self {
        self.unvisited_only = on;
        if on {
            self.visited_only = false;
        }
        self
    }

    /// Sets both visit flags verbatim. If both end up set, visited-only wins
    /// when filtering.
    pub fn with_visit_flags(mut self, visited_only: bool, unvisited_only: bool) -> Self {
        self.visited_only = visited_only;
        self.unvisited_only = unvisited_only;
        self
    }
}

/// Named, with usable non-zero coordinates.
pub fn passes_structure(entity: &Entity) -> bool {
    entity.is_placeable()
}

/// Classified, and that region is switched on.
pub fn passes_region(entity: &Entity, state: &VisibilityState) -> bool {
    region_shown(classify(entity), state)
}

fn region_shown(key: Option<RegionKey>, state: &VisibilityState) -> bool {
    key.is_some_and(|key| state.region_enabled(key))
}

/// Category toggle check with the notable override:
/// notable national parks pass if either toggle is on, other notable entities
/// need the notable toggle, and entities without a category always pass.
pub fn passes_category(entity: &Entity, state: &VisibilityState) -> bool {
    let derived = derive_category(entity);
    if entity.notable {
        let notable_on = state.category_enabled(Category::Notable);
        return match derived {
            Some(Category::NationalPark) => {
                notable_on || state.category_enabled(Category::NationalPark)
            }
            _ => notable_on,
        };
    }
    match derived {
        Some(category) => state.category_enabled(category),
        None => true,
    }
}

/// Case-insensitive substring match on name, description, country or any
/// subdivision. A blank query matches everything.
pub fn passes_search(entity: &Entity, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    entity.name.to_lowercase().contains(&q)
        || entity.description.to_lowercase().contains(&q)
        || entity.country.to_lowercase().contains(&q)
        || entity
            .subdivisions
            .iter()
            .any(|s| s.to_lowercase().contains(&q))
}

pub fn passes_visited(entity: &Entity, state: &VisibilityState, visited: &VisitedSet) -> bool {
    if state.visited_only {
        visited.contains(entity)
    } else if state.unvisited_only {
        !visited.contains(entity)
    } else {
        true
    }
}

/// The entities to place on the map: the conjunction of every gate above.
/// Inputs are only read.
pub fn visible<'a>(
    entities: &'a [Entity],
    state: &VisibilityState,
    visited: &VisitedSet,
) -> Vec<&'a Entity> {
    visible_by(entities, state, visited, classify)
}

/// [`visible`] with the region of each entity supplied by `region_of`, for
/// callers that already hold classified keys.
pub fn visible_by<'a, F>(
    entities: &'a [Entity],
    state: &VisibilityState,
    visited: &VisitedSet,
    region_of: F,
) -> Vec<&'a Entity>
where
    F: Fn(&Entity) -> Option<RegionKey>,
{
    if !state.any_region_enabled() {
        return Vec::new();
    }
    let query = state.search.trim().to_lowercase();
    entities
        .iter()
        .filter(|e| passes_structure(e))
        .filter(|e| region_shown(region_of(*e), state))
        .filter(|e| passes_category(e, state))
        .filter(|e| passes_search(e, &query))
        .filter(|e| passes_visited(e, state, visited))
        .collect()
}
