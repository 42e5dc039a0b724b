// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::{Airport, AirportParser};
use crate::config::AtlasConfig;
use crate::entity::{Entity, EntityId};
use crate::normalize::{load_all, EntityArena};
use crate::proximity::{nearest, nearest_excluding, relevant_airports, Nearby, RelevantAirport};
use crate::region::{classify, RegionKey};
use crate::stats::{aggregate, visited_progress, Aggregate, VisitedProgress};
use crate::visibility::{visible_by, VisibilityState};
use crate::visited::VisitedSet;
use log::{info, warn};

/// One immutable data load: normalized entities, their regions, and airports.
/// A reload builds a new `Atlas` rather than patching this one.
#[derive(Debug, Clone)]
pub struct Atlas {
    entities: Vec<Entity>,
    regions: Vec<Option<RegionKey>>,
    airports: Vec<Airport>,
    config: AtlasConfig,
}

impl Atlas {
    pub fn new(arena: EntityArena, airports: Vec<Airport>, config: AtlasConfig) -> Self {
        let entities = arena.into_entities();
        let regions = entities.iter().map(classify).collect();
        Self {
            entities,
            regions,
            airports,
            config,
        }
    }

    /// Loads every enabled table plus the airport list. Missing files only
    /// shrink coverage.
    pub fn load(config: &AtlasConfig) -> Self {
        let arena = load_all(&config.data_dir, &config.tables());

        let airports_path = config.airports_path();
        let airports = if airports_path.exists() {
            match AirportParser::parse_file(&airports_path) {
                Ok(a) => a,
                Err(e) => {
                    warn!(
                        "Airport table unreadable; nearby airports disabled — path={} error={}",
                        airports_path.display(),
                        e
                    );
                    Vec::new()
                }
            }
        } else {
            warn!(
                "Airport table not found — path={}",
                airports_path.display()
            );
            Vec::new()
        };

        let atlas = Self::new(arena, airports, config.clone());
        info!(
            "Atlas loaded — entities={} unclassified={} airports={}",
            atlas.entities.len(),
            atlas.regions.iter().filter(|r| r.is_none()).count(),
            atlas.airports.len()
        );
        atlas
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn region_of(&self, id: EntityId) -> Option<RegionKey> {
        self.regions.get(id.index()).copied().flatten()
    }

    /// Case-insensitive name match; exact matches sort ahead of partial ones.
    pub fn find_by_name(&self, query: &str) -> Vec<&Entity> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<&Entity> = self
            .entities
            .iter()
            .filter(|e| e.has_valid_name() && e.name.to_lowercase().contains(&q))
            .collect();
        hits.sort_by_key(|e| e.name.trim().to_lowercase() != q);
        hits
    }

    pub fn visible(&self, state: &VisibilityState, visited: &VisitedSet) -> Vec<&Entity> {
        visible_by(&self.entities, state, visited, |e| self.region_of(e.id))
    }

    /// Other attractions near `id`, using the entity's country radius.
    pub fn nearby_attractions(&self, id: EntityId) -> Vec<Nearby<'_, Entity>> {
        let Some(entity) = self.get(id) else {
            return Vec::new();
        };
        let Some(origin) = entity.coordinates else {
            return Vec::new();
        };
        let radius = self.config.radius.attraction_radius(&entity.country);
        nearest_excluding(
            origin,
            &self.entities,
            radius,
            self.config.nearby_limit,
            Some(id.index()),
        )
    }

    pub fn nearby_airports(&self, id: EntityId) -> Vec<Nearby<'_, Airport>> {
        let Some(origin) = self.get(id).and_then(|e| e.coordinates) else {
            return Vec::new();
        };
        nearest(
            origin,
            &self.airports,
            self.config.radius.airport_miles,
            self.config.nearby_limit,
        )
    }

    pub fn relevant_airports(&self, visible: &[&Entity]) -> Vec<RelevantAirport<'_>> {
        relevant_airports(visible, &self.airports, self.config.radius.airport_miles)
    }

    pub fn aggregate(&self, entities: &[&Entity]) -> Aggregate {
        aggregate(entities.iter().copied(), self.config.top_n)
    }

    pub fn aggregate_all(&self) -> Aggregate {
        aggregate(&self.entities, self.config.top_n)
    }

    pub fn visited_progress(&self, entities: &[&Entity], visited: &VisitedSet) -> VisitedProgress {
        visited_progress(entities.iter().copied(), visited)
    }
}
