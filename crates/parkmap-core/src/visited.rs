// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::entity::Entity;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Persistence-facing identity of an entity: coordinates rounded to four
/// decimals, or `name|country` when the entity is not geolocated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitKey(pub String);

impl VisitKey {
    pub fn of(entity: &Entity) -> Self {
        match entity.coordinates {
            Some(p) => VisitKey(format!("{:.4},{:.4}", p.lat, p.lon)),
            None => VisitKey(format!(
                "{}|{}",
                entity.name.trim().to_lowercase(),
                entity.country.trim().to_lowercase()
            )),
        }
    }
}

/// Places a user has marked as visited. Supplied by the account/sync layer;
/// the engine only asks membership questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitedSet {
    keys: HashSet<VisitKey>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(|k| VisitKey(k.into())).collect(),
        }
    }

    /// Reads a JSON array of visit keys.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read visited set {:?}", path.as_ref()))?;
        serde_json::from_str(&content).context("Failed to parse visited set")
    }

    pub fn contains(&self, entity: &Entity) -> bool {
        self.keys.contains(&VisitKey::of(entity))
    }

    /// Returns a new set with the entity added; the original is left untouched.
    pub fn with_visit(&self, entity: &Entity) -> Self {
        let mut keys = self.keys.clone();
        keys.insert(VisitKey::of(entity));
        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::fixtures::entity;

    #[test]
    fn test_key_rounds_coordinates() {
        let e = entity("Everest Base Camp", "Nepal", &[], 28.00261234, 86.85287777);
        assert_eq!(VisitKey::of(&e).0, "28.0026,86.8529");
    }

    #[test]
    fn test_key_falls_back_to_name_and_country() {
        let mut e = entity(" Hidden Temple ", "Nepal", &[], 0.0, 0.0);
        e.coordinates = None;
        assert_eq!(VisitKey::of(&e).0, "hidden temple|nepal");
    }

    #[test]
    fn test_with_visit_does_not_mutate_original() {
        let e = entity("Zion", "United States", &["UT"], 37.3, -113.0);
        let empty = VisitedSet::new();
        let one = empty.with_visit(&e);
        assert!(!empty.contains(&e));
        assert!(one.contains(&e));
    }

    #[test]
    fn test_load_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visited.json");
        std::fs::write(&path, r#"["37.3000,-113.0000", "x|y"]"#).unwrap();
        let set = VisitedSet::load(&path).unwrap();
        assert_eq!(set.len(), 2);
        let e = entity("Zion", "United States", &["UT"], 37.3, -113.0);
        assert!(set.contains(&e));
    }
}
