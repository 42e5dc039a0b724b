// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dense per-load index assigned by the [`crate::normalize::EntityArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parses a pair of string-encoded decimal degrees.
    ///
    /// Returns `None` when either side fails to parse, is not finite, or when
    /// the pair is exactly `(0, 0)`, which the source tables use as "unknown".
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat = lat.trim().parse::<f64>().ok()?;
        let lon = lon.trim().parse::<f64>().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if lat == 0.0 && lon == 0.0 {
            return None;
        }
        Some(Self { lat, lon })
    }
}

/// Per-table discriminator that overrides country-default classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTag {
    Heritage,
    Transboundary,
    Jyotirlinga,
    ShaktiPeetha,
    CharDham,
    Temple,
    Fort,
    Castle,
    Monastery,
    Trekking,
}

impl CategoryTag {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryTag::Heritage => "UNESCO World Heritage Site",
            CategoryTag::Transboundary => "Transboundary World Heritage Site",
            CategoryTag::Jyotirlinga => "Jyotirlinga",
            CategoryTag::ShaktiPeetha => "Shakti Peetha",
            CategoryTag::CharDham => "Char Dham",
            CategoryTag::Temple => "Temple",
            CategoryTag::Fort => "Fort",
            CategoryTag::Castle => "Castle",
            CategoryTag::Monastery => "Monastery",
            CategoryTag::Trekking => "Trekking Route",
        }
    }
}

/// A single attraction after normalization. Immutable once the arena hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// `<table>:<code>` or `<table>:<fingerprint prefix>` when the row carries no code.
    pub key: String,
    /// SHA-256 over table, row index, name and raw coordinates.
    pub fingerprint: String,
    pub name: String,
    pub country: String,
    pub subdivisions: Vec<String>,
    pub coordinates: Option<GeoPoint>,
    pub designation: String,
    pub description: String,
    pub url: String,
    pub category_tag: Option<CategoryTag>,
    pub notable: bool,
    /// Category-specific columns passed through verbatim (ordinal, body_part, duration...).
    pub extras: BTreeMap<String, String>,
    #[serde(skip)]
    pub(crate) source_table: String,
}

impl Entity {
    pub fn has_valid_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn is_geolocated(&self) -> bool {
        self.coordinates.is_some()
    }

    /// Named and geolocated; anything else never reaches the map.
    pub fn is_placeable(&self) -> bool {
        self.has_valid_name() && self.is_geolocated()
    }

    pub fn source_table(&self) -> &str {
        &self.source_table
    }

    pub fn extra(&self, field: &str) -> Option<&str> {
        self.extras.get(field).map(|s| s.as_str())
    }

    pub fn subdivisions_label(&self) -> String {
        self.subdivisions.join(", ")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_null_island() {
        assert!(GeoPoint::parse("0", "0").is_none());
        assert!(GeoPoint::parse("0.0", "-0.0").is_none());
        assert!(GeoPoint::parse("0", "12.5").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage_and_non_finite() {
        assert!(GeoPoint::parse("", "10").is_none());
        assert!(GeoPoint::parse("abc", "10").is_none());
        assert!(GeoPoint::parse("NaN", "10").is_none());
        assert!(GeoPoint::parse("inf", "10").is_none());
        assert_eq!(
            GeoPoint::parse(" 36.1 ", "-112.1"),
            Some(GeoPoint::new(36.1, -112.1))
        );
    }

    #[test]
    fn test_blank_name_is_not_placeable() {
        let mut e = fixtures::entity("Yosemite", "United States", &["CA"], 37.8, -119.5);
        assert!(e.is_placeable());
        e.name = "   ".to_string();
        assert!(!e.is_placeable());
    }
}
