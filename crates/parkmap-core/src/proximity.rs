// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::Airport;
use crate::entity::{Entity, GeoPoint};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const EARTH_RADIUS_MILES: f64 = 3958.8;
pub const KM_IN_MILES: f64 = 0.621371;

/// Great-circle distance in statute miles (haversine).
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Anything that can take part in a proximity query.
pub trait Located {
    fn position(&self) -> Option<GeoPoint>;
}

impl Located for Entity {
    /// Blank-named entities never take part, even with good coordinates.
    fn position(&self) -> Option<GeoPoint> {
        if self.has_valid_name() {
            self.coordinates
        } else {
            None
        }
    }
}

impl Located for Airport {
    fn position(&self) -> Option<GeoPoint> {
        self.coordinates
    }
}

impl Located for GeoPoint {
    fn position(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearby<'a, T> {
    /// Position of `item` in the candidate slice.
    pub index: usize,
    pub item: &'a T,
    pub distance_miles: f64,
}

/// Up to `k` candidates within `radius_miles` of `origin`, closest first.
/// Equal distances keep their input order.
pub fn nearest<'a, T: Located>(
    origin: GeoPoint,
    candidates: &'a [T],
    radius_miles: f64,
    k: usize,
) -> Vec<Nearby<'a, T>> {
    nearest_excluding(origin, candidates, radius_miles, k, None)
}

/// Same as [`nearest`], skipping the candidate at `exclude` (the query's own
/// entry when searching the collection it belongs to).
pub fn nearest_excluding<'a, T: Located>(
    origin: GeoPoint,
    candidates: &'a [T],
    radius_miles: f64,
    k: usize,
    exclude: Option<usize>,
) -> Vec<Nearby<'a, T>> {
    let mut hits: Vec<Nearby<'a, T>> = candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != exclude)
        .filter_map(|(index, item)| {
            let p = item.position()?;
            let distance_miles = distance_miles(origin, p);
            (distance_miles <= radius_miles).then_some(Nearby {
                index,
                item,
                distance_miles,
            })
        })
        .collect();

    // sort_by is stable, which gives the input-order tie break
    hits.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    hits.truncate(k);
    hits
}

const COMPACT_RADIUS_COUNTRIES: &[&str] = &[
    "India",
    "Nepal",
    "Japan",
    "Sri Lanka",
    "Bhutan",
    "China",
    "Thailand",
    "Vietnam",
    "Cambodia",
    "Indonesia",
    "Malaysia",
    "South Korea",
];

/// Search radii for the "nearby" lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusPolicy {
    pub airport_miles: f64,
    pub attraction_miles: f64,
    /// Applied instead of `attraction_miles` for densely packed countries.
    pub compact_attraction_miles: f64,
    pub compact_countries: Vec<String>,
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self {
            airport_miles: 200.0,
            attraction_miles: 300.0,
            compact_attraction_miles: 100.0 * KM_IN_MILES,
            compact_countries: COMPACT_RADIUS_COUNTRIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl RadiusPolicy {
    pub fn attraction_radius(&self, country: &str) -> f64 {
        let country = country.trim();
        if self
            .compact_countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
        {
            self.compact_attraction_miles
        } else {
            self.attraction_miles
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevantAirport<'a> {
    pub airport: &'a Airport,
    /// Distance to the closest visible entity; `None` for country fallback matches.
    pub distance_miles: Option<f64>,
}

/// Airports serving a set of visible entities.
///
/// Every airport within `radius_miles` of any placeable entity is collected and
/// merged by [`Airport::merge_key`], keeping the closest sighting. When nothing
/// is in range, falls back to every airport in a country present in the set.
pub fn relevant_airports<'a>(
    visible: &[&Entity],
    airports: &'a [Airport],
    radius_miles: f64,
) -> Vec<RelevantAirport<'a>> {
    let mut merged: Vec<RelevantAirport<'a>> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for entity in visible {
        let Some(origin) = entity.position() else {
            continue;
        };
        for airport in airports {
            let Some(p) = airport.position() else {
                continue;
            };
            let d = distance_miles(origin, p);
            if d > radius_miles {
                continue;
            }
            let key = airport.merge_key();
            match slots.get(&key) {
                Some(&slot) => {
                    let current = merged[slot].distance_miles.unwrap_or(f64::INFINITY);
                    if d < current {
                        merged[slot] = RelevantAirport {
                            airport,
                            distance_miles: Some(d),
                        };
                    }
                }
                None => {
                    slots.insert(key, merged.len());
                    merged.push(RelevantAirport {
                        airport,
                        distance_miles: Some(d),
                    });
                }
            }
        }
    }

    if !merged.is_empty() {
        merged.sort_by(|a, b| {
            a.distance_miles
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.distance_miles.unwrap_or(f64::INFINITY))
        });
        return merged;
    }

    let countries: HashSet<String> = visible
        .iter()
        .filter(|e| e.has_valid_name())
        .map(|e| e.country.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect();

    let mut seen = HashSet::new();
    airports
        .iter()
        .filter(|a| countries.contains(&a.country.trim().to_lowercase()))
        .filter(|a| seen.insert(a.merge_key()))
        .map(|airport| RelevantAirport {
            airport,
            distance_miles: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::fixtures::entity;

    fn airport(name: &str, iata: &str, country: &str, lat: f64, lon: f64) -> Airport {
        Airport {
            name: name.to_string(),
            iata: iata.to_string(),
            city: String::new(),
            country: country.to_string(),
            coordinates: Some(GeoPoint::new(lat, lon)),
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = GeoPoint::new(27.7, 85.3);
        assert_eq!(distance_miles(p, p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(36.1, -112.1);
        let b = GeoPoint::new(44.4, -110.6);
        assert!((distance_miles(a, b) - distance_miles(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_latitude_at_equator() {
        // R * pi / 180 with R = 3958.8 is 69.09 mi
        let d = distance_miles(GeoPoint::new(0.0, 10.0), GeoPoint::new(1.0, 10.0));
        assert!((d - 69.17).abs() < 0.1, "got {}", d);
        assert!((d - EARTH_RADIUS_MILES.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_respects_radius_k_and_order() {
        let origin = GeoPoint::new(0.0, 0.0);
        let points: Vec<GeoPoint> = (1..=10)
            .map(|i| GeoPoint::new(0.0, i as f64 * 0.5))
            .rev()
            .collect();
        let hits = nearest(origin, &points, 200.0, 3);

        assert_eq!(hits.len(), 3);
        for w in hits.windows(2) {
            assert!(w[0].distance_miles <= w[1].distance_miles);
        }
        assert!(hits.iter().all(|h| h.distance_miles <= 200.0));
        assert_eq!(hits[0].item.lon, 0.5);
    }

    #[test]
    fn test_nearest_ties_keep_input_order() {
        let origin = GeoPoint::new(0.0, 0.0);
        let points = vec![
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, -1.0),
            GeoPoint::new(1.0, 0.0),
        ];
        let hits = nearest(origin, &points, 500.0, 5);
        assert_eq!(
            hits.iter().map(|h| h.index).take(2).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_nearest_excludes_self_and_handles_empty() {
        let entities = vec![
            entity("A", "Nepal", &[], 27.7, 85.3),
            entity("B", "Nepal", &[], 27.71, 85.31),
        ];
        let origin = entities[0].coordinates.unwrap();
        let hits = nearest_excluding(origin, &entities, 10.0, 5, Some(0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.name, "B");

        let empty: Vec<Entity> = Vec::new();
        assert!(nearest(origin, &empty, 100.0, 5).is_empty());
    }

    #[test]
    fn test_compact_radius_for_listed_countries() {
        let policy = RadiusPolicy::default();
        assert!((policy.attraction_radius("Nepal") - 62.1371).abs() < 1e-9);
        assert!((policy.attraction_radius(" japan ") - 62.1371).abs() < 1e-9);
        assert_eq!(policy.attraction_radius("United States"), 300.0);
        assert_eq!(policy.airport_miles, 200.0);
    }

    #[test]
    fn test_same_iata_merges_to_closest() {
        let park = entity("Park", "United States", &["CA"], 34.0, -118.0);
        let airports = vec![
            airport("LAX far record", "LAX", "United States", 35.0, -118.0),
            airport("LAX near record", "LAX", "United States", 34.1, -118.0),
        ];
        let visible = vec![&park];
        let out = relevant_airports(&visible, &airports, 200.0);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].airport.name, "LAX near record");
        let expected = distance_miles(GeoPoint::new(34.0, -118.0), GeoPoint::new(34.1, -118.0));
        assert!((out[0].distance_miles.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_blank_iata_merges_by_coordinates() {
        let park = entity("Park", "Nepal", &[], 27.7, 86.7);
        let airports = vec![
            airport("Lukla", "", "Nepal", 27.6869, 86.7297),
            airport("Lukla duplicate", "", "Nepal", 27.6869, 86.7297),
            airport("Syangboche", "", "Nepal", 27.8111, 86.7125),
        ];
        let visible = vec![&park];
        assert_eq!(relevant_airports(&visible, &airports, 200.0).len(), 2);
    }

    #[test]
    fn test_country_fallback_when_nothing_in_range() {
        let park = entity("Remote", "Nepal", &[], 29.0, 82.0);
        let airports = vec![
            airport("Far Nepal", "FNP", "Nepal", 27.0, 88.0),
            airport("Elsewhere", "ELS", "India", 10.0, 77.0),
        ];
        let visible = vec![&park];
        let out = relevant_airports(&visible, &airports, 50.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].airport.iata, "FNP");
        assert!(out[0].distance_miles.is_none());
    }

    #[test]
    fn test_nearest_skips_unlocated_and_nameless_candidates() {
        let mut nameless = entity("Nameless", "Nepal", &[], 1.0, 1.0);
        nameless.name = "  ".to_string();
        let candidates = vec![
            entity("No Coords", "Nepal", &[], 0.0, 0.0),
            nameless,
            entity("Ok", "Nepal", &[], 1.0, 1.1),
        ];
        let hits = nearest(GeoPoint::new(1.0, 1.0), &candidates, 100.0, 5);

        let names: Vec<_> = hits.iter().map(|h| h.item.name.as_str()).collect();
        assert_eq!(names, vec!["Ok"]);
        assert_eq!(hits[0].index, 2);
    }

    #[test]
    fn test_relevant_airports_ignore_unlocated_visible_entities() {
        let ktm = airport("Tribhuvan International", "KTM", "Nepal", 27.6966, 85.3591);
        let jfk = airport("John F. Kennedy International", "JFK", "United States", 40.64, -73.78);
        let airports = vec![ktm, jfk];

        // An entity without coordinates adds no distance hits of its own.
        let unlocated = entity("Somewhere", "United States", &["NY"], 0.0, 0.0);
        let temple = entity("Pashupatinath", "Nepal", &[], 27.7105, 85.3487);
        let visible = vec![&unlocated, &temple];
        let out = relevant_airports(&visible, &airports, 200.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].airport.iata, "KTM");
        assert!(out[0].distance_miles.is_some());

        // Alone, it only reaches airports through the country fallback.
        let visible = vec![&unlocated];
        let out = relevant_airports(&visible, &airports, 200.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].airport.iata, "JFK");
        assert!(out[0].distance_miles.is_none());
    }

    #[test]
    fn test_relevant_airports_ignore_nameless_visible_entities() {
        let airports = vec![airport("Tribhuvan International", "KTM", "Nepal", 27.6966, 85.3591)];
        let mut nameless = entity("x", "Nepal", &[], 27.7105, 85.3487);
        nameless.name = String::new();
        let visible = vec![&nameless];
        assert!(relevant_airports(&visible, &airports, 200.0).is_empty());
    }
}
