// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::entity::GeoPoint;
use crate::normalize::{read_records, RawRecord};
use crate::AtlasError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    /// Three-letter IATA code; empty for fields without one.
    pub iata: String,
    pub city: String,
    pub country: String,
    pub coordinates: Option<GeoPoint>,
}

impl Airport {
    /// Key used to merge duplicate sightings: the IATA code, or rounded
    /// coordinates when the code is blank.
    pub fn merge_key(&self) -> String {
        if !self.iata.trim().is_empty() {
            return self.iata.trim().to_uppercase();
        }
        match self.coordinates {
            Some(p) => format!("{:.4},{:.4}", p.lat, p.lon),
            None => format!("name:{}", self.name.trim().to_lowercase()),
        }
    }
}

pub struct AirportParser;

impl AirportParser {
    /// Parses an airports CSV (`Name,IATA,City,Country,Latitude,Longitude`).
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Airport>, AtlasError> {
        let file = File::open(path)?;
        Self::parse(file)
    }

    pub fn parse<R: Read>(reader: R) -> Result<Vec<Airport>, AtlasError> {
        let records = read_records(reader)?;
        Ok(records.iter().filter_map(build_airport).collect())
    }
}

fn build_airport(raw: &RawRecord) -> Option<Airport> {
    let name = raw.get("Name");
    if name.is_empty() {
        return None;
    }
    Some(Airport {
        name: name.to_string(),
        iata: raw.get("IATA").to_uppercase(),
        city: raw.get("City").to_string(),
        country: raw.get("Country").to_string(),
        coordinates: GeoPoint::parse(raw.get("Latitude"), raw.get("Longitude")),
    })
}
