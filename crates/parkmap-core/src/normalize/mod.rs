// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod tables;

pub use tables::{builtin_tables, ExtraColumn, TableConfig};

use crate::category::{mentions_most_photographed, parse_notable_flag};
use crate::entity::{Entity, EntityId, GeoPoint};
use crate::region::classifier::UNITED_STATES;
use crate::AtlasError;
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One loosely-typed source row. Column lookup ignores case and surrounding
/// whitespace; absent columns read as an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        self.fields
            .insert(column.trim().to_lowercase(), value.trim().to_string());
    }

    pub fn get(&self, column: &str) -> &str {
        self.fields
            .get(&column.to_lowercase())
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    fn get_or<'a>(&'a self, column: &str, default: &'a str) -> &'a str {
        let v = self.get(column);
        if v.is_empty() {
            default
        } else {
            v
        }
    }
}

/// Reads a headed CSV table. Malformed rows are logged and skipped.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, AtlasError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable row — row={} error={}", i, e);
                continue;
            }
        };
        let mut record = RawRecord::new();
        for (column, value) in headers.iter().zip(row.iter()) {
            record.insert(column, value);
        }
        records.push(record);
    }

    Ok(records)
}

pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, AtlasError> {
    let file = File::open(path)?;
    read_records(file)
}

fn parse_subdivisions(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if !part.is_empty() && !out.iter().any(|s| s == part) {
            out.push(part.to_string());
        }
    }
    out
}

fn fingerprint(table: &str, row_index: usize, name: &str, lat: &str, lon: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!(
        "{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}",
        table, row_index, name, lat, lon
    ));
    format!("{:x}", hasher.finalize())
}

/// Converts one raw row into an [`Entity`]. Pure: nothing is dropped here, blank
/// names included. The returned id is a placeholder until the arena assigns one.
pub fn normalize_record(
    table: &TableConfig,
    row_index: usize,
    raw: &RawRecord,
) -> Entity {
    let name = raw.get("Name").to_string();
    let lat_raw = raw.get_or("Latitude", "0");
    let lon_raw = raw.get_or("Longitude", "0");

    let table_country = table.country.as_deref().unwrap_or(UNITED_STATES);
    let country = if table.country_from_row {
        raw.get_or("Country", table_country)
    } else {
        table_country
    }
    .to_string();

    let subdivisions = parse_subdivisions(raw.get("States"));
    let designation = raw.get_or("Designation", &table.default_designation).to_string();

    let description = match raw.get("Description") {
        "" if designation.is_empty() => String::new(),
        "" if subdivisions.is_empty() => format!("{} in {}", designation, country),
        "" => format!("{} in {}", designation, subdivisions.join(", ")),
        d => d.to_string(),
    };

    let notable = parse_notable_flag(raw.get("Notable")).unwrap_or_else(|| {
        mentions_most_photographed(&name) || mentions_most_photographed(&description)
    });

    let extras: BTreeMap<String, String> = table
        .extras
        .iter()
        .filter_map(|x| {
            let v = raw.get(&x.column);
            (!v.is_empty()).then(|| (x.field.clone(), v.to_string()))
        })
        .collect();

    let fingerprint = fingerprint(&table.name, row_index, &name, lat_raw, lon_raw);
    let key = match raw.get("Park_Code") {
        "" => format!("{}:{}", table.name, &fingerprint[..12]),
        code => format!("{}:{}", table.name, code),
    };

    Entity {
        id: EntityId(0),
        key,
        coordinates: GeoPoint::parse(lat_raw, lon_raw),
        fingerprint,
        name,
        country,
        subdivisions,
        designation,
        description,
        url: raw.get("URL").to_string(),
        category_tag: table.category_tag,
        notable,
        extras,
        source_table: table.name.clone(),
    }
}

/// Owns the normalized entities of one load and hands out dense ids.
#[derive(Debug, Clone, Default)]
pub struct EntityArena {
    entities: Vec<Entity>,
    by_fingerprint: HashMap<String, EntityId>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the entity under the next dense id. A fingerprint seen before
    /// returns the existing id and the new copy is discarded.
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        if let Some(&id) = self.by_fingerprint.get(&entity.fingerprint) {
            return id;
        }
        let id = EntityId(self.entities.len() as u32);
        entity.id = id;
        self.by_fingerprint.insert(entity.fingerprint.clone(), id);
        self.entities.push(entity);
        id
    }

    /// Normalizes every row of a table into the arena, returning how many were new.
    pub fn extend_table(
        &mut self,
        table: &TableConfig,
        records: &[RawRecord],
    ) -> usize {
        let before = self.entities.len();
        for (i, raw) in records.iter().enumerate() {
            self.insert(normalize_record(table, i, raw));
        }
        self.entities.len() - before
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Loads and normalizes every table found under `data_dir`. A missing or
/// unreadable table contributes nothing; the rest of the load continues.
pub fn load_all(data_dir: &Path, tables: &[TableConfig]) -> EntityArena {
    let mut arena = EntityArena::new();
    let mut missing = 0usize;

    for table in tables {
        let path = data_dir.join(format!("{}.csv", table.name));
        if !path.exists() {
            debug!("Source table not found — table={} path={}", table.name, path.display());
            missing += 1;
            continue;
        }
        match load_table(&path) {
            Ok(records) => {
                let added = arena.extend_table(table, &records);
                debug!(
                    "Loaded source table — table={} rows={} added={}",
                    table.name,
                    records.len(),
                    added
                );
            }
            Err(e) => {
                warn!(
                    "Source table unreadable; continuing without it — table={} error={}",
                    table.name, e
                );
                missing += 1;
            }
        }
    }

    info!(
        "Normalized source tables — tables={} unavailable={} entities={}",
        tables.len(),
        missing,
        arena.len()
    );
    arena
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CategoryTag;
    use std::io::Cursor;

    fn table(name: &str) -> TableConfig {
        builtin_tables()
            .into_iter()
            .find(|t| t.name == name)
            .unwrap()
    }

    #[test]
    fn test_defaults_for_sparse_row() {
        let raw = RawRecord::new().with("Name", "Lonely Peak");
        let e = normalize_record(&table("us_parks"), 0, &raw);

        assert_eq!(e.country, "United States");
        assert_eq!(e.designation, "National Park");
        assert_eq!(e.description, "National Park in United States");
        assert_eq!(e.url, "");
        assert!(e.coordinates.is_none());
        assert!(e.subdivisions.is_empty());
        assert!(e.key.starts_with("us_parks:"));
    }

    #[test]
    fn test_templated_description_uses_subdivisions() {
        let raw = RawRecord::new()
            .with("Name", "Great Smoky Mountains")
            .with("States", "TN, NC, TN")
            .with("Latitude", "35.68")
            .with("Longitude", "-83.53");
        let e = normalize_record(&table("us_parks"), 3, &raw);
        assert_eq!(e.subdivisions, vec!["TN", "NC"]);
        assert_eq!(e.description, "National Park in TN, NC");
    }

    #[test]
    fn test_country_comes_from_table_not_row() {
        let raw = RawRecord::new()
            .with("Name", "Pashupatinath")
            .with("Country", "India");
        let e = normalize_record(&table("nepal_temples"), 0, &raw);
        assert_eq!(e.country, "Nepal");
        assert_eq!(e.category_tag, Some(CategoryTag::Temple));
    }

    #[test]
    fn test_transboundary_row_country_overrides() {
        let t = table("transboundary_heritage");
        let raw = RawRecord::new()
            .with("Name", "Victoria Falls")
            .with("Country", "Zambia");
        assert_eq!(normalize_record(&t, 0, &raw).country, "Zambia");

        let raw = RawRecord::new().with("Name", "Unknown Border Site");
        assert_eq!(
            normalize_record(&t, 1, &raw).country,
            "Transboundary"
        );
    }

    #[test]
    fn test_extras_pass_through() {
        let raw = RawRecord::new()
            .with("Name", "Kamakhya")
            .with("Body_Part", "Yoni");
        let e = normalize_record(&table("india_shakti_peethas"), 0, &raw);
        assert_eq!(e.extra("body_part"), Some("Yoni"));
        assert_eq!(e.extra("ordinal"), None);
    }

    #[test]
    fn test_notable_structured_column_beats_text() {
        let raw = RawRecord::new()
            .with("Name", "Arches")
            .with("Description", "Among the most photographed arches")
            .with("Notable", "no");
        let e = normalize_record(&table("us_parks"), 0, &raw);
        assert!(!e.notable);

        let raw = RawRecord::new()
            .with("Name", "Arches")
            .with("Description", "Among the most photographed arches");
        let e = normalize_record(&table("us_parks"), 0, &raw);
        assert!(e.notable);
    }

    #[test]
    fn test_park_code_gives_stable_key() {
        let raw = RawRecord::new().with("Name", "Yosemite").with("Park_Code", "yose");
        let a = normalize_record(&table("us_parks"), 0, &raw);
        let b = normalize_record(&table("us_parks"), 0, &raw);
        assert_eq!(a.key, "us_parks:yose");
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn test_arena_assigns_dense_ids_and_dedupes() {
        let t = table("us_parks");
        let rows = vec![
            RawRecord::new().with("Name", "A"),
            RawRecord::new().with("Name", "B"),
        ];
        let mut arena = EntityArena::new();
        assert_eq!(arena.extend_table(&t, &rows), 2);
        // Reloading the same table adds nothing.
        assert_eq!(arena.extend_table(&t, &rows), 0);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.entities()[1].id, EntityId(1));
        assert_eq!(arena.get(EntityId(1)).unwrap().name, "B");
    }

    #[test]
    fn test_read_records_tolerates_ragged_rows() {
        let csv = "Park_Code,Name,States,Latitude,Longitude\n\
                   acad,Acadia,ME,44.35,-68.21\n\
                   short,Short Row\n";
        let rows = read_records(Cursor::new(csv)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), "Acadia");
        assert_eq!(rows[1].get("Latitude"), "");
    }

    #[test]
    fn test_load_all_skips_missing_tables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("us_parks.csv"),
            "Name,States,Latitude,Longitude\nZion,UT,37.3,-113.0\n",
        )
        .unwrap();
        let arena = load_all(dir.path(), &builtin_tables());
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.entities()[0].name, "Zion");
    }
}
