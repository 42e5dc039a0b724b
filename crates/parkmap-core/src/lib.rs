// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod airport;
pub mod atlas;
pub mod category;
pub mod config;
pub mod entity;
pub mod normalize;
pub mod proximity;
pub mod region;
pub mod stats;
pub mod visibility;
pub mod visited;

use thiserror::Error;

pub use airport::{Airport, AirportParser};
pub use atlas::Atlas;
pub use category::{derive_category, Category};
pub use config::{get_config_root, AtlasConfig, ConfigManager};
pub use entity::{CategoryTag, Entity, EntityId, GeoPoint};
pub use normalize::{builtin_tables, load_all, EntityArena, RawRecord, TableConfig};
pub use proximity::{distance_miles, nearest, Nearby, RadiusPolicy, RelevantAirport};
pub use region::{classify, RegionGroup, RegionKey};
pub use stats::{aggregate, visited_progress, Aggregate, VisitedProgress};
pub use visibility::{visible, visible_by, VisibilityState};
pub use visited::{VisitKey, VisitedSet};

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
