// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::normalize::{builtin_tables, TableConfig};
use crate::proximity::RadiusPolicy;
use crate::stats::DEFAULT_TOP_N;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_ENV: &str = "PARKMAP_CONFIG_DIR";
const CONFIG_FILE: &str = "parkmap.json";

/// Root for config and default data. `PARKMAP_CONFIG_DIR` wins over the platform dir.
pub fn get_config_root() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    ProjectDirs::from("org", "parkmap", "parkmap")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".parkmap"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub data_dir: PathBuf,
    pub airports_file: String,
    pub top_n: usize,
    pub nearby_limit: usize,
    /// Built-in table names to skip.
    pub disabled_tables: Vec<String>,
    /// Appended after the built-in catalog.
    pub extra_tables: Vec<TableConfig>,
    pub radius: RadiusPolicy,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            data_dir: get_config_root().join("data"),
            airports_file: "airports.csv".to_string(),
            top_n: DEFAULT_TOP_N,
            nearby_limit: 5,
            disabled_tables: Vec::new(),
            extra_tables: Vec::new(),
            radius: RadiusPolicy::default(),
        }
    }
}

impl AtlasConfig {
    pub fn with_data_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// The effective table catalog for a load.
    pub fn tables(&self) -> Vec<TableConfig> {
        builtin_tables()
            .into_iter()
            .chain(self.extra_tables.iter().cloned())
            .filter(|t| !self.disabled_tables.iter().any(|d| d == &t.name))
            .collect()
    }

    pub fn airports_path(&self) -> PathBuf {
        self.data_dir.join(&self.airports_file)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_path: get_config_root().join(CONFIG_FILE),
        }
    }

    pub fn at_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<AtlasConfig> {
        if !self.config_path.exists() {
            return Ok(AtlasConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read {}", self.config_path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.config_path.display()))
    }

    pub fn save(&self, config: &AtlasConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))
    }
}
