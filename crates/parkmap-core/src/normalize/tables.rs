// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::entity::CategoryTag;
use serde::{Deserialize, Serialize};

/// A category-specific column copied verbatim onto [`crate::Entity::extras`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraColumn {
    pub column: String,
    pub field: String,
}

/// Declarative description of one source table. The file is `<data_dir>/<name>.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    /// Injected into every row. `None` means the United States, whose rows
    /// are routed to regions by state code.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub category_tag: Option<CategoryTag>,
    /// Let the row's own `Country` column win over `country`. Only the
    /// transboundary heritage table sets this.
    #[serde(default)]
    pub country_from_row: bool,
    #[serde(default)]
    pub default_designation: String,
    #[serde(default)]
    pub extras: Vec<ExtraColumn>,
}

impl TableConfig {
    fn new(name: &str, country: Option<&str>, designation: &str) -> Self {
        Self {
            name: name.to_string(),
            country: country.map(|c| c.to_string()),
            category_tag: None,
            country_from_row: false,
            default_designation: designation.to_string(),
            extras: Vec::new(),
        }
    }

    fn tag(mut self, tag: CategoryTag) -> Self {
        self.category_tag = Some(tag);
        self
    }

    fn extra(mut self, column: &str, field: &str) -> Self {
        self.extras.push(ExtraColumn {
            column: column.to_string(),
            field: field.to_string(),
        });
        self
    }
}

fn parks(name: &str, country: &str) -> TableConfig {
    TableConfig::new(name, Some(country), "National Park")
}

fn heritage(name: &str, country: &str) -> TableConfig {
    TableConfig::new(name, Some(country), "UNESCO World Heritage Site")
        .tag(CategoryTag::Heritage)
        .extra("Year", "inscribed_year")
}

const HERITAGE_ONLY: &[(&str, &str)] = &[
    ("france_heritage", "France"),
    ("italy_heritage", "Italy"),
    ("spain_heritage", "Spain"),
    ("germany_heritage", "Germany"),
    ("greece_heritage", "Greece"),
    ("portugal_heritage", "Portugal"),
    ("egypt_heritage", "Egypt"),
    ("morocco_heritage", "Morocco"),
    ("kenya_heritage", "Kenya"),
    ("tanzania_heritage", "Tanzania"),
    ("ethiopia_heritage", "Ethiopia"),
    ("mexico_heritage", "Mexico"),
    ("peru_heritage", "Peru"),
    ("brazil_heritage", "Brazil"),
    ("argentina_heritage", "Argentina"),
    ("chile_heritage", "Chile"),
    ("china_heritage", "China"),
    ("thailand_heritage", "Thailand"),
    ("cambodia_heritage", "Cambodia"),
    ("vietnam_heritage", "Vietnam"),
    ("indonesia_heritage", "Indonesia"),
    ("jordan_heritage", "Jordan"),
    ("turkey_heritage", "Turkey"),
    ("iran_heritage", "Iran"),
];

/// The tables shipped with the map, in load order.
pub fn builtin_tables() -> Vec<TableConfig> {
    let mut tables = vec![
        TableConfig::new("us_parks", None, "National Park"),
        parks("india_parks", "India"),
        heritage("india_heritage", "India"),
        TableConfig::new("india_jyotirlingas", Some("India"), "Jyotirlinga")
            .tag(CategoryTag::Jyotirlinga)
            .extra("Number", "ordinal"),
        TableConfig::new("india_shakti_peethas", Some("India"), "Shakti Peetha")
            .tag(CategoryTag::ShaktiPeetha)
            .extra("Body_Part", "body_part"),
        TableConfig::new("india_char_dham", Some("India"), "Char Dham")
            .tag(CategoryTag::CharDham),
        TableConfig::new("india_forts", Some("India"), "Fort").tag(CategoryTag::Fort),
        TableConfig::new("india_monasteries", Some("India"), "Monastery")
            .tag(CategoryTag::Monastery),
        parks("nepal_parks", "Nepal"),
        TableConfig::new("nepal_temples", Some("Nepal"), "Temple").tag(CategoryTag::Temple),
        heritage("nepal_heritage", "Nepal"),
        TableConfig::new("nepal_treks", Some("Nepal"), "Trekking Route")
            .tag(CategoryTag::Trekking)
            .extra("Duration", "duration"),
        parks("japan_parks", "Japan"),
        TableConfig::new("japan_temples", Some("Japan"), "Temple").tag(CategoryTag::Temple),
        TableConfig::new("japan_castles", Some("Japan"), "Castle").tag(CategoryTag::Castle),
        parks("canada_parks", "Canada"),
        parks("australia_parks", "Australia"),
        parks("new_zealand_parks", "New Zealand"),
        parks("uk_parks", "United Kingdom"),
        parks("sri_lanka_parks", "Sri Lanka"),
        parks("costa_rica_parks", "Costa Rica"),
    ];

    tables.extend(
        HERITAGE_ONLY
            .iter()
            .map(|(name, country)| heritage(name, country)),
    );

    let mut transboundary = TableConfig::new(
        "transboundary_heritage",
        Some("Transboundary"),
        "Transboundary World Heritage Site",
    )
    .tag(CategoryTag::Transboundary)
    .extra("Year", "inscribed_year");
    transboundary.country_from_row = true;
    tables.push(transboundary);

    tables
}
