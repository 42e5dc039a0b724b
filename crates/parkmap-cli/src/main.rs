// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use parkmap_core::{
    Atlas, Category, ConfigManager, Entity, RegionGroup, RegionKey, VisibilityState, VisitedSet,
};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the source CSV tables
    #[arg(short, long, env = "PARKMAP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to parkmap.json in the config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array of visit keys marking visited places
    #[arg(long)]
    visited: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Default)]
struct FilterArgs {
    /// Free-text search over name, description, country and subdivisions
    #[arg(short, long, default_value = "")]
    query: String,
    /// Show only these regions (id such as `us-west`, or a label); repeatable
    #[arg(long = "region")]
    regions: Vec<String>,
    /// Hide a whole region group (e.g. `india`); repeatable
    #[arg(long = "hide-group")]
    hidden_groups: Vec<String>,
    /// Hide a category (e.g. `national-park`, `notable`); repeatable
    #[arg(long = "hide-category")]
    hidden_categories: Vec<String>,
    #[arg(long, conflicts_with = "unvisited_only")]
    visited_only: bool,
    #[arg(long)]
    unvisited_only: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Counts and top-N rankings for the visible set
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List visible attractions
    Search {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Attractions and airports near a named place (partial match)
    Nearby { name: String },
    /// Airports serving the visible set
    Airports {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Region taxonomy with entity counts
    Regions,
    /// Print the effective configuration
    Config,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn build_state(filter: &FilterArgs) -> Result<VisibilityState> {
    let mut state = VisibilityState::new().with_search(filter.query.clone());

    if !filter.regions.is_empty() {
        state = state.with_all_regions(false);
        for id in &filter.regions {
            let key = RegionKey::parse(id).ok_or_else(|| anyhow!("Unknown region '{}'", id))?;
            state = state.with_region(key, true);
        }
    }
    for name in &filter.hidden_groups {
        let group = RegionGroup::ALL
            .iter()
            .copied()
            .find(|g| {
                g.label().eq_ignore_ascii_case(name.trim())
                    || format!("{:?}", g).eq_ignore_ascii_case(name.trim())
            })
            .ok_or_else(|| anyhow!("Unknown region group '{}'", name))?;
        state = state.with_group(group, false);
    }
    for name in &filter.hidden_categories {
        let category = Category::parse(name).ok_or_else(|| anyhow!("Unknown category '{}'", name))?;
        state = state.with_category(category, false);
    }
    if filter.visited_only {
        state = state.with_visited_only(true);
    }
    if filter.unvisited_only {
        state = state.with_unvisited_only(true);
    }
    Ok(state)
}

fn load_visited(cli: &Cli) -> Result<VisitedSet> {
    match &cli.visited {
        Some(path) => VisitedSet::load(path),
        None => Ok(VisitedSet::new()),
    }
}

fn describe(atlas: &Atlas, e: &Entity) -> String {
    let region = atlas
        .region_of(e.id)
        .map(|k| k.full_label())
        .unwrap_or_else(|| "unclassified".to_string());
    format!("{} ({}) [{}]", e.name, e.subdivisions_label(), region)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::at_path(path),
        None => ConfigManager::new(),
    };
    let mut config = manager.load()?;
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }

    match &cli.command {
        Commands::Config => {
            println!("# {}", manager.path().display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Stats { filter } => {
            let visited = load_visited(cli)?;
            let atlas = Atlas::load(&config);
            let state = build_state(filter)?;
            let shown = atlas.visible(&state, &visited);
            let agg = atlas.aggregate(&shown);
            let progress = atlas.visited_progress(&shown, &visited);

            println!(
                "{} visible of {} loaded ({} geolocated)",
                agg.total,
                atlas.entities().len(),
                agg.geolocated
            );
            println!(
                "Visited: {}/{} ({:.1}%)",
                progress.visited, progress.total, progress.percent
            );
            for country in &agg.countries {
                println!("\n{}: {}", country.country, country.total);
                for (rank, sub) in country.top_subdivisions.iter().enumerate() {
                    println!("  {:>2}. {:<24} {}", rank + 1, sub.name, sub.count);
                }
            }
            if !agg.categories.is_empty() {
                println!("\nCategories");
                for (category, count) in &agg.categories {
                    println!("  {:<20} {}", category.label(), count);
                }
            }
        }
        Commands::Search { filter } => {
            let visited = load_visited(cli)?;
            let atlas = Atlas::load(&config);
            let state = build_state(filter)?;
            let shown = atlas.visible(&state, &visited);
            for e in &shown {
                let mark = if visited.contains(e) { "[x]" } else { "[ ]" };
                println!("{} {}", mark, describe(&atlas, e));
            }
            println!("{} result(s)", shown.len());
        }
        Commands::Nearby { name } => {
            let atlas = Atlas::load(&config);
            let entity = atlas
                .find_by_name(name)
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("No attraction matching '{}'", name))?;
            println!("{}", describe(&atlas, entity));

            let attractions = atlas.nearby_attractions(entity.id);
            println!(
                "\nNearby attractions (within {:.0} mi)",
                config.radius.attraction_radius(&entity.country)
            );
            if attractions.is_empty() {
                println!("  none");
            }
            for n in &attractions {
                println!("  {:>7.1} mi  {}", n.distance_miles, n.item.name);
            }

            let airports = atlas.nearby_airports(entity.id);
            println!("\nNearby airports (within {:.0} mi)", config.radius.airport_miles);
            if airports.is_empty() {
                println!("  none");
            }
            for n in &airports {
                println!(
                    "  {:>7.1} mi  {} {}",
                    n.distance_miles, n.item.iata, n.item.name
                );
            }
        }
        Commands::Airports { filter } => {
            let visited = load_visited(cli)?;
            let atlas = Atlas::load(&config);
            let state = build_state(filter)?;
            let shown = atlas.visible(&state, &visited);
            for a in atlas.relevant_airports(&shown) {
                let distance = a
                    .distance_miles
                    .map(|d| format!("{:>7.1} mi", d))
                    .unwrap_or_else(|| "      -   ".to_string());
                println!(
                    "{}  {:<4} {} ({})",
                    distance, a.airport.iata, a.airport.name, a.airport.country
                );
            }
        }
        Commands::Regions => {
            let atlas = Atlas::load(&config);
            let agg = atlas.aggregate_all();
            for group in RegionGroup::ALL {
                println!("{}", group.label());
                for key in group.regions() {
                    let count = agg
                        .regions
                        .iter()
                        .find(|(k, _)| *k == key)
                        .map(|(_, n)| *n)
                        .unwrap_or(0);
                    println!("  {:<28} {:<24} {}", key.id(), key.label(), count);
                }
            }
            if agg.unclassified > 0 {
                println!("\n{} unclassified entities are hidden from the map", agg.unclassified);
            }
        }
    }

    Ok(())
}
