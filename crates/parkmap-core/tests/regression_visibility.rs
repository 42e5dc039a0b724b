// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Visibility pipeline over a normalized mixed-country load:
// - default state shows exactly the named, geolocated, classified rows
// - all regions off empties the map whatever else is set
// - toggles compose, and the caller's state is never modified

use parkmap_core::normalize::builtin_tables;
use parkmap_core::{
    classify, visible, Category, EntityArena, RawRecord, RegionGroup, RegionKey,
    VisibilityState, VisitedSet,
};

fn row(name: &str, states: &str, lat: &str, lon: &str) -> RawRecord {
    RawRecord::new()
        .with("Name", name)
        .with("States", states)
        .with("Latitude", lat)
        .with("Longitude", lon)
}

fn load() -> EntityArena {
    let tables = builtin_tables();
    let table = |name: &str| tables.iter().find(|t| t.name == name).unwrap().clone();

    let mut arena = EntityArena::new();
    arena.extend_table(
        &table("us_parks"),
        &[
            row("Yosemite", "CA", "37.8651", "-119.5383"),
            row("Acadia", "ME", "44.35", "-68.21"),
            row("Denali", "AK", "63.1148", "-151.1926"),
            row("Placeholder", "CA", "0", "0"),
            row("", "CA", "36.0", "-118.0"),
        ],
    );
    arena.extend_table(
        &table("nepal_temples"),
        &[row("Pashupatinath", "Bagmati", "27.7105", "85.3487")],
    );
    arena.extend_table(
        &table("india_forts"),
        &[row("Mehrangarh", "Rajasthan", "26.2978", "73.0185")
            .with("Description", "The most photographed fort in Jodhpur")],
    );
    arena
}

#[test]
fn test_default_state_is_structural_filter_only() {
    let arena = load();
    let entities = arena.entities();
    let out = visible(entities, &VisibilityState::new(), &VisitedSet::new());

    let expected: Vec<_> = entities
        .iter()
        .filter(|e| e.is_placeable() && classify(e).is_some())
        .map(|e| e.name.clone())
        .collect();
    let got: Vec<_> = out.iter().map(|e| e.name.clone()).collect();
    assert_eq!(got, expected);
    assert_eq!(got.len(), 5);
}

#[test]
fn test_all_regions_off_hides_everything() {
    let arena = load();
    let state = VisibilityState::new()
        .with_all_regions(false)
        .with_category(Category::Notable, true)
        .with_unvisited_only(true);
    assert!(visible(arena.entities(), &state, &VisitedSet::new()).is_empty());
}

#[test]
fn test_group_toggle_and_search_compose() {
    let arena = load();
    let state = VisibilityState::new()
        .with_group(RegionGroup::UnitedStates, false)
        .with_region(RegionKey::UsAlaska, true)
        .with_search("DEN");
    let out = visible(arena.entities(), &state, &VisitedSet::new());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "Denali");
}

#[test]
fn test_search_matches_subdivision_names() {
    let arena = load();
    let state = VisibilityState::new().with_search("rajasthan");
    let out = visible(arena.entities(), &state, &VisitedSet::new());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "Mehrangarh");
}

#[test]
fn test_notable_fort_follows_notable_toggle() {
    let arena = load();
    let forts_off = VisibilityState::new().with_category(Category::Fort, false);
    let out = visible(arena.entities(), &forts_off, &VisitedSet::new());
    assert!(out.iter().any(|e| e.name == "Mehrangarh"));

    let notable_off = VisibilityState::new().with_category(Category::Notable, false);
    let out = visible(arena.entities(), &notable_off, &VisitedSet::new());
    assert!(out.iter().all(|e| e.name != "Mehrangarh"));
}

#[test]
fn test_state_and_inputs_are_untouched() {
    let arena = load();
    let before = arena.entities().to_vec();
    let state = VisibilityState::new().with_search("acadia");
    let snapshot = state.clone();
    let visited = VisitedSet::new().with_visit(&arena.entities()[1]);

    let _ = visible(arena.entities(), &state, &visited);
    let _ = visible(arena.entities(), &state.clone().with_visited_only(true), &visited);

    assert_eq!(state, snapshot);
    assert_eq!(arena.entities(), before.as_slice());
    assert_eq!(visited.len(), 1);
}
