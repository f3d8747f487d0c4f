// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Schedule Projector
//!
//! Merges the loaded routes and the committed moves into one timeline per
//! dock, ordered by arrival.

use crate::ledger::{RelocationLedger, with_occurrence};
use dock_slot_core::prelude::*;
use dock_slot_model::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// How moved routes show up in a [`Schedule`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectionMode {
    /// Every route at its original slot plus every committed move.
    Additive,
    /// A moved route appears once, at its most recent move.
    #[default]
    Superseding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    time: Instant,
    label: String,
    route_id: RouteId,
    relocated: bool,
}

impl ScheduleEntry {
    fn of(route: &Route, relocated: bool) -> Self {
        Self {
            time: route.planned_arrival(),
            label: route.label().to_owned(),
            route_id: route.id().clone(),
            relocated,
        }
    }

    #[inline]
    pub fn time(&self) -> Instant {
        self.time
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    #[inline]
    pub fn relocated(&self) -> bool {
        self.relocated
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    docks: BTreeMap<DockKey, Vec<ScheduleEntry>>,
}

impl Schedule {
    /// Entries of `dock` sorted by time. Empty for unknown docks.
    #[inline]
    pub fn entries(&self, dock: &DockKey) -> &[ScheduleEntry] {
        self.docks.get(dock).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn docks(&self) -> impl Iterator<Item = &DockKey> + '_ {
        self.docks.keys()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&DockKey, &[ScheduleEntry])> + '_ {
        self.docks.iter().map(|(d, e)| (d, e.as_slice()))
    }

    #[inline]
    pub fn total_entries(&self) -> usize {
        self.docks.values().map(Vec::len).sum()
    }
}

#[instrument(
    level = "debug",
    skip_all,
    fields(routes = routes.len(), moves = ledger.len(), mode = ?mode)
)]
pub fn project(
    routes: &[Route],
    ledger: &RelocationLedger,
    universe: &DockUniverse,
    mode: ProjectionMode,
) -> Schedule {
    let mut docks: BTreeMap<DockKey, Vec<ScheduleEntry>> = universe
        .iter()
        .map(|d| (d.clone(), Vec::new()))
        .collect();

    let superseding = mode == ProjectionMode::Superseding;
    for (nth, route) in with_occurrence(routes) {
        if superseding && ledger.is_relocated_nth(route.id(), nth) {
            continue;
        }
        docks
            .entry(route.dock().clone())
            .or_default()
            .push(ScheduleEntry::of(route, false));
    }

    let latest: HashMap<(&RouteId, usize), usize> = ledger
        .iter()
        .enumerate()
        .map(|(i, r)| ((r.route_id(), r.occurrence()), i))
        .collect();
    for (i, record) in ledger.iter().enumerate() {
        if superseding && latest.get(&(record.route_id(), record.occurrence())) != Some(&i) {
            continue;
        }
        docks
            .entry(record.new_dock().clone())
            .or_default()
            .push(ScheduleEntry::of(record.relocated(), true));
    }

    for entries in docks.values_mut() {
        entries.sort_by_key(ScheduleEntry::time);
    }

    let schedule = Schedule { docks };
    debug!(entries = schedule.total_entries(), "Schedule projected");
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_slot_core::clock::parse_timestamp;

    fn at(s: &str) -> Instant {
        parse_timestamp(&format!("2024-01-01T{s}")).unwrap()
    }

    fn route(id: &str, gate: &str, from: &str, to: &str) -> Route {
        Route::new(id, format!("REF-{id}"), gate, at(from), at(to))
    }

    fn labels(s: &Schedule, dock: u32) -> Vec<(&str, bool)> {
        s.entries(&DockKey::numbered(dock))
            .iter()
            .map(|e| (e.label(), e.relocated()))
            .collect()
    }

    fn fixture() -> (Vec<Route>, RelocationLedger) {
        let routes = vec![
            route("A", "Dock 1", "10:00:00", "10:30:00"),
            route("B", "Dock 1", "08:00:00", "08:30:00"),
        ];
        let mut ledger = RelocationLedger::new();
        ledger.commit_move(&routes[0], at("12:00:00"), DockKey::numbered(2));
        ledger.commit_move(&routes[0], at("07:00:00"), DockKey::numbered(2));
        (routes, ledger)
    }

    #[test]
    fn test_all_fixed_docks_present() {
        let s = project(
            &[],
            &RelocationLedger::new(),
            &DockUniverse::fixed(4),
            ProjectionMode::default(),
        );
        assert_eq!(s.docks().count(), 4);
        assert_eq!(s.total_entries(), 0);
    }

    #[test]
    fn test_entries_sorted_by_time() {
        let (routes, _) = fixture();
        let s = project(
            &routes,
            &RelocationLedger::new(),
            &DockUniverse::fixed(2),
            ProjectionMode::Superseding,
        );
        assert_eq!(labels(&s, 1), vec![("REF-B", false), ("REF-A", false)]);
    }

    #[test]
    fn test_superseding_shows_latest_move_only() {
        let (routes, ledger) = fixture();
        let s = project(&routes, &ledger, &DockUniverse::fixed(2), ProjectionMode::Superseding);
        assert_eq!(labels(&s, 1), vec![("REF-B", false)]);
        let dock2 = s.entries(&DockKey::numbered(2));
        assert_eq!(dock2.len(), 1);
        assert_eq!(dock2[0].time(), at("07:00:00"));
        assert!(dock2[0].relocated());
    }

    #[test]
    fn test_additive_keeps_original_and_every_move() {
        let (routes, ledger) = fixture();
        let s = project(&routes, &ledger, &DockUniverse::fixed(2), ProjectionMode::Additive);
        assert_eq!(labels(&s, 1), vec![("REF-B", false), ("REF-A", false)]);
        assert_eq!(labels(&s, 2), vec![("REF-A", true), ("REF-A", true)]);
        assert_eq!(s.total_entries(), 4);
    }

    #[test]
    fn test_ties_keep_originals_before_moves() {
        let routes = vec![
            route("A", "Dock 1", "10:00:00", "10:30:00"),
            route("B", "Dock 2", "09:00:00", "09:30:00"),
        ];
        let mut ledger = RelocationLedger::new();
        ledger.commit_move(&routes[1], at("10:00:00"), DockKey::numbered(1));
        let s = project(&routes, &ledger, &DockUniverse::fixed(2), ProjectionMode::Additive);
        assert_eq!(labels(&s, 1), vec![("REF-A", false), ("REF-B", true)]);
    }

    #[test]
    fn test_discovered_dock_listed() {
        let routes = vec![route("Y", "Yard 7", "10:00:00", "10:30:00")];
        let s = project(
            &routes,
            &RelocationLedger::new(),
            &DockUniverse::fixed(1),
            ProjectionMode::default(),
        );
        assert_eq!(s.entries(&normalize("Yard 7")).len(), 1);
        assert_eq!(s.docks().count(), 2);
    }

    #[test]
    fn test_schedule_serializes_by_dock_label() {
        let (routes, ledger) = fixture();
        let s = project(&routes, &ledger, &DockUniverse::fixed(2), ProjectionMode::Superseding);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["docks"]["Dock 1"][0]["routeId"], "B");
        assert_eq!(v["docks"]["Dock 2"][0]["relocated"], true);
    }

    #[test]
    fn test_superseding_hides_only_moved_duplicate() {
        let routes = vec![
            route("A", "Dock 1", "10:00:00", "10:30:00"),
            route("A", "Dock 2", "12:00:00", "12:30:00"),
        ];
        let mut ledger = RelocationLedger::new();
        ledger.commit_move_nth(&routes[1], 1, at("08:00:00"), DockKey::numbered(1));
        let s = project(
            &routes,
            &ledger,
            &DockUniverse::fixed(2),
            ProjectionMode::Superseding,
        );
        assert_eq!(labels(&s, 1), vec![("REF-A", true), ("REF-A", false)]);
        assert!(s.entries(&DockKey::numbered(2)).is_empty());
    }
}
