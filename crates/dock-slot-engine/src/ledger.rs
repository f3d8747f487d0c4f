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

use dock_slot_core::prelude::*;
use dock_slot_model::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Pairs each route with the number of earlier routes sharing its id.
///
/// Route ids are not guaranteed unique, so a move targets the pair
/// `(id, occurrence)` rather than the id alone.
pub fn with_occurrence<'a, I>(routes: I) -> Vec<(usize, &'a Route)>
where
    I: IntoIterator<Item = &'a Route>,
{
    let mut seen: HashMap<&'a RouteId, usize> = HashMap::new();
    routes
        .into_iter()
        .map(|route| {
            let count = seen.entry(route.id()).or_insert(0);
            let nth = *count;
            *count += 1;
            (nth, route)
        })
        .collect()
}

/// A speculative move of one route to a new time and dock.
///
/// The record owns its own relocated copy; the original route is kept
/// alongside so the move can be reported against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocationRecord {
    original: Route,
    occurrence: usize,
    new_arrival: Instant,
    new_dock: DockKey,
    relocated: Route,
}

impl RelocationRecord {
    pub fn new(
        original: &Route,
        occurrence: usize,
        new_arrival: Instant,
        new_dock: DockKey,
    ) -> Self {
        Self {
            original: original.clone(),
            occurrence,
            relocated: original.relocated(new_arrival, new_dock.clone()),
            new_arrival,
            new_dock,
        }
    }

    #[inline]
    pub fn route_id(&self) -> &RouteId {
        self.original.id()
    }

    /// Which of the routes sharing this id was moved, counted from zero in
    /// load order.
    #[inline]
    pub fn occurrence(&self) -> usize {
        self.occurrence
    }

    #[inline]
    pub fn moves(&self, id: &RouteId, occurrence: usize) -> bool {
        self.occurrence == occurrence && self.route_id() == id
    }

    #[inline]
    pub fn original(&self) -> &Route {
        &self.original
    }

    #[inline]
    pub fn new_arrival(&self) -> Instant {
        self.new_arrival
    }

    #[inline]
    pub fn new_dock(&self) -> &DockKey {
        &self.new_dock
    }

    #[inline]
    pub fn relocated(&self) -> &Route {
        &self.relocated
    }
}

/// Append-only log of committed moves, in commit order.
///
/// Nothing here checks availability: two moves onto the same slot are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelocationLedger {
    records: Vec<RelocationRecord>,
}

impl RelocationLedger {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the first route with `route`'s id.
    #[inline]
    pub fn commit_move(
        &mut self,
        route: &Route,
        new_arrival: Instant,
        new_dock: DockKey,
    ) -> &RelocationRecord {
        self.commit_move_nth(route, 0, new_arrival, new_dock)
    }

    pub fn commit_move_nth(
        &mut self,
        route: &Route,
        occurrence: usize,
        new_arrival: Instant,
        new_dock: DockKey,
    ) -> &RelocationRecord {
        debug!(
            route = %route.id(),
            occurrence,
            dock = %new_dock,
            arrival = new_arrival.value(),
            "Committing move"
        );
        let idx = self.records.len();
        let record = RelocationRecord::new(route, occurrence, new_arrival, new_dock);
        self.records.push(record);
        &self.records[idx]
    }

    /// Removes the most recent move of `id`. Returns whether one existed.
    pub fn remove_move(&mut self, id: &RouteId) -> bool {
        match self.records.iter().rposition(|r| r.route_id() == id) {
            Some(pos) => {
                self.records.remove(pos);
                debug!(route = %id, "Removed latest move");
                true
            }
            None => false,
        }
    }

    /// Removes every move of `id` and returns how many there were.
    pub fn remove_all(&mut self, id: &RouteId) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.route_id() != id);
        before - self.records.len()
    }

    /// Drops moves whose route is not in `known`. An id listed `n` times
    /// keeps moves of its first `n` occurrences. Returns how many were
    /// dropped.
    pub fn retain_routes<'a, I>(&mut self, known: I) -> usize
    where
        I: IntoIterator<Item = &'a RouteId>,
    {
        let mut counts: HashMap<&RouteId, usize> = HashMap::new();
        for id in known {
            *counts.entry(id).or_insert(0) += 1;
        }
        let before = self.records.len();
        self.records.retain(|r| counts.get(r.route_id()).is_some_and(|&n| r.occurrence < n));
        before - self.records.len()
    }

    /// The most recent move of any route with this id.
    #[inline]
    pub fn latest_for(&self, id: &RouteId) -> Option<&RelocationRecord> {
        self.records.iter().rev().find(|r| r.route_id() == id)
    }

    #[inline]
    pub fn latest_for_nth(&self, id: &RouteId, occurrence: usize) -> Option<&RelocationRecord> {
        self.records.iter().rev().find(|r| r.moves(id, occurrence))
    }

    #[inline]
    pub fn is_relocated(&self, id: &RouteId) -> bool {
        self.records.iter().any(|r| r.route_id() == id)
    }

    #[inline]
    pub fn is_relocated_nth(&self, id: &RouteId, occurrence: usize) -> bool {
        self.records.iter().any(|r| r.moves(id, occurrence))
    }

    #[inline]
    pub fn records(&self) -> &[RelocationRecord] {
        &self.records
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &RelocationRecord> + '_ {
        self.records.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_slot_core::clock::{minutes, parse_timestamp};

    fn at(s: &str) -> Instant {
        parse_timestamp(&format!("2024-01-01T{s}")).unwrap()
    }

    fn route(id: &str) -> Route {
        Route::new(id, format!("R-{id}"), "Dock 1", at("10:00:00"), at("10:45:00"))
    }

    #[test]
    fn test_commit_creates_independent_copy() {
        let original = route("A");
        let mut ledger = RelocationLedger::new();
        let rec = ledger.commit_move(&original, at("12:00:00"), DockKey::numbered(3));
        assert_eq!(rec.relocated().planned_arrival(), at("12:00:00"));
        assert_eq!(rec.relocated().planned_departure(), at("12:45:00"));
        assert_eq!(rec.relocated().dock(), &DockKey::numbered(3));
        assert_eq!(rec.relocated().gate(), "Dock 3");
        assert_eq!(rec.original(), &original);
        assert_eq!(rec.occurrence(), 0);
        assert_eq!(original.planned_arrival(), at("10:00:00"));
        assert_eq!(rec.relocated().duration(), minutes(45));
    }

    #[test]
    fn test_commit_then_remove_round_trip() {
        let mut ledger = RelocationLedger::new();
        ledger.commit_move(&route("A"), at("09:00:00"), DockKey::numbered(2));
        ledger.commit_move(&route("B"), at("11:00:00"), DockKey::numbered(1));
        let before = ledger.clone();

        ledger.commit_move(&route("A"), at("13:00:00"), DockKey::numbered(4));
        assert!(ledger.remove_move(&RouteId::new("A")));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut ledger = RelocationLedger::new();
        ledger.commit_move(&route("A"), at("09:00:00"), DockKey::numbered(2));
        assert!(!ledger.remove_move(&RouteId::new("Z")));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_remove_all_and_latest() {
        let mut ledger = RelocationLedger::new();
        let a = RouteId::new("A");
        ledger.commit_move(&route("A"), at("09:00:00"), DockKey::numbered(2));
        ledger.commit_move(&route("B"), at("09:00:00"), DockKey::numbered(2));
        ledger.commit_move(&route("A"), at("14:00:00"), DockKey::numbered(3));
        assert_eq!(ledger.latest_for(&a).unwrap().new_arrival(), at("14:00:00"));
        assert!(ledger.is_relocated(&a));
        assert_eq!(ledger.remove_all(&a), 2);
        assert!(ledger.latest_for(&a).is_none());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_double_booking_is_accepted() {
        let mut ledger = RelocationLedger::new();
        ledger.commit_move(&route("A"), at("09:00:00"), DockKey::numbered(2));
        ledger.commit_move(&route("B"), at("09:00:00"), DockKey::numbered(2));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_retain_routes_prunes_orphans() {
        let mut ledger = RelocationLedger::new();
        ledger.commit_move(&route("A"), at("09:00:00"), DockKey::numbered(2));
        ledger.commit_move(&route("B"), at("09:00:00"), DockKey::numbered(2));
        let keep = [RouteId::new("B")];
        assert_eq!(ledger.retain_routes(&keep), 1);
        assert_eq!(ledger.records()[0].route_id().as_str(), "B");
        ledger.clear();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_with_occurrence_counts_per_id() {
        let routes = [route("A"), route("B"), route("A"), route("A")];
        let nth: Vec<(usize, &str)> = with_occurrence(&routes)
            .into_iter()
            .map(|(n, r)| (n, r.id().as_str()))
            .collect();
        assert_eq!(nth, vec![(0, "A"), (0, "B"), (1, "A"), (2, "A")]);
    }

    #[test]
    fn test_moves_of_shared_id_stay_apart() {
        let a = RouteId::new("A");
        let mut ledger = RelocationLedger::new();
        ledger.commit_move_nth(&route("A"), 1, at("08:00:00"), DockKey::numbered(4));
        assert!(ledger.is_relocated_nth(&a, 1));
        assert!(!ledger.is_relocated_nth(&a, 0));
        assert!(ledger.latest_for_nth(&a, 0).is_none());
        assert_eq!(
            ledger.latest_for_nth(&a, 1).unwrap().new_dock(),
            &DockKey::numbered(4)
        );
    }

    #[test]
    fn test_retain_routes_drops_missing_occurrences() {
        let mut ledger = RelocationLedger::new();
        ledger.commit_move_nth(&route("A"), 0, at("08:00:00"), DockKey::numbered(2));
        ledger.commit_move_nth(&route("A"), 1, at("09:00:00"), DockKey::numbered(3));
        let keep = [RouteId::new("A")];
        assert_eq!(ledger.retain_routes(&keep), 1);
        assert_eq!(ledger.records()[0].occurrence(), 0);
    }
}
