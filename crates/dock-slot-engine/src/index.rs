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

//! # Busy Interval Index
//!
//! Per-dock lists of the raw stays `[arrival, departure)` of all routes.
//! The safety margin is not stored here; the prober applies it.

use dock_slot_core::prelude::*;
use dock_slot_model::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusyInterval {
    dock: DockKey,
    route: RouteId,
    window: TimeInterval<i64>,
}

impl BusyInterval {
    #[inline]
    pub fn new(dock: DockKey, route: RouteId, window: TimeInterval<i64>) -> Self {
        Self {
            dock,
            route,
            window,
        }
    }

    #[inline]
    pub fn dock(&self) -> &DockKey {
        &self.dock
    }

    #[inline]
    pub fn route(&self) -> &RouteId {
        &self.route
    }

    #[inline]
    pub fn window(&self) -> TimeInterval<i64> {
        self.window
    }

    /// The window widened by `margin` on both sides, `[start - m, end + m)`.
    #[inline]
    pub fn blocked(&self, margin: Span) -> TimeInterval<i64> {
        self.window.saturating_inflate(margin)
    }

    /// Whether a slot starting at `t` collides with this stay under `margin`.
    #[inline]
    pub fn blocks(&self, t: Instant, margin: Span) -> bool {
        self.blocked(margin).contains(t)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BusyIndex {
    by_dock: BTreeMap<DockKey, Vec<BusyInterval>>,
}

impl BusyIndex {
    /// Builds the index for `routes`.
    ///
    /// Every dock of `universe` is present, with an empty list if no route
    /// uses it. Docks outside the universe are indexed as well and reported
    /// once each.
    #[instrument(level = "debug", skip_all, fields(docks = universe.len()))]
    pub fn build<'a, I>(routes: I, universe: &DockUniverse) -> Self
    where
        I: IntoIterator<Item = &'a Route>,
    {
        let mut by_dock: BTreeMap<DockKey, Vec<BusyInterval>> = universe
            .iter()
            .map(|dock| (dock.clone(), Vec::new()))
            .collect();

        let mut total = 0usize;
        for route in routes {
            let dock = route.dock();
            let list = by_dock.entry(dock.clone()).or_insert_with(|| {
                warn!(%dock, route = %route.id(), "Indexing dock outside the dock universe");
                Vec::new()
            });
            list.push(BusyInterval::new(
                dock.clone(),
                route.id().clone(),
                route.stay(),
            ));
            total += 1;
        }

        for list in by_dock.values_mut() {
            list.sort_by_key(|b| b.window.start());
        }

        debug!(intervals = total, docks = by_dock.len(), "Busy index built");
        Self { by_dock }
    }

    /// Busy intervals of `dock`, sorted by start. Empty for unknown docks.
    #[inline]
    pub fn intervals(&self, dock: &DockKey) -> &[BusyInterval] {
        self.by_dock.get(dock).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn contains_dock(&self, dock: &DockKey) -> bool {
        self.by_dock.contains_key(dock)
    }

    #[inline]
    pub fn docks(&self) -> impl Iterator<Item = &DockKey> + '_ {
        self.by_dock.keys()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&DockKey, &[BusyInterval])> + '_ {
        self.by_dock.iter().map(|(d, l)| (d, l.as_slice()))
    }

    /// Number of docks.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_dock.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_dock.is_empty()
    }

    #[inline]
    pub fn interval_count(&self) -> usize {
        self.by_dock.values().map(Vec::len).sum()
    }
}
