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

//! # Scheduling Session
//!
//! [`SchedulingSession`] owns everything a front end manipulates: the loaded
//! routes, the dock universe, the committed moves and the settings. Derived
//! views (busy index, probe results, schedule) are recomputed on each call.

use crate::config::{ConfigBuildError, SessionConfig};
use crate::index::BusyIndex;
use crate::ledger::{RelocationLedger, RelocationRecord, with_occurrence};
use crate::probe::{AvailabilitySlot, PastSlotPolicy, ProbeConfig, SlotOffer, probe, rank_offers};
use crate::projector::{Schedule, project};
use dock_slot_core::clock::minutes;
use dock_slot_core::prelude::*;
use dock_slot_model::prelude::*;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    UnknownRoute(RouteId),
    Config(ConfigBuildError),
}

impl From<ConfigBuildError> for SessionError {
    fn from(e: ConfigBuildError) -> Self {
        Self::Config(e)
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::UnknownRoute(id) => write!(f, "no route with id {id}"),
            SessionError::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Config(e) => Some(e),
            SessionError::UnknownRoute(_) => None,
        }
    }
}

/// Result of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    route_count: usize,
    notices: Vec<LoadNotice>,
    pruned_relocations: usize,
}

impl LoadSummary {
    #[inline]
    pub fn route_count(&self) -> usize {
        self.route_count
    }

    #[inline]
    pub fn notices(&self) -> &[LoadNotice] {
        &self.notices
    }

    /// Moves dropped because their route is gone from the new data.
    #[inline]
    pub fn pruned_relocations(&self) -> usize {
        self.pruned_relocations
    }
}

/// Availability around one route's arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    route: Route,
    margin: Span,
    slots: Vec<AvailabilitySlot>,
    offers: Vec<SlotOffer>,
}

impl Analysis {
    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[inline]
    pub fn margin(&self) -> Span {
        self.margin
    }

    #[inline]
    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    /// Free `(dock, time)` pairs, closest to the planned arrival first.
    #[inline]
    pub fn offers(&self) -> &[SlotOffer] {
        &self.offers
    }

    #[inline]
    pub fn best_offer(&self) -> Option<&SlotOffer> {
        self.offers.first()
    }
}

#[derive(Debug, Clone)]
pub struct SchedulingSession {
    config: SessionConfig,
    routes: Vec<Route>,
    ledger: RelocationLedger,
    universe: DockUniverse,
}

impl Default for SchedulingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SchedulingSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            universe: DockUniverse::fixed(config.dock_count()),
            config,
            routes: Vec::new(),
            ledger: RelocationLedger::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[inline]
    pub fn ledger(&self) -> &RelocationLedger {
        &self.ledger
    }

    #[inline]
    pub fn universe(&self) -> &DockUniverse {
        &self.universe
    }

    #[inline]
    pub fn margin(&self) -> Span {
        self.config.margin()
    }

    pub fn route(&self, id: &RouteId) -> Result<&Route, SessionError> {
        self.routes
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| SessionError::UnknownRoute(id.clone()))
    }

    fn loader(&self) -> RouteLoader {
        RouteLoader::new()
            .default_duration(self.config.default_duration())
            .dock_universe(DockUniverse::fixed(self.config.dock_count()))
    }

    /// Replaces the routes with the JSON array in `json`.
    ///
    /// On error nothing changes.
    pub fn load_json(&mut self, json: &str) -> Result<LoadSummary, LoadError> {
        let outcome = self.loader().from_str(json)?;
        Ok(self.install(outcome))
    }

    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary, LoadError> {
        let outcome = self.loader().from_path(path)?;
        Ok(self.install(outcome))
    }

    /// Replaces the routes with already built ones.
    pub fn load_routes(&mut self, routes: Vec<Route>) -> LoadSummary {
        self.replace_routes(routes, Vec::new())
    }

    fn install(&mut self, outcome: LoadOutcome) -> LoadSummary {
        let (routes, notices) = outcome.into_parts();
        self.replace_routes(routes, notices)
    }

    #[instrument(level = "debug", skip_all, fields(routes = routes.len()))]
    fn replace_routes(&mut self, routes: Vec<Route>, notices: Vec<LoadNotice>) -> LoadSummary {
        self.routes = routes;
        let pruned = self
            .ledger
            .retain_routes(self.routes.iter().map(Route::id));
        if pruned > 0 {
            warn!(pruned, "Dropped moves of routes no longer present");
        }

        self.universe.reset();
        for dock in self
            .routes
            .iter()
            .map(Route::dock)
            .chain(self.ledger.iter().map(RelocationRecord::new_dock))
        {
            self.universe.discover(dock.clone());
        }

        info!(
            routes = self.routes.len(),
            docks = self.universe.len(),
            moves = self.ledger.len(),
            "Session loaded"
        );
        LoadSummary {
            route_count: self.routes.len(),
            notices,
            pruned_relocations: pruned,
        }
    }

    /// Sets the safety margin in minutes for later probes.
    pub fn set_margin(&mut self, margin_minutes: i64) -> Result<(), SessionError> {
        let margin = minutes(margin_minutes);
        if margin.is_negative() {
            return Err(ConfigBuildError::NegativeMargin(margin).into());
        }
        self.config.margin = margin;
        info!(minutes = margin_minutes, "Margin updated");
        Ok(())
    }

    /// The routes as probing sees them: a moved route is at its latest move
    /// unless `probe_relocations` is off.
    pub fn effective_routes(&self) -> Vec<&Route> {
        if !self.config.probe_relocations() {
            return self.routes.iter().collect();
        }
        with_occurrence(&self.routes)
            .into_iter()
            .map(|(nth, route)| {
                self.ledger
                    .latest_for_nth(route.id(), nth)
                    .map_or(route, RelocationRecord::relocated)
            })
            .collect()
    }

    pub fn busy_index(&self) -> BusyIndex {
        BusyIndex::build(self.effective_routes(), &self.universe)
    }

    /// Probes around the planned arrival of `id` with the configured probe
    /// settings.
    pub fn analyze(&self, id: &RouteId) -> Result<Analysis, SessionError> {
        self.analyze_with(id, *self.config.probe())
    }

    /// Like [`Self::analyze`], dropping candidates before `now`.
    pub fn analyze_at(&self, id: &RouteId, now: Instant) -> Result<Analysis, SessionError> {
        self.analyze_with(
            id,
            self.config.probe().with_past(PastSlotPolicy::DropBefore(now)),
        )
    }

    #[instrument(level = "debug", skip_all, fields(route = %id))]
    fn analyze_with(
        &self,
        id: &RouteId,
        probe_config: ProbeConfig,
    ) -> Result<Analysis, SessionError> {
        let route = self.route(id)?;
        let margin = self.config.margin();
        let index = self.busy_index();
        let slots = probe(&index, route.planned_arrival(), margin, &probe_config);
        let offers = rank_offers(&slots, route.planned_arrival());
        info!(slots = slots.len(), offers = offers.len(), "Route analysed");
        Ok(Analysis {
            route: route.clone(),
            margin,
            slots,
            offers,
        })
    }

    /// Records a move of the first route with `id` to `new_arrival` on the
    /// dock named `dock`.
    ///
    /// The dock label goes through the same normalization as gates; a dock
    /// not seen before joins the universe.
    pub fn commit_move(
        &mut self,
        id: &RouteId,
        new_arrival: Instant,
        dock: &str,
    ) -> Result<&RelocationRecord, SessionError> {
        self.commit_move_nth(id, 0, new_arrival, dock)
    }

    /// Like [`Self::commit_move`] for the `nth` route (from zero, in load
    /// order) among those sharing `id`.
    pub fn commit_move_nth(
        &mut self,
        id: &RouteId,
        nth: usize,
        new_arrival: Instant,
        dock: &str,
    ) -> Result<&RelocationRecord, SessionError> {
        let route = self
            .routes
            .iter()
            .filter(|r| r.id() == id)
            .nth(nth)
            .ok_or_else(|| SessionError::UnknownRoute(id.clone()))?;
        let dock = normalize(dock);
        if self.universe.discover(dock.clone()) {
            warn!(%dock, "Move targets a dock outside the dock universe");
        }
        Ok(self.ledger.commit_move_nth(route, nth, new_arrival, dock))
    }

    /// Undoes the latest move of `id`.
    pub fn remove_move(&mut self, id: &RouteId) -> bool {
        self.ledger.remove_move(id)
    }

    pub fn remove_all_moves(&mut self, id: &RouteId) -> usize {
        self.ledger.remove_all(id)
    }

    pub fn schedule(&self) -> Schedule {
        project(
            &self.routes,
            &self.ledger,
            &self.universe,
            self.config.projection(),
        )
    }
}
