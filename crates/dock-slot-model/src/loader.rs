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

use crate::{
    dock::DockUniverse,
    err::{LoadError, LoadNotice, TimestampField},
    id::RouteId,
    route::{Driver, Route},
};
use dock_slot_core::clock::{Instant, Span, minutes, parse_timestamp};
use serde::Deserialize;
use serde_json::Value;
use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, info, instrument, warn};

/// Route ids are opaque, but feeds sometimes send them as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for RouteId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => RouteId::new(s),
            RawId::Number(n) => RouteId::new(n.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    id: RawId,
    #[serde(default)]
    reference: Option<String>,
    gate: String,
    planned_arrival: String,
    #[serde(default)]
    planned_departure: Option<String>,
    #[serde(default)]
    driver: Option<Driver>,
}

/// Routes accepted by a load together with everything that was patched up
/// along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    routes: Vec<Route>,
    notices: Vec<LoadNotice>,
}

impl LoadOutcome {
    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[inline]
    pub fn notices(&self) -> &[LoadNotice] {
        &self.notices
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<Route>, Vec<LoadNotice>) {
        (self.routes, self.notices)
    }
}

/// Parses operator supplied JSON into routes.
///
/// The input must be an array of route objects. A missing departure falls back
/// to `default_duration` after the arrival, a missing driver is allowed, and a
/// gate outside the configured docks is flagged but kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLoader {
    default_duration: Span,
    universe: DockUniverse,
}

impl Default for RouteLoader {
    fn default() -> Self {
        Self {
            default_duration: minutes(30),
            universe: DockUniverse::default(),
        }
    }
}

impl RouteLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn default_duration(mut self, d: Span) -> Self {
        self.default_duration = d;
        self
    }

    #[inline]
    pub fn dock_universe(mut self, universe: DockUniverse) -> Self {
        self.universe = universe;
        self
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<LoadOutcome, LoadError> {
        let value: Value = serde_json::from_str(s)?;
        self.from_value(value)
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<LoadOutcome, LoadError> {
        let value: Value = serde_json::from_reader(BufReader::new(r))?;
        self.from_value(value)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<LoadOutcome, LoadError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn from_value(&self, value: Value) -> Result<LoadOutcome, LoadError> {
        let Value::Array(items) = value else {
            return Err(LoadError::NotAnArray);
        };

        let mut outcome = LoadOutcome {
            routes: Vec::with_capacity(items.len()),
            notices: Vec::new(),
        };
        let mut seen: HashSet<RouteId> = HashSet::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            let raw: RawRoute = serde_json::from_value(item)
                .map_err(|source| LoadError::InvalidRoute { index, source })?;
            let route = self.convert(raw, &mut outcome.notices)?;
            if !seen.insert(route.id().clone()) {
                outcome
                    .notices
                    .push(LoadNotice::DuplicateRouteId(route.id().clone()));
            }
            if !self.universe.is_configured(route.dock()) {
                outcome.notices.push(LoadNotice::UnknownDock {
                    route: route.id().clone(),
                    dock: route.dock().clone(),
                });
            }
            outcome.routes.push(route);
        }

        for notice in &outcome.notices {
            match notice {
                LoadNotice::MissingDriver(_) | LoadNotice::MissingDeparture(_) => {
                    debug!(%notice, "Route patched with defaults")
                }
                _ => warn!(%notice, "Route accepted with issues"),
            }
        }
        info!(
            routes = outcome.routes.len(),
            notices = outcome.notices.len(),
            "Routes loaded"
        );
        Ok(outcome)
    }

    fn convert(&self, raw: RawRoute, notices: &mut Vec<LoadNotice>) -> Result<Route, LoadError> {
        let id: RouteId = raw.id.into();
        let arrival = parse_field(&id, TimestampField::PlannedArrival, &raw.planned_arrival)?;
        let departure = match raw.planned_departure.as_deref() {
            Some(s) => parse_field(&id, TimestampField::PlannedDeparture, s)?,
            None => {
                notices.push(LoadNotice::MissingDeparture(id.clone()));
                arrival.saturating_add(self.default_duration)
            }
        };
        if departure < arrival {
            notices.push(LoadNotice::DepartureBeforeArrival(id.clone()));
        }

        let route = Route::new(
            id.clone(),
            raw.reference.unwrap_or_default(),
            raw.gate,
            arrival,
            departure,
        );
        Ok(match raw.driver {
            Some(driver) => route.with_driver(driver),
            None => {
                notices.push(LoadNotice::MissingDriver(id));
                route
            }
        })
    }
}

fn parse_field(id: &RouteId, field: TimestampField, value: &str) -> Result<Instant, LoadError> {
    parse_timestamp(value).map_err(|_| LoadError::InvalidTimestamp {
        route: id.clone(),
        field,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::DockKey;
    use dock_slot_core::clock::format_clock;

    const SAMPLE: &str = r#"[
        {
            "id": "A",
            "reference": "NL-0001",
            "gate": "Dock 1 - East",
            "plannedArrival": "2024-01-01T10:00:00",
            "plannedDeparture": "2024-01-01T10:30:00",
            "driver": {"name": {"first": "Jan", "last": "Jansen"}, "phone": {"formatted": "06-1234"}}
        },
        {
            "id": 42,
            "gate": "Yard",
            "plannedArrival": "2024-01-01T11:00:00",
            "extra": true
        }
    ]"#;

    #[test]
    fn test_loads_routes_and_defaults() {
        let outcome = RouteLoader::new().from_str(SAMPLE).unwrap();
        let routes = outcome.routes();
        assert_eq!(routes.len(), 2);

        assert_eq!(routes[0].dock(), &DockKey::numbered(1));
        assert_eq!(routes[0].driver_name(), "Jan Jansen");

        let second = &routes[1];
        assert_eq!(second.id().as_str(), "42");
        assert_eq!(second.reference(), "");
        assert_eq!(format_clock(second.planned_departure()), "11:30:00");
        assert_eq!(second.driver_phone(), "N/A");
    }

    #[test]
    fn test_notices_for_soft_issues() {
        let outcome = RouteLoader::new().from_str(SAMPLE).unwrap();
        let notices = outcome.notices();
        let id = RouteId::new("42");
        assert!(notices.contains(&LoadNotice::MissingDeparture(id.clone())));
        assert!(notices.contains(&LoadNotice::MissingDriver(id.clone())));
        assert!(notices.contains(&LoadNotice::UnknownDock {
            route: id,
            dock: crate::dock::normalize("Yard"),
        }));
        assert!(notices.iter().all(|n| n.route().as_str() == "42"));
    }

    #[test]
    fn test_custom_default_duration() {
        let outcome = RouteLoader::new()
            .default_duration(minutes(90))
            .from_str(SAMPLE)
            .unwrap();
        assert_eq!(outcome.routes()[1].duration(), minutes(90));
    }

    #[test]
    fn test_wider_universe_accepts_more_docks() {
        let json = r#"[{"id":"Z","gate":"Dock 6","plannedArrival":"2024-01-01T08:00:00","plannedDeparture":"2024-01-01T09:00:00","driver":{}}]"#;
        let narrow = RouteLoader::new().from_str(json).unwrap();
        assert_eq!(narrow.notices().len(), 1);
        let wide = RouteLoader::new()
            .dock_universe(DockUniverse::fixed(6))
            .from_str(json)
            .unwrap();
        assert!(wide.notices().is_empty());
    }

    #[test]
    fn test_object_top_level_is_rejected() {
        let err = RouteLoader::new().from_str("{}").unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = RouteLoader::new().from_str("[{\"id\": ").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let err = RouteLoader::new()
            .from_str(r#"[{"id":"A","plannedArrival":"2024-01-01T10:00:00"}]"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidRoute { index: 0, .. }));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let err = RouteLoader::new()
            .from_str(r#"[{"id":"A","gate":"Dock 1","plannedArrival":"noon"}]"#)
            .unwrap_err();
        match err {
            LoadError::InvalidTimestamp { route, field, value } => {
                assert_eq!(route.as_str(), "A");
                assert_eq!(field, TimestampField::PlannedArrival);
                assert_eq!(value, "noon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_departure_before_arrival_and_duplicates() {
        let json = r#"[
            {"id":"A","gate":"Dock 1","plannedArrival":"2024-01-01T10:00:00","plannedDeparture":"2024-01-01T09:00:00","driver":{}},
            {"id":"A","gate":"Dock 2","plannedArrival":"2024-01-01T12:00:00","plannedDeparture":"2024-01-01T12:30:00","driver":{}}
        ]"#;
        let outcome = RouteLoader::new().from_str(json).unwrap();
        let id = RouteId::new("A");
        assert_eq!(
            outcome.notices(),
            &[
                LoadNotice::DepartureBeforeArrival(id.clone()),
                LoadNotice::DuplicateRouteId(id),
            ]
        );
        let first = &outcome.routes()[0];
        assert_eq!(first.planned_departure(), first.planned_arrival());
    }

    #[test]
    fn test_empty_array_is_fine() {
        let outcome = RouteLoader::new().from_str("[]").unwrap();
        assert!(outcome.routes().is_empty());
        assert!(outcome.notices().is_empty());
    }

    #[test]
    fn test_from_reader() {
        let outcome = RouteLoader::new().from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(outcome.into_parts().0.len(), 2);
    }
}
