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

use crate::dock::normalize;
use crate::id::{DockKey, RouteId};
use dock_slot_core::prelude::*;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_DRIVER: &str = "Unknown driver";
pub const NO_PHONE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DriverName {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DriverPhone {
    #[serde(default)]
    pub formatted: Option<String>,
}

/// Driver details as delivered by the route feed. Every level is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Driver {
    #[serde(default)]
    pub name: Option<DriverName>,
    #[serde(default)]
    pub phone: Option<DriverPhone>,
}

impl Driver {
    /// First name, `""` when absent.
    pub fn first_name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.first.as_deref())
            .unwrap_or("")
    }

    /// Last name, `""` when absent.
    pub fn last_name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.last.as_deref())
            .unwrap_or("")
    }

    /// `"First Last"`, or [`UNKNOWN_DRIVER`] when both parts are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name().trim(), self.last_name().trim());
        let full = full.trim();
        if full.is_empty() {
            UNKNOWN_DRIVER.to_owned()
        } else {
            full.to_owned()
        }
    }

    /// Formatted phone number, [`NO_PHONE`] when absent.
    pub fn phone(&self) -> &str {
        self.phone
            .as_ref()
            .and_then(|p| p.formatted.as_deref())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(NO_PHONE)
    }
}

/// A delivery route bound to a dock and a planned stay `[arrival, departure)`.
///
/// The canonical dock is derived from `gate` on construction and is never
/// set independently, so two routes with the same gate always share a dock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    id: RouteId,
    reference: String,
    gate: String,
    dock: DockKey,
    planned_arrival: Instant,
    planned_departure: Instant,
    driver: Option<Driver>,
}

impl Route {
    /// Creates a route. A departure before the arrival is clamped to the
    /// arrival.
    pub fn new(
        id: impl Into<RouteId>,
        reference: impl Into<String>,
        gate: impl Into<String>,
        planned_arrival: Instant,
        planned_departure: Instant,
    ) -> Self {
        let gate = gate.into();
        Self {
            id: id.into(),
            reference: reference.into(),
            dock: normalize(&gate),
            gate,
            planned_arrival,
            planned_departure: planned_departure.max(planned_arrival),
            driver: None,
        }
    }

    #[inline]
    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = Some(driver);
        self
    }

    #[inline]
    pub fn id(&self) -> &RouteId {
        &self.id
    }

    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Reference if present, otherwise the id.
    #[inline]
    pub fn label(&self) -> &str {
        if self.reference.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.reference
        }
    }

    /// The raw gate label.
    #[inline]
    pub fn gate(&self) -> &str {
        &self.gate
    }

    #[inline]
    pub fn dock(&self) -> &DockKey {
        &self.dock
    }

    #[inline]
    pub fn planned_arrival(&self) -> Instant {
        self.planned_arrival
    }

    #[inline]
    pub fn planned_departure(&self) -> Instant {
        self.planned_departure
    }

    #[inline]
    pub fn duration(&self) -> Span {
        self.planned_departure - self.planned_arrival
    }

    /// The raw busy window `[arrival, departure)`.
    #[inline]
    pub fn stay(&self) -> TimeInterval<i64> {
        Interval::new(self.planned_arrival, self.planned_departure)
    }

    #[inline]
    pub fn driver(&self) -> Option<&Driver> {
        self.driver.as_ref()
    }

    pub fn driver_name(&self) -> String {
        self.driver
            .as_ref()
            .map_or_else(|| UNKNOWN_DRIVER.to_owned(), Driver::display_name)
    }

    pub fn driver_phone(&self) -> &str {
        self.driver.as_ref().map_or(NO_PHONE, Driver::phone)
    }

    /// An independent copy of this route arriving at `arrival` on `dock`.
    ///
    /// The gate becomes the dock's canonical label and the departure moves
    /// with the arrival so the stay keeps its length.
    pub fn relocated(&self, arrival: Instant, dock: DockKey) -> Route {
        Route {
            id: self.id.clone(),
            reference: self.reference.clone(),
            gate: dock.as_str().to_owned(),
            dock,
            planned_arrival: arrival,
            planned_departure: arrival.saturating_add(self.duration()),
            driver: self.driver.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_slot_core::clock::{minutes, parse_timestamp};

    fn at(s: &str) -> Instant {
        parse_timestamp(s).unwrap()
    }

    fn route() -> Route {
        Route::new(
            "A",
            "REF-1",
            "Dock 2 - North",
            at("2024-01-01T10:00:00"),
            at("2024-01-01T10:45:00"),
        )
    }

    #[test]
    fn test_dock_is_derived_from_gate() {
        let r = route();
        assert_eq!(r.gate(), "Dock 2 - North");
        assert_eq!(r.dock().as_str(), "Dock 2");
        assert_eq!(r.duration(), minutes(45));
    }

    #[test]
    fn test_departure_is_clamped() {
        let r = Route::new(
            "B",
            "",
            "Dock 1",
            at("2024-01-01T10:00:00"),
            at("2024-01-01T09:00:00"),
        );
        assert_eq!(r.planned_departure(), r.planned_arrival());
        assert!(r.stay().is_empty());
        assert_eq!(r.label(), "B");
    }

    #[test]
    fn test_driver_defaults() {
        let r = route();
        assert_eq!(r.driver_name(), UNKNOWN_DRIVER);
        assert_eq!(r.driver_phone(), NO_PHONE);

        let partial = Driver {
            name: Some(DriverName {
                first: Some("Ada".into()),
                last: None,
            }),
            phone: Some(DriverPhone { formatted: None }),
        };
        let r = route().with_driver(partial);
        assert_eq!(r.driver_name(), "Ada");
        assert_eq!(r.driver_phone(), NO_PHONE);
        assert_eq!(r.driver().map(Driver::last_name), Some(""));
    }

    #[test]
    fn test_driver_deserializes_with_gaps() {
        let d: Driver = serde_json::from_str(r#"{"name":{"last":"Lovelace"}}"#).unwrap();
        assert_eq!(d.display_name(), "Lovelace");
        assert_eq!(d.phone(), NO_PHONE);

        let d: Driver = serde_json::from_str(
            r#"{"name":{"first":"Ada","last":"Lovelace"},"phone":{"formatted":"+31 20 123"}}"#,
        )
        .unwrap();
        assert_eq!(d.display_name(), "Ada Lovelace");
        assert_eq!(d.phone(), "+31 20 123");
    }

    #[test]
    fn test_relocated_is_independent_copy() {
        let original = route();
        let moved = original.relocated(at("2024-01-01T12:00:00"), DockKey::numbered(4));
        assert_eq!(moved.id(), original.id());
        assert_eq!(moved.gate(), "Dock 4");
        assert_eq!(moved.dock(), &DockKey::numbered(4));
        assert_eq!(moved.planned_arrival(), at("2024-01-01T12:00:00"));
        assert_eq!(moved.planned_departure(), at("2024-01-01T12:45:00"));
        assert_eq!(original.gate(), "Dock 2 - North");
        assert_eq!(original.planned_arrival(), at("2024-01-01T10:00:00"));
    }
}
