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

use crate::id::{DockKey, RouteId};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampField {
    PlannedArrival,
    PlannedDeparture,
}

impl Display for TimestampField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampField::PlannedArrival => write!(f, "plannedArrival"),
            TimestampField::PlannedDeparture => write!(f, "plannedDeparture"),
        }
    }
}

/// Input that cannot be turned into a route list.
///
/// A failed load never replaces previously loaded routes.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    NotAnArray,
    InvalidRoute {
        index: usize,
        source: serde_json::Error,
    },
    InvalidTimestamp {
        route: RouteId,
        field: TimestampField,
        value: String,
    },
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use LoadError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            Json(e) => write!(f, "invalid JSON: {e}"),
            NotAnArray => write!(f, "expected a JSON array of routes"),
            InvalidRoute { index, source } => write!(f, "route #{index} is malformed: {source}"),
            InvalidTimestamp {
                route,
                field,
                value,
            } => write!(f, "{route} has an unreadable {field}: '{value}'"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
            LoadError::InvalidRoute { source, .. } => Some(source),
            LoadError::NotAnArray | LoadError::InvalidTimestamp { .. } => None,
        }
    }
}

/// Something about an input route that was patched up instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadNotice {
    /// No `plannedDeparture`; the loader's default duration was used.
    MissingDeparture(RouteId),
    /// No `driver`; driver accessors fall back to their defaults.
    MissingDriver(RouteId),
    /// Departure earlier than arrival; departure was set to the arrival.
    DepartureBeforeArrival(RouteId),
    /// The gate does not name one of the configured docks.
    UnknownDock { route: RouteId, dock: DockKey },
    /// Another route earlier in the input has the same id.
    DuplicateRouteId(RouteId),
}

impl LoadNotice {
    #[inline]
    pub fn route(&self) -> &RouteId {
        match self {
            LoadNotice::MissingDeparture(id)
            | LoadNotice::MissingDriver(id)
            | LoadNotice::DepartureBeforeArrival(id)
            | LoadNotice::DuplicateRouteId(id) => id,
            LoadNotice::UnknownDock { route, .. } => route,
        }
    }
}

impl Display for LoadNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use LoadNotice::*;
        match self {
            MissingDeparture(id) => {
                write!(f, "{id} has no plannedDeparture; using default duration")
            }
            MissingDriver(id) => write!(f, "{id} has no driver"),
            DepartureBeforeArrival(id) => {
                write!(f, "{id} departs before it arrives; departure clamped to arrival")
            }
            UnknownDock { route, dock } => write!(f, "{route} uses unconfigured dock '{dock}'"),
            DuplicateRouteId(id) => write!(f, "{id} appears more than once"),
        }
    }
}
