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

//! # Dock Slot Model (`dock-slot-model`)
//!
//! The data model of the dock slot finder, built on the time primitives of
//! `dock-slot-core`.
//!
//! ## Key Data Structures
//!
//! - **`RouteId`**: the opaque identifier of a delivery route.
//! - **`DockKey`**: the canonical name of a loading dock, produced by
//!   [`dock::normalize`] from whatever gate label the route carries.
//! - **`DockUniverse`**: the docks an operator has configured (`Dock 1..N`)
//!   together with any other dock discovered in the data.
//! - **`Route`**: one delivery bound to a dock and a planned
//!   arrival/departure. Optional input fields are resolved to documented
//!   defaults when the route is loaded.
//! - **`RouteLoader`**: turns operator supplied JSON into routes, reporting
//!   hard errors through [`err::LoadError`] and soft issues through
//!   [`err::LoadNotice`].
//! - **`RouteGenerator`**: seeded synthetic route sets for benchmarks and
//!   tests.

pub mod dock;
pub mod err;
pub mod generator;
pub mod id;
pub mod loader;
pub mod route;

pub mod prelude {
    pub use crate::dock::{DockUniverse, is_canonical, normalize};
    pub use crate::err::{LoadError, LoadNotice, TimestampField};
    pub use crate::generator::{RouteGenConfig, RouteGenConfigBuilder, RouteGenerator};
    pub use crate::id::{DockKey, RouteId};
    pub use crate::loader::{LoadOutcome, RouteLoader};
    pub use crate::route::{Driver, DriverName, DriverPhone, Route};
}
