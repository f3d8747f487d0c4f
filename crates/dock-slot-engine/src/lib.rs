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

//! # Dock Slot Engine (`dock-slot-engine`)
//!
//! The availability engine and the in-memory state around it.
//!
//! 1. [`index::BusyIndex`] groups routes by canonical dock into raw busy
//!    windows.
//! 2. [`probe`] evaluates a fixed fan of candidate times around a route's
//!    arrival and reports, per candidate, which docks are free under a
//!    safety margin applied to both sides of every busy window.
//! 3. [`ledger::RelocationLedger`] records speculative moves without touching
//!    the loaded routes.
//! 4. [`projector`] merges routes and moves into one per-dock timeline.
//! 5. [`session::SchedulingSession`] owns routes, moves and configuration and
//!    is the value a front end drives.
//!
//! Everything is synchronous and recomputed from scratch on each call.

pub mod config;
pub mod index;
pub mod ledger;
pub mod probe;
pub mod projector;
pub mod session;

pub mod prelude {
    pub use crate::config::{ConfigBuildError, SessionConfig, SessionConfigBuilder};
    pub use crate::index::{BusyIndex, BusyInterval};
    pub use crate::ledger::{RelocationLedger, RelocationRecord, with_occurrence};
    pub use crate::probe::{
        AvailabilitySlot, DockSlot, PastSlotPolicy, ProbeConfig, SlotOffer, candidate_times,
        group_by_dock, is_dock_free, probe, probe_dock, rank_offers,
    };
    pub use crate::projector::{ProjectionMode, Schedule, ScheduleEntry, project};
    pub use crate::session::{Analysis, LoadSummary, SchedulingSession, SessionError};
}
