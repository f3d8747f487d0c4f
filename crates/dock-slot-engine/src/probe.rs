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

//! # Availability Prober
//!
//! Answers "which docks are free around this route's arrival?" by evaluating
//! a fixed fan of candidate start times `original + k * step` for
//! `k = -radius..=radius` against a [`BusyIndex`].
//!
//! A dock is busy at `t` when some busy window `[s, e)` satisfies
//! `s - margin <= t < e + margin`. The margin widens both sides of every
//! window; the start stays inclusive and the end exclusive, so with a zero
//! margin a slot may begin exactly when the previous stay ends.
//!
//! ```
//! use dock_slot_core::clock::{minutes, parse_timestamp};
//! use dock_slot_engine::prelude::*;
//! use dock_slot_model::prelude::*;
//!
//! let t = |s: &str| parse_timestamp(s).unwrap();
//! let routes = vec![Route::new(
//!     "A", "A", "Dock 1", t("2024-01-01T10:00:00"), t("2024-01-01T10:30:00"),
//! )];
//! let index = BusyIndex::build(&routes, &DockUniverse::fixed(2));
//! let slots = probe(&index, t("2024-01-01T10:00:00"), minutes(5), &ProbeConfig::default());
//!
//! assert_eq!(slots.len(), 13);
//! let at_ten = &slots[6];
//! assert_eq!(at_ten.free_docks(), &[DockKey::numbered(2)]);
//! ```

use crate::index::{BusyIndex, BusyInterval};
use dock_slot_core::clock::minutes;
use dock_slot_core::prelude::*;
use dock_slot_model::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// What to do with candidates that lie before a reference time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PastSlotPolicy {
    #[default]
    KeepAll,
    /// Drops candidates with `t < now`.
    DropBefore(Instant),
}

impl PastSlotPolicy {
    #[inline]
    pub fn admits(&self, t: Instant) -> bool {
        match self {
            PastSlotPolicy::KeepAll => true,
            PastSlotPolicy::DropBefore(now) => t >= *now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeConfig {
    pub(crate) step: Span,
    pub(crate) radius: u32,
    pub(crate) past: PastSlotPolicy,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            step: minutes(30),
            radius: 6,
            past: PastSlotPolicy::KeepAll,
        }
    }
}

impl ProbeConfig {
    /// # Panics
    ///
    /// Panics if `step` is not positive.
    #[inline]
    pub fn new(step: Span, radius: u32) -> Self {
        assert!(step.is_positive(), "probe step must be positive");
        Self {
            step,
            radius,
            past: PastSlotPolicy::KeepAll,
        }
    }

    #[inline]
    pub fn with_past(mut self, past: PastSlotPolicy) -> Self {
        self.past = past;
        self
    }

    #[inline]
    pub fn step(&self) -> Span {
        self.step
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    #[inline]
    pub fn past(&self) -> PastSlotPolicy {
        self.past
    }
}

/// One candidate time and the docks free at it, in dock order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilitySlot {
    time: Instant,
    free_docks: Vec<DockKey>,
}

impl AvailabilitySlot {
    #[inline]
    pub fn time(&self) -> Instant {
        self.time
    }

    #[inline]
    pub fn free_docks(&self) -> &[DockKey] {
        &self.free_docks
    }

    #[inline]
    pub fn is_free(&self, dock: &DockKey) -> bool {
        self.free_docks.contains(dock)
    }
}

/// Availability of a single dock at one candidate time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DockSlot {
    time: Instant,
    available: bool,
}

impl DockSlot {
    #[inline]
    pub fn time(&self) -> Instant {
        self.time
    }

    #[inline]
    pub fn available(&self) -> bool {
        self.available
    }
}

/// A free `(dock, time)` pair and its distance from the original arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotOffer {
    dock: DockKey,
    time: Instant,
    offset: Span,
}

impl SlotOffer {
    #[inline]
    pub fn dock(&self) -> &DockKey {
        &self.dock
    }

    #[inline]
    pub fn time(&self) -> Instant {
        self.time
    }

    /// `time - original`; negative for earlier slots.
    #[inline]
    pub fn offset(&self) -> Span {
        self.offset
    }
}

/// Candidate times around `original`, strictly ascending.
///
/// Candidates that would leave the representable range are skipped.
pub fn candidate_times(original: Instant, config: &ProbeConfig) -> Vec<Instant> {
    let r = i64::from(config.radius);
    (-r..=r)
        .filter_map(|k| {
            config
                .step
                .checked_mul(k)
                .and_then(|d| original.checked_add(d))
        })
        .collect()
}

/// Whether a slot starting at `t` clears every interval by `margin`.
///
/// A negative margin is treated as zero.
#[inline]
pub fn is_dock_free(intervals: &[BusyInterval], t: Instant, margin: Span) -> bool {
    let margin = margin.max(Span::zero());
    !intervals.iter().any(|b| b.blocks(t, margin))
}

/// Probes every dock of `index` at each candidate time around `original`.
#[instrument(
    level = "debug",
    skip_all,
    fields(original = original.value(), margin = margin.value())
)]
pub fn probe(
    index: &BusyIndex,
    original: Instant,
    margin: Span,
    config: &ProbeConfig,
) -> Vec<AvailabilitySlot> {
    let mut slots: Vec<AvailabilitySlot> = candidate_times(original, config)
        .into_iter()
        .filter(|&t| config.past.admits(t))
        .map(|time| AvailabilitySlot {
            time,
            free_docks: index
                .iter()
                .filter(|(_, intervals)| is_dock_free(intervals, time, margin))
                .map(|(dock, _)| dock.clone())
                .collect(),
        })
        .collect();
    slots.sort_by_key(AvailabilitySlot::time);

    debug!(
        candidates = slots.len(),
        free = slots.iter().map(|s| s.free_docks.len()).sum::<usize>(),
        "Probe finished"
    );
    slots
}

/// [`probe`] restricted to one dock.
pub fn probe_dock(
    index: &BusyIndex,
    dock: &DockKey,
    original: Instant,
    margin: Span,
    config: &ProbeConfig,
) -> Vec<DockSlot> {
    let intervals = index.intervals(dock);
    let mut slots: Vec<DockSlot> = candidate_times(original, config)
        .into_iter()
        .filter(|&t| config.past.admits(t))
        .map(|time| DockSlot {
            time,
            available: is_dock_free(intervals, time, margin),
        })
        .collect();
    slots.sort_by_key(DockSlot::time);
    slots
}

/// Flattens `slots` into offers, closest to `original` first.
///
/// Ties on distance go to the earlier time, then to the lower dock.
pub fn rank_offers(slots: &[AvailabilitySlot], original: Instant) -> Vec<SlotOffer> {
    let mut offers: Vec<SlotOffer> = slots
        .iter()
        .flat_map(|slot| {
            slot.free_docks.iter().map(move |dock| SlotOffer {
                dock: dock.clone(),
                time: slot.time,
                offset: slot.time - original,
            })
        })
        .collect();
    offers.sort_by(|a, b| {
        a.offset
            .abs()
            .cmp(&b.offset.abs())
            .then(a.time.cmp(&b.time))
            .then_with(|| a.dock.cmp(&b.dock))
    });
    offers
}

/// Free times per dock. Docks that are never free are absent.
pub fn group_by_dock(slots: &[AvailabilitySlot]) -> BTreeMap<DockKey, Vec<Instant>> {
    let mut groups: BTreeMap<DockKey, Vec<Instant>> = BTreeMap::new();
    for slot in slots {
        for dock in &slot.free_docks {
            groups.entry(dock.clone()).or_default().push(slot.time);
        }
    }
    groups
}
