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

//! # Dock Identity
//!
//! Gate labels arrive as free text ("Dock 2 - North Wing", "Dock 3 (cold)").
//! [`normalize`] reduces them to a canonical [`DockKey`] by searching for
//! `Dock <digits>` **anywhere** in the label. Matching only a prefix would
//! misfile labels such as "North Dock 2", so the substring search is the
//! single policy used throughout the workspace.
//!
//! Labels without a match are kept (trimmed) as their own key. Such docks are
//! never dropped: they stay visible to the operator as docks nobody
//! configured.

use crate::id::DockKey;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

pub(crate) const DOCK_PREFIX: &str = "Dock ";

static DOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Dock [0-9]+").expect("dock pattern is a valid regex"));

static CANONICAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Dock [0-9]+$").expect("canonical pattern is a valid regex"));

/// Maps a raw gate label to its canonical dock key.
///
/// Total and idempotent: `normalize(normalize(x).as_str()) == normalize(x)`.
///
/// ```
/// use dock_slot_model::dock::normalize;
///
/// assert_eq!(normalize("Dock 2 - North Wing").as_str(), "Dock 2");
/// assert_eq!(normalize("North Dock 4").as_str(), "Dock 4");
/// assert_eq!(normalize("  Yard B ").as_str(), "Yard B");
/// ```
pub fn normalize(raw: &str) -> DockKey {
    match DOCK_PATTERN.find(raw) {
        Some(m) => DockKey::from_canonical(m.as_str().to_owned()),
        None => DockKey::from_canonical(raw.trim().to_owned()),
    }
}

/// Whether `key` is exactly of the form `Dock <digits>`.
#[inline]
pub fn is_canonical(key: &str) -> bool {
    CANONICAL_PATTERN.is_match(key)
}

/// The set of docks the engine reports on.
///
/// The fixed part is `Dock 1..=N` for a configured `N`; every other dock met
/// in the data is added as discovered. Iteration follows [`DockKey`]'s
/// ordering, i.e. numbered docks first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockUniverse {
    fixed: u32,
    docks: BTreeSet<DockKey>,
}

impl Default for DockUniverse {
    fn default() -> Self {
        Self::fixed(4)
    }
}

impl DockUniverse {
    pub fn fixed(count: u32) -> Self {
        Self {
            fixed: count,
            docks: (1..=count).map(DockKey::numbered).collect(),
        }
    }

    /// Number of configured docks.
    #[inline]
    pub fn fixed_count(&self) -> u32 {
        self.fixed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.docks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docks.is_empty()
    }

    #[inline]
    pub fn contains(&self, dock: &DockKey) -> bool {
        self.docks.contains(dock)
    }

    /// Whether `dock` is one of the configured `Dock 1..=N`.
    #[inline]
    pub fn is_configured(&self, dock: &DockKey) -> bool {
        is_canonical(dock.as_str())
            && dock
                .number()
                .is_some_and(|n| (1..=self.fixed).contains(&n) && *dock == DockKey::numbered(n))
    }

    /// Adds a dock found in the data. Returns `true` if it was not yet known.
    #[inline]
    pub fn discover(&mut self, dock: DockKey) -> bool {
        self.docks.insert(dock)
    }

    pub fn discovered(&self) -> impl Iterator<Item = &DockKey> + '_ {
        self.docks.iter().filter(|d| !self.is_configured(d))
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DockKey> + '_ {
        self.docks.iter()
    }

    /// Forgets all discovered docks, keeping the configured ones.
    pub fn reset(&mut self) {
        *self = Self::fixed(self.fixed);
    }
}
