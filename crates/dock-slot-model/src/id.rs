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

use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        RouteId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl From<&str> for RouteId {
    fn from(value: &str) -> Self {
        RouteId::new(value)
    }
}

impl From<String> for RouteId {
    fn from(value: String) -> Self {
        RouteId(value)
    }
}

/// Canonical dock name.
///
/// Keys of the form `Dock <n>` order numerically by `n` and come before
/// every other label, which orders lexically. Equality is plain string
/// equality. Build keys from raw gate labels with [`crate::dock::normalize`].
#[derive(Debug, Clone)]
pub struct DockKey {
    label: String,
    number: Option<u32>,
}

impl DockKey {
    pub(crate) fn from_canonical(label: String) -> Self {
        let number = label
            .strip_prefix(crate::dock::DOCK_PREFIX)
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok());
        Self { label, number }
    }

    /// The `n`-th numbered dock, `Dock n`.
    #[inline]
    pub fn numbered(n: u32) -> Self {
        Self {
            label: format!("{}{n}", crate::dock::DOCK_PREFIX),
            number: Some(n),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.label
    }

    /// The dock number for `Dock <n>` keys.
    #[inline]
    pub fn number(&self) -> Option<u32> {
        self.number
    }
}

impl PartialEq for DockKey {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for DockKey {}

impl Hash for DockKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl Ord for DockKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.label.cmp(&other.label)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(&other.label),
        }
    }
}

impl PartialOrd for DockKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for DockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for DockKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_id_display_and_conversion() {
        let id: RouteId = "R-17".into();
        assert_eq!(id.as_str(), "R-17");
        assert_eq!(format!("{id}"), "RouteId(R-17)");
    }

    #[test]
    fn test_numbered_docks_order_numerically() {
        let mut keys = vec![
            DockKey::numbered(10),
            DockKey::from_canonical("Yard".into()),
            DockKey::numbered(2),
            DockKey::from_canonical("Annex".into()),
        ];
        keys.sort();
        let labels: Vec<&str> = keys.iter().map(DockKey::as_str).collect();
        assert_eq!(labels, vec!["Dock 2", "Dock 10", "Annex", "Yard"]);
    }

    #[test]
    fn test_equality_follows_label() {
        assert_eq!(DockKey::numbered(3), DockKey::from_canonical("Dock 3".into()));
        assert_ne!(DockKey::numbered(1), DockKey::from_canonical("Dock 01".into()));
        assert_eq!(DockKey::from_canonical("Dock 01".into()).number(), Some(1));
    }

    #[test]
    fn test_dock_key_serializes_as_string() {
        let json = serde_json::to_string(&DockKey::numbered(4)).unwrap();
        assert_eq!(json, "\"Dock 4\"");
    }
}
