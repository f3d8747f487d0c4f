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

//! # Core Primitives
//!
//! Generic building blocks that are not tied to a particular unit.
//! Today this is the half-open [`Interval`], which the engine uses for busy
//! windows and which [`crate::time`] specialises for time points.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A half-open interval `[start, end)`.
///
/// A value `x` lies inside the interval when `start <= x < end`. The start
/// bound therefore belongs to the interval while the end bound does not,
/// which lets two back-to-back intervals share a boundary without
/// overlapping.
///
/// # Examples
///
/// ```
/// use dock_slot_core::primitives::Interval;
///
/// let iv = Interval::new(10, 20);
/// assert!(iv.contains(10));
/// assert!(iv.contains(19));
/// assert!(!iv.contains(20));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T> Interval<T> {
    /// Creates the interval spanned by `a` and `b`.
    ///
    /// The bounds are ordered, so `Interval::new(5, 3)` is the same interval
    /// as `Interval::new(3, 5)`.
    ///
    /// # Panics
    ///
    /// Panics if the two bounds cannot be compared.
    ///
    /// # Examples
    ///
    /// ```
    /// use dock_slot_core::primitives::Interval;
    ///
    /// let iv = Interval::new(5, 3);
    /// assert_eq!(iv.start(), 3);
    /// assert_eq!(iv.end(), 5);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        match a
            .partial_cmp(&b)
            .expect("Interval::new: bounds are not comparable")
        {
            Ordering::Greater => Self { start: b, end: a },
            _ => Self { start: a, end: b },
        }
    }

    /// The inclusive lower bound.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start
    }

    /// The exclusive upper bound.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end
    }

    /// Returns `true` when the interval covers no value at all.
    ///
    /// ```
    /// use dock_slot_core::primitives::Interval;
    ///
    /// assert!(Interval::new(4, 4).is_empty());
    /// assert!(!Interval::new(4, 5).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start == self.end
    }

    /// Checks whether `x` lies in `[start, end)`.
    ///
    /// ```
    /// use dock_slot_core::primitives::Interval;
    ///
    /// let iv = Interval::new(1, 5);
    /// assert!(iv.contains(1));
    /// assert!(!iv.contains(5));
    /// assert!(!iv.contains(0));
    /// ```
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        self.start <= x && x < self.end
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_bounds() {
        let iv = Interval::new(9, 2);
        assert_eq!(iv.start(), 2);
        assert_eq!(iv.end(), 9);
    }

    #[test]
    fn test_contains_is_start_inclusive_end_exclusive() {
        let iv = Interval::new(0, 3);
        assert!(iv.contains(0));
        assert!(iv.contains(2));
        assert!(!iv.contains(3));
        assert!(!iv.contains(-1));
    }

    #[test]
    fn test_empty_interval_contains_nothing() {
        let iv = Interval::new(7, 7);
        assert!(iv.is_empty());
        assert!(!iv.contains(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Interval::new(1, 4)), "[1, 4)");
    }
}
