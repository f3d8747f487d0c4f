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

//! # Time Types
//!
//! - `TimePoint<T>`: an instant on the scheduling clock.
//! - `TimeDelta<T>`: a signed distance between two instants.
//! - `TimeInterval<T>`: a half-open `[start, end)` window of time points.
//!
//! Arithmetic operators panic on overflow with a message naming the
//! operation; `checked_*` and `saturating_*` variants exist for callers that
//! must not panic.

use crate::primitives::Interval;
use num_traits::{PrimInt, Signed};
use serde::Serialize;
use std::{
    fmt::Display,
    ops::{Add, Mul, Neg, Sub},
};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimePoint<T: PrimInt>(T);

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimeDelta<T: PrimInt + Signed>(T);

pub type TimeInterval<T> = Interval<TimePoint<T>>;

impl<T: PrimInt> TimePoint<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        TimePoint(value)
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }
}

impl<T: PrimInt + Signed> TimePoint<T> {
    #[inline]
    pub fn checked_add(self, delta: TimeDelta<T>) -> Option<Self> {
        self.0.checked_add(&delta.0).map(TimePoint)
    }

    #[inline]
    pub fn checked_sub(self, delta: TimeDelta<T>) -> Option<Self> {
        self.0.checked_sub(&delta.0).map(TimePoint)
    }

    #[inline]
    pub fn saturating_add(self, delta: TimeDelta<T>) -> Self {
        TimePoint(self.0.saturating_add(delta.0))
    }

    #[inline]
    pub fn saturating_sub(self, delta: TimeDelta<T>) -> Self {
        TimePoint(self.0.saturating_sub(delta.0))
    }
}

impl<T: PrimInt + Signed> TimeDelta<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        TimeDelta(value)
    }

    #[inline]
    pub fn zero() -> Self {
        TimeDelta(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Self {
        TimeDelta(self.0.abs())
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_positive()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn checked_mul(self, rhs: T) -> Option<Self> {
        self.0.checked_mul(&rhs).map(TimeDelta)
    }
}

impl<T: PrimInt + Signed> Default for TimeDelta<T> {
    #[inline]
    fn default() -> Self {
        TimeDelta::zero()
    }
}

impl<T: PrimInt + Display> Display for TimePoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimePoint({})", self.0)
    }
}

impl<T: PrimInt + Signed + Display> Display for TimeDelta<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeDelta({})", self.0)
    }
}

impl<T: PrimInt> From<T> for TimePoint<T> {
    #[inline]
    fn from(v: T) -> Self {
        TimePoint(v)
    }
}

impl<T: PrimInt + Signed> From<T> for TimeDelta<T> {
    #[inline]
    fn from(v: T) -> Self {
        TimeDelta(v)
    }
}

impl<T: PrimInt + Signed> Add<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn add(self, rhs: TimeDelta<T>) -> Self::Output {
        self.checked_add(rhs)
            .expect("overflow in TimePoint + TimeDelta")
    }
}

impl<T: PrimInt + Signed> Sub<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn sub(self, rhs: TimeDelta<T>) -> Self::Output {
        self.checked_sub(rhs)
            .expect("underflow in TimePoint - TimeDelta")
    }
}

impl<T: PrimInt + Signed> Sub<TimePoint<T>> for TimePoint<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn sub(self, rhs: TimePoint<T>) -> Self::Output {
        TimeDelta(
            self.0
                .checked_sub(&rhs.0)
                .expect("underflow in TimePoint - TimePoint"),
        )
    }
}

impl<T: PrimInt + Signed> Add for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        TimeDelta(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in TimeDelta + TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Sub for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta(
            self.0
                .checked_sub(&rhs.0)
                .expect("underflow in TimeDelta - TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Neg for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn neg(self) -> Self::Output {
        TimeDelta(
            T::zero()
                .checked_sub(&self.0)
                .expect("underflow in -TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Mul<T> for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        self.checked_mul(rhs)
            .expect("overflow in TimeDelta * scalar")
    }
}

impl<T: PrimInt + Signed> Interval<TimePoint<T>> {
    #[inline]
    pub fn duration(&self) -> TimeDelta<T> {
        self.end() - self.start()
    }

    /// Widens the window by `margin` on both sides, clamping at the numeric
    /// range instead of panicking.
    #[inline]
    pub fn saturating_inflate(&self, margin: TimeDelta<T>) -> Self {
        Interval::new(
            self.start().saturating_sub(margin),
            self.end().saturating_add(margin),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_plus_delta() {
        assert_eq!(TimePoint::new(10) + TimeDelta::new(5), TimePoint::new(15));
        assert_eq!(TimePoint::new(10) - TimeDelta::new(5), TimePoint::new(5));
    }

    #[test]
    fn test_point_minus_point_is_delta() {
        assert_eq!(TimePoint::new(3) - TimePoint::new(10), TimeDelta::new(-7));
    }

    #[test]
    fn test_delta_sign_helpers() {
        assert!(TimeDelta::new(-1).is_negative());
        assert!(TimeDelta::new(1).is_positive());
        assert!(TimeDelta::<i64>::zero().is_zero());
        assert_eq!(TimeDelta::new(-9).abs(), TimeDelta::new(9));
        assert_eq!(-TimeDelta::new(4), TimeDelta::new(-4));
    }

    #[test]
    fn test_delta_scaling() {
        assert_eq!(TimeDelta::new(1800) * -6, TimeDelta::new(-10800));
        assert_eq!(TimeDelta::new(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_checked_and_saturating() {
        let top = TimePoint::new(i32::MAX);
        assert_eq!(top.checked_add(TimeDelta::new(1)), None);
        assert_eq!(top.saturating_add(TimeDelta::new(1)), top);
        let bottom = TimePoint::new(i32::MIN);
        assert_eq!(bottom.checked_sub(TimeDelta::new(1)), None);
        assert_eq!(bottom.saturating_sub(TimeDelta::new(1)), bottom);
    }

    #[test]
    fn test_saturating_inflate() {
        let iv: TimeInterval<i64> = Interval::new(TimePoint::new(100), TimePoint::new(200));
        let wide = iv.saturating_inflate(TimeDelta::new(10));
        assert_eq!(wide.start(), TimePoint::new(90));
        assert_eq!(wide.end(), TimePoint::new(210));

        let edge: TimeInterval<i64> = Interval::new(TimePoint::new(i64::MIN), TimePoint::new(0));
        assert_eq!(
            edge.saturating_inflate(TimeDelta::new(1)).start(),
            TimePoint::new(i64::MIN)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TimePoint::new(42)), "TimePoint(42)");
        assert_eq!(format!("{}", TimeDelta::new(-3)), "TimeDelta(-3)");
    }

    #[test]
    #[should_panic(expected = "overflow in TimePoint + TimeDelta")]
    fn test_add_panics_on_overflow() {
        let _ = TimePoint::new(i64::MAX) + TimeDelta::new(1);
    }

    #[test]
    #[should_panic(expected = "underflow in TimePoint - TimePoint")]
    fn test_point_difference_panics_on_underflow() {
        let _ = TimePoint::new(i64::MIN) - TimePoint::new(1);
    }
}
