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

use dock_slot_core::clock::{Instant, Span, hours, minutes, parse_timestamp};
use std::fmt::Display;

/// Configuration for synthetic route sets.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGenConfig {
    pub(crate) route_count: usize,
    pub(crate) dock_count: u32,
    pub(crate) day_start: Instant,
    pub(crate) day_length: Span,
    pub(crate) grid: Span,
    pub(crate) min_stay: Span,
    pub(crate) max_stay: Span,
    pub(crate) decorated_gate_ratio: f64,
    pub(crate) stray_gate_ratio: f64,
    pub(crate) driver_ratio: f64,
    pub(crate) departure_ratio: f64,
    pub(crate) seed: u64,
}

impl Default for RouteGenConfig {
    fn default() -> Self {
        Self {
            route_count: 60,
            dock_count: 4,
            day_start: parse_timestamp("2024-01-01T05:00:00")
                .expect("default day start is a valid timestamp"),
            day_length: hours(16),
            grid: minutes(5),
            min_stay: minutes(20),
            max_stay: minutes(90),
            decorated_gate_ratio: 0.3,
            stray_gate_ratio: 0.05,
            driver_ratio: 0.8,
            departure_ratio: 0.9,
            seed: 42,
        }
    }
}

impl RouteGenConfig {
    #[inline]
    pub fn route_count(&self) -> usize {
        self.route_count
    }
    #[inline]
    pub fn dock_count(&self) -> u32 {
        self.dock_count
    }
    #[inline]
    pub fn day_start(&self) -> Instant {
        self.day_start
    }
    #[inline]
    pub fn day_length(&self) -> Span {
        self.day_length
    }
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Display for RouteGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RouteGenConfig {{ route_count: {}, dock_count: {}, day_start: {}, day_length: {}, \
             grid: {}, min_stay: {}, max_stay: {}, decorated_gate_ratio: {:.2}, \
             stray_gate_ratio: {:.2}, driver_ratio: {:.2}, departure_ratio: {:.2}, seed: {} }}",
            self.route_count,
            self.dock_count,
            self.day_start,
            self.day_length,
            self.grid,
            self.min_stay,
            self.max_stay,
            self.decorated_gate_ratio,
            self.stray_gate_ratio,
            self.driver_ratio,
            self.departure_ratio,
            self.seed
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteGenConfigBuildError {
    NoDocks,
    NonPositiveDay,
    NonPositiveGrid,
    InvalidStayRange { min: Span, max: Span },
    RatioOutOfRange { name: &'static str, value: f64 },
}

impl Display for RouteGenConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RouteGenConfigBuildError::*;
        match self {
            NoDocks => write!(f, "dock_count must be at least 1"),
            NonPositiveDay => write!(f, "day_length must be positive"),
            NonPositiveGrid => write!(f, "grid must be positive"),
            InvalidStayRange { min, max } => {
                write!(f, "stay range [{min}, {max}] must be positive and ordered")
            }
            RatioOutOfRange { name, value } => write!(f, "{name} = {value} is outside [0, 1]"),
        }
    }
}

impl std::error::Error for RouteGenConfigBuildError {}

/// Builder for `RouteGenConfig`. Starts from the defaults.
#[derive(Debug, Clone, Default)]
pub struct RouteGenConfigBuilder {
    config: RouteGenConfig,
}

impl RouteGenConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn route_count(mut self, v: usize) -> Self {
        self.config.route_count = v;
        self
    }
    #[inline]
    pub fn dock_count(mut self, v: u32) -> Self {
        self.config.dock_count = v;
        self
    }
    #[inline]
    pub fn day_start(mut self, v: Instant) -> Self {
        self.config.day_start = v;
        self
    }
    #[inline]
    pub fn day_length(mut self, v: Span) -> Self {
        self.config.day_length = v;
        self
    }
    #[inline]
    pub fn grid(mut self, v: Span) -> Self {
        self.config.grid = v;
        self
    }
    pub fn stay_range(mut self, min: Span, max: Span) -> Self {
        self.config.min_stay = min;
        self.config.max_stay = max;
        self
    }
    #[inline]
    pub fn decorated_gate_ratio(mut self, v: f64) -> Self {
        self.config.decorated_gate_ratio = v;
        self
    }
    #[inline]
    pub fn stray_gate_ratio(mut self, v: f64) -> Self {
        self.config.stray_gate_ratio = v;
        self
    }
    #[inline]
    pub fn driver_ratio(mut self, v: f64) -> Self {
        self.config.driver_ratio = v;
        self
    }
    #[inline]
    pub fn departure_ratio(mut self, v: f64) -> Self {
        self.config.departure_ratio = v;
        self
    }
    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.config.seed = v;
        self
    }

    pub fn build(self) -> Result<RouteGenConfig, RouteGenConfigBuildError> {
        use RouteGenConfigBuildError::*;
        let c = self.config;
        if c.dock_count == 0 {
            return Err(NoDocks);
        }
        if !c.day_length.is_positive() {
            return Err(NonPositiveDay);
        }
        if !c.grid.is_positive() {
            return Err(NonPositiveGrid);
        }
        if !c.min_stay.is_positive() || c.min_stay > c.max_stay {
            return Err(InvalidStayRange {
                min: c.min_stay,
                max: c.max_stay,
            });
        }
        for (name, value) in [
            ("decorated_gate_ratio", c.decorated_gate_ratio),
            ("stray_gate_ratio", c.stray_gate_ratio),
            ("driver_ratio", c.driver_ratio),
            ("departure_ratio", c.departure_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RatioOutOfRange { name, value });
            }
        }
        Ok(c)
    }
}
