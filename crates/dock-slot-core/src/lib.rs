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

//! # Dock Slot Core (`dock-slot-core`)
//!
//! Typed time primitives shared by the dock slot model and engine.
//!
//! - [`time::TimePoint`] and [`time::TimeDelta`] keep instants and durations
//!   apart at compile time, so a point can be shifted by a delta but two
//!   points can never be added.
//! - [`primitives::Interval`] is the half-open `[start, end)` interval every
//!   busy window in the engine is built from.
//! - [`clock`] bridges wall-clock timestamps (`chrono`) and the integer
//!   seconds the engine computes with.

pub mod clock;
pub mod primitives;
pub mod time;

pub mod prelude {
    pub use crate::clock::{Instant, Span};
    pub use crate::primitives::Interval;
    pub use crate::time::{TimeDelta, TimeInterval, TimePoint};
}
