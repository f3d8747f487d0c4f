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

use crate::probe::{PastSlotPolicy, ProbeConfig};
use crate::projector::ProjectionMode;
use dock_slot_core::clock::minutes;
use dock_slot_core::prelude::*;
use std::fmt::Display;

/// Settings of a [`crate::session::SchedulingSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub(crate) margin: Span,
    pub(crate) dock_count: u32,
    pub(crate) probe: ProbeConfig,
    pub(crate) default_duration: Span,
    pub(crate) projection: ProjectionMode,
    pub(crate) probe_relocations: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            margin: minutes(5),
            dock_count: 4,
            probe: ProbeConfig::default(),
            default_duration: minutes(30),
            projection: ProjectionMode::default(),
            probe_relocations: true,
        }
    }
}

impl SessionConfig {
    #[inline]
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }

    /// Safety margin applied to both sides of every busy window.
    #[inline]
    pub fn margin(&self) -> Span {
        self.margin
    }

    /// Size of the fixed dock set `Dock 1..=N`. Zero means only docks found
    /// in the data are reported.
    #[inline]
    pub fn dock_count(&self) -> u32 {
        self.dock_count
    }

    #[inline]
    pub fn probe(&self) -> &ProbeConfig {
        &self.probe
    }

    /// Stay length assumed for routes without a departure.
    #[inline]
    pub fn default_duration(&self) -> Span {
        self.default_duration
    }

    #[inline]
    pub fn projection(&self) -> ProjectionMode {
        self.projection
    }

    /// Whether probing sees relocated routes at their new slot.
    #[inline]
    pub fn probe_relocations(&self) -> bool {
        self.probe_relocations
    }
}

impl Display for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SessionConfig {{ margin: {}s, docks: {}, step: {}s, radius: {}, default_duration: {}s, projection: {:?}, probe_relocations: {} }}",
            self.margin.value(),
            self.dock_count,
            self.probe.step().value(),
            self.probe.radius(),
            self.default_duration.value(),
            self.projection,
            self.probe_relocations
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigBuildError {
    NegativeMargin(Span),
    NonPositiveStep(Span),
    NonPositiveDefaultDuration(Span),
}

impl Display for ConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ConfigBuildError::*;
        match self {
            NegativeMargin(m) => write!(f, "margin must not be negative, got {}s", m.value()),
            NonPositiveStep(s) => write!(f, "probe step must be positive, got {}s", s.value()),
            NonPositiveDefaultDuration(d) => {
                write!(f, "default duration must be positive, got {}s", d.value())
            }
        }
    }
}

impl std::error::Error for ConfigBuildError {}

/// Builder for `SessionConfig`. Starts from the defaults.
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn margin(mut self, v: Span) -> Self {
        self.config.margin = v;
        self
    }

    /// Margin in whole minutes, as an operator would enter it.
    #[inline]
    pub fn margin_minutes(self, m: i64) -> Self {
        self.margin(minutes(m))
    }

    #[inline]
    pub fn dock_count(mut self, v: u32) -> Self {
        self.config.dock_count = v;
        self
    }

    #[inline]
    pub fn probe(mut self, v: ProbeConfig) -> Self {
        self.config.probe = v;
        self
    }

    #[inline]
    pub fn step(mut self, v: Span) -> Self {
        self.config.probe.step = v;
        self
    }

    #[inline]
    pub fn radius(mut self, v: u32) -> Self {
        self.config.probe.radius = v;
        self
    }

    #[inline]
    pub fn past(mut self, v: PastSlotPolicy) -> Self {
        self.config.probe.past = v;
        self
    }

    #[inline]
    pub fn default_duration(mut self, v: Span) -> Self {
        self.config.default_duration = v;
        self
    }

    #[inline]
    pub fn projection(mut self, v: ProjectionMode) -> Self {
        self.config.projection = v;
        self
    }

    #[inline]
    pub fn probe_relocations(mut self, v: bool) -> Self {
        self.config.probe_relocations = v;
        self
    }

    pub fn build(self) -> Result<SessionConfig, ConfigBuildError> {
        let c = self.config;
        if c.margin.is_negative() {
            return Err(ConfigBuildError::NegativeMargin(c.margin));
        }
        if !c.probe.step.is_positive() {
            return Err(ConfigBuildError::NonPositiveStep(c.probe.step));
        }
        if !c.default_duration.is_positive() {
            return Err(ConfigBuildError::NonPositiveDefaultDuration(
                c.default_duration,
            ));
        }
        Ok(c)
    }
}
