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

//! Seeded synthetic route sets.
//!
//! The same seed always yields the same routes. Gate labels are mixed on
//! purpose: plain `Dock n`, decorated `Dock n - <wing>` and a share of
//! stray labels that match no dock, so generated data walks through every
//! branch of dock normalization.

mod config;

pub use config::{RouteGenConfig, RouteGenConfigBuildError, RouteGenConfigBuilder};

use crate::route::{Driver, DriverName, DriverPhone, Route};
use dock_slot_core::clock::{Instant, Span, format_timestamp};
use dock_slot_core::time::TimeDelta;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{Value, json};

const WINGS: &[&str] = &["North", "South", "East Wing", "Cold Store"];
const STRAY_GATES: &[&str] = &["Yard", "Overflow Lane", "Returns Bay"];
const FIRST_NAMES: &[&str] = &["Anna", "Bram", "Chen", "Daan", "Eva", "Femke"];
const LAST_NAMES: &[&str] = &["de Vries", "Jansen", "Bakker", "Visser", "Smit"];

struct Sample {
    id: String,
    reference: String,
    gate: String,
    arrival: Instant,
    stay: Span,
    with_departure: bool,
    driver: Option<Driver>,
}

pub struct RouteGenerator {
    config: RouteGenConfig,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl From<RouteGenConfig> for RouteGenerator {
    fn from(config: RouteGenConfig) -> Self {
        Self::new(config)
    }
}

impl RouteGenerator {
    pub fn new(config: RouteGenConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            next_id: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &RouteGenConfig {
        &self.config
    }

    /// Routes with every departure present.
    pub fn generate(&mut self) -> Vec<Route> {
        (0..self.config.route_count)
            .map(|_| {
                let s = self.sample();
                let route = Route::new(
                    s.id,
                    s.reference,
                    s.gate,
                    s.arrival,
                    s.arrival.saturating_add(s.stay),
                );
                match s.driver {
                    Some(d) => route.with_driver(d),
                    None => route,
                }
            })
            .collect()
    }

    /// The route feed as JSON, with departures and drivers omitted at the
    /// configured ratios.
    pub fn generate_json(&mut self) -> Value {
        let routes: Vec<Value> = (0..self.config.route_count)
            .map(|_| {
                let s = self.sample();
                let mut obj = json!({
                    "id": s.id,
                    "reference": s.reference,
                    "gate": s.gate,
                    "plannedArrival": format_timestamp(s.arrival),
                });
                if s.with_departure {
                    obj["plannedDeparture"] =
                        Value::String(format_timestamp(s.arrival.saturating_add(s.stay)));
                }
                if let Some(driver) = s.driver {
                    obj["driver"] = json!(driver);
                }
                obj
            })
            .collect();
        Value::Array(routes)
    }

    fn sample(&mut self) -> Sample {
        self.next_id += 1;
        let id = format!("R{:05}", self.next_id);
        let reference = format!("NL-{:04}", self.rng.random_range(1..10_000));
        let gate = self.sample_gate();
        let arrival = self.sample_arrival();
        let stay = self.sample_stay();
        let with_departure = self.rng.random_bool(self.config.departure_ratio);
        let driver = self
            .rng
            .random_bool(self.config.driver_ratio)
            .then(|| self.sample_driver());
        Sample {
            id,
            reference,
            gate,
            arrival,
            stay,
            with_departure,
            driver,
        }
    }

    fn sample_gate(&mut self) -> String {
        if self.rng.random_bool(self.config.stray_gate_ratio) {
            return STRAY_GATES[self.rng.random_range(0..STRAY_GATES.len())].to_owned();
        }
        let n = self.rng.random_range(1..=self.config.dock_count);
        if self.rng.random_bool(self.config.decorated_gate_ratio) {
            let wing = WINGS[self.rng.random_range(0..WINGS.len())];
            format!("Dock {n} - {wing}")
        } else {
            format!("Dock {n}")
        }
    }

    fn sample_arrival(&mut self) -> Instant {
        let grid = self.config.grid.value();
        let slots = (self.config.day_length.value() / grid).max(1);
        let k = self.rng.random_range(0..slots);
        self.config
            .day_start
            .saturating_add(TimeDelta::new(k.saturating_mul(grid)))
    }

    fn sample_stay(&mut self) -> Span {
        let lo = self.config.min_stay.value();
        let hi = self.config.max_stay.value();
        let secs = self.rng.random_range(lo..=hi);
        // Whole minutes, never below the configured minimum.
        TimeDelta::new((secs - secs % 60).max(lo))
    }

    fn sample_driver(&mut self) -> Driver {
        let first = FIRST_NAMES[self.rng.random_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.random_range(0..LAST_NAMES.len())];
        let phone = format!("+31 6 {:08}", self.rng.random_range(0..100_000_000u32));
        Driver {
            name: Some(DriverName {
                first: Some(first.to_owned()),
                last: Some(last.to_owned()),
            }),
            phone: Some(DriverPhone {
                formatted: Some(phone),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::DockUniverse;
    use crate::loader::RouteLoader;
    use dock_slot_core::clock::minutes;

    fn config(seed: u64) -> RouteGenConfig {
        RouteGenConfigBuilder::new()
            .route_count(40)
            .dock_count(4)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_same_seed_same_routes() {
        let a = RouteGenerator::new(config(7)).generate();
        let b = RouteGenerator::new(config(7)).generate();
        assert_eq!(a, b);
        let c = RouteGenerator::new(config(8)).generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_routes_stay_within_bounds() {
        let cfg = config(3);
        let day_end = cfg.day_start().saturating_add(cfg.day_length());
        let routes = RouteGenerator::new(cfg.clone()).generate();
        assert_eq!(routes.len(), 40);
        for r in &routes {
            assert!(r.planned_arrival() >= cfg.day_start());
            assert!(r.planned_arrival() < day_end);
            assert!(r.duration() >= minutes(20));
            assert!(r.duration() <= minutes(90));
        }
    }

    #[test]
    fn test_json_feed_round_trips_through_loader() {
        let mut generator = RouteGenerator::new(config(11));
        let feed = generator.generate_json();
        let outcome = RouteLoader::new()
            .dock_universe(DockUniverse::fixed(4))
            .from_value(feed)
            .unwrap();
        assert_eq!(outcome.routes().len(), 40);
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        assert_eq!(
            RouteGenConfigBuilder::new().dock_count(0).build(),
            Err(RouteGenConfigBuildError::NoDocks)
        );
        assert!(matches!(
            RouteGenConfigBuilder::new()
                .stay_range(minutes(60), minutes(30))
                .build(),
            Err(RouteGenConfigBuildError::InvalidStayRange { .. })
        ));
        assert!(matches!(
            RouteGenConfigBuilder::new().driver_ratio(1.5).build(),
            Err(RouteGenConfigBuildError::RatioOutOfRange {
                name: "driver_ratio",
                ..
            })
        ));
    }
}
