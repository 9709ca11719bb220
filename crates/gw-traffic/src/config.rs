//! Immutable run configuration.
//!
//! A [`NetworkConfig`] fully describes one run: topology, entry rates,
//! controller kind and parameters, horizon and seed.  It is validated once
//! at build time and never mutated mid-run — reproducing a run requires the
//! config plus nothing else.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::approach::Approach;
use crate::error::{TrafficError, TrafficResult};

/// Controller parameters, as configured.  The runnable form is built per
/// intersection by [`Controller::from_spec`][crate::Controller::from_spec].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerSpec {
    FixedTime {
        green_ns: f64,
        green_ew: f64,
    },
    Actuated {
        min_green:         f64,
        max_green:         f64,
        /// How much longer the red queue must be before demand pressure
        /// forces a switch.
        bias_threshold:    usize,
        /// Red-wait level (in fairness-clock units) at which a non-empty red
        /// direction forces a switch regardless of pressure.
        force_switch_wait: f64,
    },
    Learned {
        artifact:  PathBuf,
        min_green: f64,
        max_green: f64,
    },
}

impl ControllerSpec {
    /// The stock fixed-time timing plan.
    pub fn fixed_default() -> Self {
        ControllerSpec::FixedTime { green_ns: 20.0, green_ew: 20.0 }
    }

    /// The stock actuated parameter set.
    pub fn actuated_default() -> Self {
        ControllerSpec::Actuated {
            min_green:         8.0,
            max_green:         40.0,
            bias_threshold:    4,
            force_switch_wait: 60.0,
        }
    }

    /// A learned controller with the stock green-time guards.
    pub fn learned_default(artifact: PathBuf) -> Self {
        ControllerSpec::Learned { artifact, min_green: 8.0, max_green: 40.0 }
    }
}

/// One intersection in the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionSpec {
    pub name:       String,
    pub controller: ControllerSpec,
}

/// One stop on an entry route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    /// Name of an intersection declared in `NetworkConfig::intersections`.
    pub intersection: String,
    pub approach:     Approach,
}

/// One network entry point with its own Poisson arrival stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntrySpec {
    /// Label prefix for vehicles spawned here (`"{label}-{n}"`).
    pub label:        String,
    pub rate_per_min: f64,
    pub route:        Vec<RouteStop>,
}

/// Complete, immutable description of one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub seed:    u64,
    /// Virtual seconds to simulate.
    pub horizon: f64,

    /// Green-direction discharge interval: one vehicle per `service_time`.
    #[serde(default = "default_service_time")]
    pub service_time: f64,

    /// Uniform travel-delay interval between route legs, `(min, max)`.
    #[serde(default = "default_travel_range")]
    pub travel_range: (f64, f64),

    /// Snapshot interval for the monitor process.
    #[serde(default = "default_monitor_every")]
    pub monitor_every: f64,

    pub intersections: Vec<IntersectionSpec>,
    pub entries:       Vec<EntrySpec>,
}

fn default_service_time() -> f64 {
    2.0
}

fn default_travel_range() -> (f64, f64) {
    (6.0, 14.0)
}

fn default_monitor_every() -> f64 {
    1.0
}

impl NetworkConfig {
    /// Structural validation.  Controller parameter validation happens when
    /// the controllers themselves are built.
    pub fn validate(&self) -> TrafficResult<()> {
        let fail = |msg: String| Err(TrafficError::Config(msg));

        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return fail(format!("horizon must be positive, got {}", self.horizon));
        }
        if !(self.service_time.is_finite() && self.service_time > 0.0) {
            return fail(format!("service_time must be positive, got {}", self.service_time));
        }
        if !(self.monitor_every.is_finite() && self.monitor_every > 0.0) {
            return fail(format!("monitor_every must be positive, got {}", self.monitor_every));
        }
        let (lo, hi) = self.travel_range;
        if !(lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi) {
            return fail(format!("travel_range must satisfy 0 <= min <= max, got ({lo}, {hi})"));
        }
        if self.intersections.is_empty() {
            return fail("network has no intersections".into());
        }

        let mut names = HashSet::new();
        for spec in &self.intersections {
            if !names.insert(spec.name.as_str()) {
                return fail(format!("duplicate intersection name {:?}", spec.name));
            }
        }

        for entry in &self.entries {
            if !(entry.rate_per_min.is_finite() && entry.rate_per_min > 0.0) {
                return fail(format!(
                    "entry {:?}: rate_per_min must be positive, got {}",
                    entry.label, entry.rate_per_min
                ));
            }
            if entry.route.is_empty() {
                return fail(format!("entry {:?}: route is empty", entry.label));
            }
            for stop in &entry.route {
                if !names.contains(stop.intersection.as_str()) {
                    return fail(format!(
                        "entry {:?}: route names unknown intersection {:?}",
                        entry.label, stop.intersection
                    ));
                }
            }
        }
        Ok(())
    }
}
