//! Mutable world state shared by every process in a run.
//!
//! The kernel owns scheduling; [`TrafficWorld`] owns everything the domain
//! processes read and write: intersection state, per-vehicle state, the
//! seeded random stream and the trace.  Processes receive `&mut TrafficWorld`
//! only while resumed, so there is never concurrent access.

use gw_kernel::SimRng;
use rand_distr::Uniform;

use crate::ids::VehicleId;
use crate::intersection::IntersectionState;
use crate::records::TraceLog;
use crate::vehicle::{RouteLeg, VehicleState};

pub struct TrafficWorld {
    pub intersections: Vec<IntersectionState>,
    pub vehicles:      Vec<VehicleState>,
    pub rng:           SimRng,
    pub trace:         TraceLog,
    /// Uniform travel-delay interval between route legs, `(min, max)`.
    pub travel_range:  (f64, f64),
    /// Vehicles created so far, including ones still in flight.
    pub spawned:       usize,
}

impl TrafficWorld {
    pub fn new(seed: u64, travel_range: (f64, f64)) -> TrafficWorld {
        TrafficWorld {
            intersections: Vec::new(),
            vehicles: Vec::new(),
            rng: SimRng::new(seed),
            trace: TraceLog::default(),
            travel_range,
            spawned: 0,
        }
    }

    /// Register a new vehicle and return its id.
    pub fn add_vehicle(&mut self, label: String, route: Vec<RouteLeg>) -> VehicleId {
        let id = VehicleId(self.vehicles.len() as u32);
        self.vehicles.push(VehicleState::new(label, route));
        self.spawned += 1;
        id
    }

    /// Draw one inter-leg travel delay from the configured interval.
    pub fn sample_travel_delay(&mut self) -> f64 {
        let (lo, hi) = self.travel_range;
        if lo < hi {
            self.rng.sample(&Uniform::new(lo, hi))
        } else {
            // Degenerate interval, used by tests that need fixed travel.
            lo
        }
    }
}
