//! Poisson arrival streams.
//!
//! One generator per network entry point: it sleeps an exponentially
//! distributed gap, spawns a vehicle on the entry's route, and repeats until
//! the horizon abandons it.

use gw_kernel::{Command, Env, KernelResult, Process, Wake};
use rand_distr::Exp;

use crate::error::{TrafficError, TrafficResult};
use crate::ids::VehicleId;
use crate::vehicle::{RouteLeg, VehicleTrip};
use crate::world::TrafficWorld;

pub struct ArrivalGenerator {
    prefix: String,
    route:  Vec<RouteLeg>,
    gap:    Exp<f64>,
    count:  usize,
}

impl ArrivalGenerator {
    /// `rate_per_min` is the mean arrival rate; gaps are sampled in seconds.
    pub fn new(prefix: String, route: Vec<RouteLeg>, rate_per_min: f64) -> TrafficResult<Self> {
        let gap = Exp::new(rate_per_min / 60.0).map_err(|e| {
            TrafficError::Config(format!("entry {prefix:?}: bad arrival rate: {e}"))
        })?;
        Ok(ArrivalGenerator { prefix, route, gap, count: 0 })
    }
}

impl Process<TrafficWorld, VehicleId> for ArrivalGenerator {
    fn resume(
        &mut self,
        env:   &mut Env<'_, TrafficWorld, VehicleId>,
        world: &mut TrafficWorld,
        wake:  Wake<VehicleId>,
    ) -> KernelResult<Command> {
        match wake {
            Wake::Started => Ok(Command::Timeout(world.rng.sample(&self.gap))),

            Wake::TimerElapsed => {
                self.count += 1;
                let label = format!("{}-{}", self.prefix, self.count);
                let vehicle = world.add_vehicle(label, self.route.clone());
                env.spawn(Box::new(VehicleTrip::new(vehicle)))?;
                Ok(Command::Timeout(world.rng.sample(&self.gap)))
            }

            Wake::EventFired | Wake::Received(_) => {
                debug_assert!(false, "arrival generators only sleep on timers");
                Ok(Command::Halt)
            }
        }
    }
}
