//! Assembling and running a simulation.
//!
//! [`Simulation::build`] turns a validated [`NetworkConfig`] into a kernel
//! populated with every process the run needs; [`Simulation::run`] drives it
//! to the horizon and summarizes the trace.  All randomness flows through
//! the world's seeded generator, so the same config always produces the
//! same trace.

use std::collections::HashMap;

use gw_kernel::{Kernel, SimTime};

use crate::arrivals::ArrivalGenerator;
use crate::config::NetworkConfig;
use crate::controller::Controller;
use crate::error::TrafficResult;
use crate::ids::{IntersectionId, VehicleId};
use crate::intersection::{FairnessClock, IntersectionState, ReleaseLoop, SignalLoop};
use crate::monitor::Monitor;
use crate::records::TraceLog;
use crate::vehicle::RouteLeg;
use crate::world::TrafficWorld;

/// The kernel instantiation this domain runs on.
pub type TrafficKernel = Kernel<TrafficWorld, VehicleId>;

/// Fairness-clock tick; thresholds like `force_switch_wait` are expressed
/// in this unit.
const FAIRNESS_TICK: f64 = 1.0;

/// Summary statistics for one finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub horizon:            f64,
    pub spawned:            usize,
    pub completed:          usize,
    /// Vehicles spawned but not completed by the horizon.
    pub in_flight:          usize,
    /// Mean total wait of completed vehicles; `None` when nothing completed.
    pub avg_total_wait:     Option<f64>,
    pub throughput_per_min: f64,
}

/// Everything one run produces.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutput {
    pub report: RunReport,
    pub trace:  TraceLog,
}

/// A fully assembled, not-yet-run simulation.
pub struct Simulation {
    kernel:  TrafficKernel,
    world:   TrafficWorld,
    horizon: f64,
}

impl Simulation {
    /// Validate `config` and wire up the kernel.
    ///
    /// Per intersection this spawns the signal loop, release loop and
    /// fairness clock, in that order; then the arrival generators; then the
    /// monitor last, so its snapshot at time `t` sees everything the other
    /// processes did at `t`.
    pub fn build(config: &NetworkConfig) -> TrafficResult<Simulation> {
        config.validate()?;

        let mut kernel = TrafficKernel::new();
        let mut world = TrafficWorld::new(config.seed, config.travel_range);

        let mut index_of = HashMap::new();
        for spec in &config.intersections {
            let controller = Controller::from_spec(&spec.controller)?;
            let store_ns = kernel.create_store();
            let store_ew = kernel.create_store();
            index_of.insert(spec.name.clone(), IntersectionId(world.intersections.len() as u32));
            world.intersections.push(IntersectionState::new(
                spec.name.clone(),
                store_ns,
                store_ew,
                config.service_time,
                controller,
            ));
        }

        for i in 0..world.intersections.len() {
            let id = IntersectionId(i as u32);
            kernel.spawn(Box::new(SignalLoop { intersection: id }))?;
            kernel.spawn(Box::new(ReleaseLoop::new(id)))?;
            kernel.spawn(Box::new(FairnessClock { intersection: id, every: FAIRNESS_TICK }))?;
        }

        for entry in &config.entries {
            let route = entry
                .route
                .iter()
                .map(|stop| RouteLeg {
                    intersection: index_of[&stop.intersection],
                    approach:     stop.approach,
                })
                .collect();
            let generator =
                ArrivalGenerator::new(entry.label.clone(), route, entry.rate_per_min)?;
            kernel.spawn(Box::new(generator))?;
        }

        kernel.spawn(Box::new(Monitor { every: config.monitor_every }))?;

        log::info!(
            "built network: {} intersections, {} entries, horizon {}s, seed {}",
            config.intersections.len(),
            config.entries.len(),
            config.horizon,
            config.seed
        );

        Ok(Simulation { kernel, world, horizon: config.horizon })
    }

    /// Run to the horizon and summarize.
    pub fn run(mut self) -> TrafficResult<RunOutput> {
        let end = self.kernel.run_until(&mut self.world, SimTime(self.horizon))?;

        let trace = self.world.trace;
        let completed = trace.completions.len();
        let spawned = self.world.spawned;
        let avg_total_wait = if completed == 0 {
            None
        } else {
            let total: f64 = trace.completions.iter().map(|c| c.total_wait).sum();
            Some(total / completed as f64)
        };
        let report = RunReport {
            horizon: end.0,
            spawned,
            completed,
            in_flight: spawned - completed,
            avg_total_wait,
            throughput_per_min: completed as f64 / (end.0 / 60.0),
        };

        log::info!(
            "run finished at {end}: {spawned} spawned, {completed} completed, {} in flight",
            report.in_flight
        );
        Ok(RunOutput { report, trace })
    }
}
