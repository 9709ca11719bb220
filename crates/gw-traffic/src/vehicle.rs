//! Vehicles and their trips.
//!
//! A vehicle's trip is one process: travel to the next intersection, join
//! the approach queue, wait for its personal release event, repeat, and emit
//! a completion record after the last leg.  The release event is created
//! fresh at every queue join; the release loop fires it when the vehicle
//! reaches the head of a green queue.

use gw_kernel::{Command, Env, EventId, KernelResult, Process, Wake};

use crate::approach::Approach;
use crate::ids::{IntersectionId, VehicleId};
use crate::records::CompletionRecord;
use crate::world::TrafficWorld;

/// One stop on a vehicle's route.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteLeg {
    pub intersection: IntersectionId,
    pub approach:     Approach,
}

/// Per-vehicle mutable state, owned by the world and keyed by [`VehicleId`].
#[derive(Debug)]
pub struct VehicleState {
    pub label:      String,
    pub route:      Vec<RouteLeg>,
    /// Time this vehicle joined its current queue; meaningful only while
    /// queued.
    pub join_time:  f64,
    pub total_wait: f64,
    /// The one-shot event the release loop fires to let this vehicle go.
    /// Invalid while the vehicle is travelling.
    pub released:   EventId,
}

impl VehicleState {
    pub fn new(label: String, route: Vec<RouteLeg>) -> VehicleState {
        VehicleState {
            label,
            route,
            join_time: 0.0,
            total_wait: 0.0,
            released: EventId::INVALID,
        }
    }
}

/// The trip process for one vehicle.
pub struct VehicleTrip {
    pub vehicle: VehicleId,
    /// Index of the route leg currently being travelled or served.
    pub leg:     usize,
}

impl VehicleTrip {
    pub fn new(vehicle: VehicleId) -> VehicleTrip {
        VehicleTrip { vehicle, leg: 0 }
    }

    /// Join the queue for the current leg and wait for release.
    fn join_queue(
        &mut self,
        env:   &mut Env<'_, TrafficWorld, VehicleId>,
        world: &mut TrafficWorld,
    ) -> KernelResult<Command> {
        let leg = world.vehicles[self.vehicle.index()].route[self.leg];
        let event = env.create_event();

        let state = &mut world.vehicles[self.vehicle.index()];
        state.released = event;
        state.join_time = env.now().0;

        let store = world.intersections[leg.intersection.index()].queue_store(leg.approach);
        env.put(store, self.vehicle)?;
        Ok(Command::WaitEvent(event))
    }
}

impl Process<TrafficWorld, VehicleId> for VehicleTrip {
    fn resume(
        &mut self,
        env:   &mut Env<'_, TrafficWorld, VehicleId>,
        world: &mut TrafficWorld,
        wake:  Wake<VehicleId>,
    ) -> KernelResult<Command> {
        match wake {
            // Depart toward the first intersection.
            Wake::Started => Ok(Command::Timeout(world.sample_travel_delay())),

            // Arrived at the current leg's intersection.
            Wake::TimerElapsed => self.join_queue(env, world),

            // Released from the current queue.
            Wake::EventFired => {
                let now = env.now().0;
                {
                    let state = &mut world.vehicles[self.vehicle.index()];
                    state.total_wait += now - state.join_time;
                    state.released = EventId::INVALID;
                }

                self.leg += 1;
                if self.leg < world.vehicles[self.vehicle.index()].route.len() {
                    return Ok(Command::Timeout(world.sample_travel_delay()));
                }

                let label = world.vehicles[self.vehicle.index()].label.clone();
                world.trace.completions.push(CompletionRecord {
                    vehicle:     label,
                    finish_time: now,
                    total_wait:  world.vehicles[self.vehicle.index()].total_wait,
                });
                Ok(Command::Halt)
            }

            Wake::Received(_) => {
                debug_assert!(false, "vehicle trips never issue Get");
                Ok(Command::Halt)
            }
        }
    }
}
