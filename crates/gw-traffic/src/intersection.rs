//! Intersection state and the three per-intersection processes.
//!
//! Each intersection runs a trio of processes over its shared state:
//!
//! | Process         | Job                                                  |
//! |-----------------|------------------------------------------------------|
//! | [`SignalLoop`]  | consult the controller, apply switches               |
//! | [`ReleaseLoop`] | discharge the green queue, one vehicle per tick      |
//! | [`FairnessClock`] | accrue red-wait time for the starved direction     |
//!
//! The approach queues themselves are kernel stores, so queue depth is
//! always read through the kernel and release order is FIFO by arrival.

use gw_kernel::{Command, Env, KernelResult, Process, StoreId, Wake};

use crate::approach::Approach;
use crate::controller::{Action, Controller, IntersectionView};
use crate::ids::{IntersectionId, VehicleId};
use crate::records::{ReleaseRecord, SignalRecord};
use crate::world::TrafficWorld;

/// Per-intersection mutable state, owned by the world.
#[derive(Debug)]
pub struct IntersectionState {
    pub name:         String,
    pub store_ns:     StoreId,
    pub store_ew:     StoreId,
    pub phase:        Approach,
    /// Time the current phase began.
    pub phase_start:  f64,
    pub red_wait_ns:  f64,
    pub red_wait_ew:  f64,
    pub service_time: f64,
    pub controller:   Controller,
}

impl IntersectionState {
    pub fn new(
        name:         String,
        store_ns:     StoreId,
        store_ew:     StoreId,
        service_time: f64,
        controller:   Controller,
    ) -> IntersectionState {
        IntersectionState {
            name,
            store_ns,
            store_ew,
            phase: Approach::Ns,
            phase_start: 0.0,
            red_wait_ns: 0.0,
            red_wait_ew: 0.0,
            service_time,
            controller,
        }
    }

    /// The kernel store backing one approach queue.
    pub fn queue_store(&self, approach: Approach) -> StoreId {
        match approach {
            Approach::Ns => self.store_ns,
            Approach::Ew => self.store_ew,
        }
    }

    /// Flip the phase at `now`.  The direction receiving green has been
    /// served, so its red-wait clock restarts from zero.
    pub fn switch(&mut self, now: f64) {
        self.phase = self.phase.opposite();
        self.phase_start = now;
        match self.phase {
            Approach::Ns => self.red_wait_ns = 0.0,
            Approach::Ew => self.red_wait_ew = 0.0,
        }
    }
}

/// Project one intersection into the read-only view controllers consume.
fn view_of(
    env:   &Env<'_, TrafficWorld, VehicleId>,
    state: &IntersectionState,
) -> IntersectionView {
    IntersectionView {
        queue_ns:      env.store_len(state.store_ns),
        queue_ew:      env.store_len(state.store_ew),
        phase:         state.phase,
        time_in_phase: env.now().0 - state.phase_start,
        red_wait_ns:   state.red_wait_ns,
        red_wait_ew:   state.red_wait_ew,
    }
}

// ── Signal loop ───────────────────────────────────────────────────────────────

/// Consults the controller, applies its verdict and records every decision.
pub struct SignalLoop {
    pub intersection: IntersectionId,
}

impl SignalLoop {
    fn consult(
        &self,
        env:   &mut Env<'_, TrafficWorld, VehicleId>,
        world: &mut TrafficWorld,
    ) -> KernelResult<Command> {
        let now = env.now().0;
        // A switch rechecks in the same instant.  Decide again right here
        // rather than through a zero-delay wakeup: requeueing would assign
        // this loop a fresh sequence number and drop it behind wakeups other
        // processes (the monitor included) have already scheduled for later
        // instants, for the rest of the run.
        loop {
            let view = view_of(env, &world.intersections[self.intersection.index()]);
            let decision =
                world.intersections[self.intersection.index()].controller.decide(&view);

            if decision.action == Action::Switch {
                world.intersections[self.intersection.index()].switch(now);
            }

            // Recorded phase is the phase after the action was applied.
            let state = &world.intersections[self.intersection.index()];
            let record = SignalRecord {
                time:         now,
                intersection: state.name.clone(),
                phase:        state.phase,
                queue_ns:     view.queue_ns,
                queue_ew:     view.queue_ew,
                action:       decision.action,
            };
            world.trace.signals.push(record);

            if decision.recheck > 0.0 {
                return Ok(Command::Timeout(decision.recheck));
            }
        }
    }
}

impl Process<TrafficWorld, VehicleId> for SignalLoop {
    fn resume(
        &mut self,
        env:   &mut Env<'_, TrafficWorld, VehicleId>,
        world: &mut TrafficWorld,
        wake:  Wake<VehicleId>,
    ) -> KernelResult<Command> {
        match wake {
            Wake::Started | Wake::TimerElapsed => self.consult(env, world),
            Wake::EventFired | Wake::Received(_) => {
                debug_assert!(false, "signal loops only sleep on timers");
                Ok(Command::Halt)
            }
        }
    }
}

// ── Release loop ──────────────────────────────────────────────────────────────

/// Discharges the green queue at a fixed service rate.
///
/// The loop only issues `Get` when the green store is non-empty, so it is
/// never left as a pending getter on a store that has meanwhile turned red.
/// The approach being served is captured when the `Get` goes out: the signal
/// loop can switch the phase in the same instant, before the handover wakes
/// this loop, and the release record must name the queue the vehicle was
/// actually taken from.
pub struct ReleaseLoop {
    intersection: IntersectionId,
    serving:      Option<Approach>,
}

impl ReleaseLoop {
    pub fn new(intersection: IntersectionId) -> ReleaseLoop {
        ReleaseLoop { intersection, serving: None }
    }

    fn scan(
        &mut self,
        env:   &Env<'_, TrafficWorld, VehicleId>,
        world: &TrafficWorld,
    ) -> Command {
        let state = &world.intersections[self.intersection.index()];
        let green = state.phase;
        if env.store_len(state.queue_store(green)) > 0 {
            self.serving = Some(green);
            Command::Get(state.queue_store(green))
        } else {
            Command::Timeout(state.service_time)
        }
    }
}

impl Process<TrafficWorld, VehicleId> for ReleaseLoop {
    fn resume(
        &mut self,
        env:   &mut Env<'_, TrafficWorld, VehicleId>,
        world: &mut TrafficWorld,
        wake:  Wake<VehicleId>,
    ) -> KernelResult<Command> {
        match wake {
            Wake::Started | Wake::TimerElapsed => Ok(self.scan(env, world)),

            Wake::Received(vehicle) => {
                let now = env.now().0;
                let Some(approach) = self.serving.take() else {
                    debug_assert!(false, "vehicle handed over without an outstanding get");
                    return Ok(Command::Halt);
                };
                let name = world.intersections[self.intersection.index()].name.clone();

                env.fire(world.vehicles[vehicle.index()].released)?;
                let record = ReleaseRecord {
                    time:         now,
                    intersection: name,
                    vehicle:      world.vehicles[vehicle.index()].label.clone(),
                    phase:        approach,
                };
                world.trace.releases.push(record);
                Ok(Command::Timeout(
                    world.intersections[self.intersection.index()].service_time,
                ))
            }

            Wake::EventFired => {
                debug_assert!(false, "release loops never wait on events");
                Ok(Command::Halt)
            }
        }
    }
}

// ── Fairness clock ────────────────────────────────────────────────────────────

/// Accrues red-wait time at a fixed tick.
///
/// Each tick adds one tick's worth of wait to the red direction and zeroes
/// the green direction, so a green direction's red-wait is always 0 and
/// fairness thresholds are expressed in tick units.
pub struct FairnessClock {
    pub intersection: IntersectionId,
    pub every:        f64,
}

impl Process<TrafficWorld, VehicleId> for FairnessClock {
    fn resume(
        &mut self,
        _env:  &mut Env<'_, TrafficWorld, VehicleId>,
        world: &mut TrafficWorld,
        wake:  Wake<VehicleId>,
    ) -> KernelResult<Command> {
        match wake {
            Wake::Started | Wake::TimerElapsed => {
                let state = &mut world.intersections[self.intersection.index()];
                match state.phase {
                    Approach::Ns => {
                        state.red_wait_ew += self.every;
                        state.red_wait_ns = 0.0;
                    }
                    Approach::Ew => {
                        state.red_wait_ns += self.every;
                        state.red_wait_ew = 0.0;
                    }
                }
                Ok(Command::Timeout(self.every))
            }

            Wake::EventFired | Wake::Received(_) => {
                debug_assert!(false, "fairness clocks only sleep on timers");
                Ok(Command::Halt)
            }
        }
    }
}
