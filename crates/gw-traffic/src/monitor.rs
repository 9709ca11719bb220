//! Periodic queue snapshots.

use gw_kernel::{Command, Env, KernelResult, Process, Wake};

use crate::ids::VehicleId;
use crate::records::SnapshotRecord;
use crate::world::TrafficWorld;

/// Samples every intersection's queues and phase at a fixed interval.
///
/// Spawned last, so a snapshot at time `t` reflects everything the other
/// processes did at `t`.
pub struct Monitor {
    pub every: f64,
}

impl Process<TrafficWorld, VehicleId> for Monitor {
    fn resume(
        &mut self,
        env:   &mut Env<'_, TrafficWorld, VehicleId>,
        world: &mut TrafficWorld,
        wake:  Wake<VehicleId>,
    ) -> KernelResult<Command> {
        match wake {
            Wake::Started | Wake::TimerElapsed => {
                let now = env.now().0;
                for i in 0..world.intersections.len() {
                    let state = &world.intersections[i];
                    let record = SnapshotRecord {
                        time:         now,
                        intersection: state.name.clone(),
                        queue_ns:     env.store_len(state.store_ns),
                        queue_ew:     env.store_len(state.store_ew),
                        phase:        state.phase,
                    };
                    world.trace.snapshots.push(record);
                }
                Ok(Command::Timeout(self.every))
            }
            Wake::EventFired | Wake::Received(_) => {
                debug_assert!(false, "monitors only sleep on timers");
                Ok(Command::Halt)
            }
        }
    }
}
