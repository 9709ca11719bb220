//! `gw-kernel` — cooperative discrete-event simulation kernel for the
//! greenwave framework.
//!
//! Single-threaded cooperative scheduling over virtual time: no real
//! parallelism, no locks.  Mutation of shared state is safe because exactly
//! one process runs at any instant.  The suspension points are `Timeout`,
//! `WaitEvent` and blocking `Get` on a store; `put` never blocks.
//!
//! # What lives here
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`clock`]   | `SimTime`, the virtual clock and the wakeup min-heap   |
//! | [`process`] | `Process` trait, `Wake`, `Command`                     |
//! | [`kernel`]  | `Kernel` scheduler and the in-resume `Env` handle      |
//! | [`event`]   | One-shot events (pending → fired exactly once)         |
//! | [`store`]   | Blocking FIFO stores                                   |
//! | [`rng`]     | `SimRng` — seeded run-level randomness                 |
//! | [`ids`]     | `ProcessId`, `EventId`, `StoreId`                      |
//! | [`error`]   | `KernelError`, `KernelResult`                          |
//!
//! # Ordering guarantees
//!
//! 1. Equal-time wakeups resume in scheduling order (sequence-number
//!    tie-break), so runs replay deterministically for a fixed seed.
//! 2. Store getters are satisfied strictly in request order.
//! 3. Firing an event schedules its waiters at the current time, preserving
//!    registration order.

pub mod clock;
pub mod error;
pub mod event;
pub mod ids;
pub mod kernel;
pub mod process;
pub mod rng;
pub mod store;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::SimTime;
pub use error::{KernelError, KernelResult};
pub use ids::{EventId, ProcessId, StoreId};
pub use kernel::{Env, Kernel};
pub use process::{Command, Process, Wake};
pub use rng::SimRng;
