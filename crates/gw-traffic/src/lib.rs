//! `gw-traffic` — the traffic-network domain model on top of `gw-kernel`.
//!
//! A road network is a set of intersections, each with one FIFO queue per
//! directional axis (NS, EW) and a pluggable signal controller.  Vehicles
//! are spawned by Poisson arrival generators, travel between intersections
//! with a uniform delay, queue, and wait for a green release.
//!
//! # Processes per run
//!
//! | Process            | Count            | Role                            |
//! |--------------------|------------------|---------------------------------|
//! | `SignalLoop`       | 1 per intersection | consult controller, switch    |
//! | `ReleaseLoop`      | 1 per intersection | discharge the green queue     |
//! | `FairnessClock`    | 1 per intersection | accrue red-wait time          |
//! | `ArrivalGenerator` | 1 per entry        | spawn vehicles                |
//! | `VehicleTrip`      | 1 per vehicle      | travel, queue, wait, repeat   |
//! | `Monitor`          | 1 per run          | periodic queue snapshots      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gw_traffic::{scenario, ControllerSpec, Simulation};
//!
//! let config = scenario::grid_2x2(ControllerSpec::actuated_default());
//! let output = Simulation::build(&config)?.run()?;
//! println!("completed: {}", output.report.completed);
//! ```
//!
//! Runs are deterministic: the same [`NetworkConfig`] always produces the
//! same [`TraceLog`].

pub mod approach;
pub mod arrivals;
pub mod config;
pub mod controller;
pub mod error;
pub mod ids;
pub mod intersection;
pub mod monitor;
pub mod policy;
pub mod records;
pub mod scenario;
pub mod sim;
pub mod vehicle;
pub mod world;


pub use approach::Approach;
pub use config::{ControllerSpec, EntrySpec, IntersectionSpec, NetworkConfig, RouteStop};
pub use controller::{Action, Controller, Decision, IntersectionView};
pub use error::{TrafficError, TrafficResult};
pub use ids::{IntersectionId, VehicleId};
pub use policy::{DecisionTree, SwitchPolicy, TreeNode, FEATURE_COUNT};
pub use records::{CompletionRecord, ReleaseRecord, SignalRecord, SnapshotRecord, TraceLog};
pub use sim::{RunOutput, RunReport, Simulation, TrafficKernel};
pub use world::TrafficWorld;
