//! Canned study scenarios.
//!
//! These are plain [`NetworkConfig`] builders; nothing here is special to
//! the engine.  Rates are per minute and split evenly across the entry
//! points of each corridor.

use crate::approach::Approach;
use crate::config::{ControllerSpec, EntrySpec, IntersectionSpec, NetworkConfig, RouteStop};

fn stop(intersection: &str, approach: Approach) -> RouteStop {
    RouteStop { intersection: intersection.to_string(), approach }
}

/// A single fixed-time intersection fed from both axes.
pub fn one_intersection() -> NetworkConfig {
    NetworkConfig {
        seed:          7,
        horizon:       10.0 * 60.0,
        service_time:  2.0,
        travel_range:  (6.0, 14.0),
        monitor_every: 1.0,
        intersections: vec![IntersectionSpec {
            name:       "X".to_string(),
            controller: ControllerSpec::fixed_default(),
        }],
        entries: vec![
            EntrySpec {
                label:        "NS".to_string(),
                rate_per_min: 18.0,
                route:        vec![stop("X", Approach::Ns)],
            },
            EntrySpec {
                label:        "EW".to_string(),
                rate_per_min: 12.0,
                route:        vec![stop("X", Approach::Ew)],
            },
        ],
    }
}

/// A 2x2 grid, every intersection running the same controller.
///
/// Layout, with west-to-east corridors on the rows and north-to-south on
/// the columns:
///
/// ```text
/// A B
/// C D
/// ```
pub fn grid_2x2(controller: ControllerSpec) -> NetworkConfig {
    let west_to_east_rate = 18.0;
    let north_to_south_rate = 14.0;

    let intersections = ["A", "B", "C", "D"]
        .into_iter()
        .map(|name| IntersectionSpec { name: name.to_string(), controller: controller.clone() })
        .collect();

    NetworkConfig {
        seed:          7,
        horizon:       12.0 * 60.0,
        service_time:  2.0,
        travel_range:  (6.0, 14.0),
        monitor_every: 1.0,
        intersections,
        entries: vec![
            EntrySpec {
                label:        "W2E_T".to_string(),
                rate_per_min: west_to_east_rate * 0.5,
                route:        vec![stop("A", Approach::Ew), stop("B", Approach::Ew)],
            },
            EntrySpec {
                label:        "W2E_B".to_string(),
                rate_per_min: west_to_east_rate * 0.5,
                route:        vec![stop("C", Approach::Ew), stop("D", Approach::Ew)],
            },
            EntrySpec {
                label:        "N2S_L".to_string(),
                rate_per_min: north_to_south_rate * 0.5,
                route:        vec![stop("A", Approach::Ns), stop("C", Approach::Ns)],
            },
            EntrySpec {
                label:        "N2S_R".to_string(),
                rate_per_min: north_to_south_rate * 0.5,
                route:        vec![stop("B", Approach::Ns), stop("D", Approach::Ns)],
            },
        ],
    }
}
