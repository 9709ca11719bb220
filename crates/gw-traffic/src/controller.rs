//! Signal controllers.
//!
//! Every controller answers the same question at every signal-loop tick:
//! given the intersection's observable state, hold the current phase or
//! switch to the opposite one.  Three families are provided:
//!
//! | Kind        | Decision basis                                      |
//! |-------------|-----------------------------------------------------|
//! | `FixedTime` | elapsed green time only                             |
//! | `Actuated`  | green-time bounds, red starvation, queue pressure   |
//! | `Learned`   | green-time guards, then a fitted [`SwitchPolicy`]   |

use std::fmt;

use crate::approach::Approach;
use crate::config::ControllerSpec;
use crate::error::{TrafficError, TrafficResult};
use crate::policy::{DecisionTree, SwitchPolicy, FEATURE_COUNT};

/// What the signal loop should do right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Hold,
    Switch,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Hold => write!(f, "HOLD"),
            Action::Switch => write!(f, "SWITCH"),
        }
    }
}

/// A controller verdict: the action plus how long the signal loop should
/// sleep before asking again.
///
/// Every hold rechecks after exactly one time unit; a switch rechecks
/// immediately, in the same instant, so the fresh phase gets its first
/// hold record at the switch time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decision {
    pub action:  Action,
    /// Time until the next controller consultation.
    pub recheck: f64,
}

impl Decision {
    fn hold() -> Decision {
        Decision { action: Action::Hold, recheck: 1.0 }
    }

    fn switch() -> Decision {
        Decision { action: Action::Switch, recheck: 0.0 }
    }
}

/// Read-only intersection state handed to a controller.
///
/// Controllers never see the world directly; the signal loop projects the
/// intersection into this view so a controller cannot mutate anything.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntersectionView {
    pub queue_ns:      usize,
    pub queue_ew:      usize,
    pub phase:         Approach,
    pub time_in_phase: f64,
    pub red_wait_ns:   f64,
    pub red_wait_ew:   f64,
}

impl IntersectionView {
    /// Queue depth on one approach.
    pub fn queue(&self, approach: Approach) -> usize {
        match approach {
            Approach::Ns => self.queue_ns,
            Approach::Ew => self.queue_ew,
        }
    }

    /// Accumulated red-wait clock for one approach.
    pub fn red_wait(&self, approach: Approach) -> f64 {
        match approach {
            Approach::Ns => self.red_wait_ns,
            Approach::Ew => self.red_wait_ew,
        }
    }

    /// The classifier input vector, in the order the training pipeline uses.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.queue_ns as f64,
            self.queue_ew as f64,
            if self.phase == Approach::Ns { 1.0 } else { 0.0 },
            self.time_in_phase,
            self.red_wait_ns,
            self.red_wait_ew,
        ]
    }
}

/// A signal controller bound to one intersection.
pub enum Controller {
    FixedTime {
        green_ns: f64,
        green_ew: f64,
    },
    Actuated {
        min_green:         f64,
        max_green:         f64,
        bias_threshold:    usize,
        force_switch_wait: f64,
    },
    Learned {
        min_green: f64,
        max_green: f64,
        policy:    Box<dyn SwitchPolicy>,
    },
}

impl Controller {
    /// Build a runnable controller from its configured form.
    ///
    /// Green-time bounds are checked here and a `Learned` artifact is loaded
    /// and validated, so every failure surfaces before the run starts.
    pub fn from_spec(spec: &ControllerSpec) -> TrafficResult<Controller> {
        let check_greens = |min: f64, max: f64| -> TrafficResult<()> {
            if !(min.is_finite() && max.is_finite() && 0.0 < min && min <= max) {
                return Err(TrafficError::Config(format!(
                    "green bounds must satisfy 0 < min_green <= max_green, got ({min}, {max})"
                )));
            }
            Ok(())
        };

        match spec {
            ControllerSpec::FixedTime { green_ns, green_ew } => {
                for (name, g) in [("green_ns", *green_ns), ("green_ew", *green_ew)] {
                    if !(g.is_finite() && g > 0.0) {
                        return Err(TrafficError::Config(format!(
                            "{name} must be positive, got {g}"
                        )));
                    }
                }
                Ok(Controller::FixedTime { green_ns: *green_ns, green_ew: *green_ew })
            }
            ControllerSpec::Actuated {
                min_green,
                max_green,
                bias_threshold,
                force_switch_wait,
            } => {
                check_greens(*min_green, *max_green)?;
                if !(force_switch_wait.is_finite() && *force_switch_wait > 0.0) {
                    return Err(TrafficError::Config(format!(
                        "force_switch_wait must be positive, got {force_switch_wait}"
                    )));
                }
                Ok(Controller::Actuated {
                    min_green:         *min_green,
                    max_green:         *max_green,
                    bias_threshold:    *bias_threshold,
                    force_switch_wait: *force_switch_wait,
                })
            }
            ControllerSpec::Learned { artifact, min_green, max_green } => {
                check_greens(*min_green, *max_green)?;
                let tree = DecisionTree::load(artifact)?;
                Ok(Controller::Learned {
                    min_green: *min_green,
                    max_green: *max_green,
                    policy:    Box::new(tree),
                })
            }
        }
    }

    /// One controller consultation.
    pub fn decide(&self, view: &IntersectionView) -> Decision {
        match self {
            Controller::FixedTime { green_ns, green_ew } => {
                let allotted = match view.phase {
                    Approach::Ns => *green_ns,
                    Approach::Ew => *green_ew,
                };
                if view.time_in_phase >= allotted {
                    Decision::switch()
                } else {
                    Decision::hold()
                }
            }

            Controller::Actuated {
                min_green,
                max_green,
                bias_threshold,
                force_switch_wait,
            } => {
                let red = view.phase.opposite();

                // Hard green-time bounds come before everything else.
                if view.time_in_phase >= *max_green {
                    return Decision::switch();
                }
                if view.time_in_phase < *min_green {
                    return Decision::hold();
                }
                // Fairness: a starved non-empty red direction forces a switch.
                if view.red_wait(red) >= *force_switch_wait && view.queue(red) > 0 {
                    return Decision::switch();
                }
                // Demand pressure: switch when red clearly outweighs green.
                if view.queue(red) > view.queue(view.phase) + *bias_threshold {
                    return Decision::switch();
                }
                Decision::hold()
            }

            Controller::Learned { min_green, max_green, policy } => {
                // Guard order differs from Actuated: min_green is checked
                // first, so min_green > max_green keeps the phase pinned.
                if view.time_in_phase < *min_green {
                    return Decision::hold();
                }
                if view.time_in_phase >= *max_green {
                    return Decision::switch();
                }
                if policy.predict(&view.features()) {
                    Decision::switch()
                } else {
                    Decision::hold()
                }
            }
        }
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::FixedTime { green_ns, green_ew } => f
                .debug_struct("FixedTime")
                .field("green_ns", green_ns)
                .field("green_ew", green_ew)
                .finish(),
            Controller::Actuated {
                min_green,
                max_green,
                bias_threshold,
                force_switch_wait,
            } => f
                .debug_struct("Actuated")
                .field("min_green", min_green)
                .field("max_green", max_green)
                .field("bias_threshold", bias_threshold)
                .field("force_switch_wait", force_switch_wait)
                .finish(),
            Controller::Learned { min_green, max_green, .. } => f
                .debug_struct("Learned")
                .field("min_green", min_green)
                .field("max_green", max_green)
                .finish_non_exhaustive(),
        }
    }
}
