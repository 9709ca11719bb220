//! The learned-policy boundary.
//!
//! The core needs exactly one thing from a learned signal policy: a binary
//! classification over the intersection feature vector.  How the model was
//! fitted is an external concern; this module defines the trait and one
//! concrete artifact format — a flat decision tree loaded from JSON.
//!
//! # Feature vector
//!
//! Order is fixed and shared with the external training pipeline:
//!
//! | Index | Feature         |
//! |-------|-----------------|
//! | 0     | `q_ns`          |
//! | 1     | `q_ew`          |
//! | 2     | `phase_is_ns`   |
//! | 3     | `time_in_phase` |
//! | 4     | `red_wait_ns`   |
//! | 5     | `red_wait_ew`   |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TrafficError, TrafficResult};

/// Length of the classifier input vector.
pub const FEATURE_COUNT: usize = 6;

/// A binary switch/hold classifier over intersection state.
pub trait SwitchPolicy {
    /// `true` means the "switch" class.
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> bool;
}

// ── Decision-tree artifact ────────────────────────────────────────────────────

/// One node of a flat decision tree.
///
/// The tree is stored preorder: a split's children always come *after* it in
/// the node array, which makes traversal termination a load-time property
/// rather than a runtime check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        switch: bool,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
}

/// A fitted decision tree deserialized from a JSON artifact.
///
/// Evaluation follows the usual convention: go left when
/// `features[feature] <= threshold`, right otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Build a tree from nodes, validating the artifact invariants.
    pub fn new(nodes: Vec<TreeNode>) -> TrafficResult<Self> {
        let tree = DecisionTree { nodes };
        tree.validate()
            .map_err(|reason| TrafficError::Config(format!("decision tree: {reason}")))?;
        Ok(tree)
    }

    /// Load and validate a JSON artifact.
    ///
    /// Any failure — missing file, bad JSON, invariant violation — is fatal
    /// here, before the simulation starts.
    pub fn load(path: &Path) -> TrafficResult<Self> {
        let artifact_err = |reason: String| TrafficError::PolicyArtifact {
            path:   path.display().to_string(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| artifact_err(e.to_string()))?;
        let tree: DecisionTree =
            serde_json::from_str(&text).map_err(|e| artifact_err(e.to_string()))?;
        tree.validate().map_err(artifact_err)?;
        Ok(tree)
    }

    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("artifact has no nodes".into());
        }
        let len = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split { feature, threshold, left, right } = node {
                if *feature >= FEATURE_COUNT {
                    return Err(format!(
                        "node {i}: feature index {feature} out of range (max {})",
                        FEATURE_COUNT - 1
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {i}: non-finite threshold"));
                }
                if *left >= len || *right >= len {
                    return Err(format!("node {i}: child index out of range"));
                }
                if *left <= i || *right <= i {
                    return Err(format!("node {i}: children must follow their parent"));
                }
            }
        }
        Ok(())
    }
}

impl SwitchPolicy for DecisionTree {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> bool {
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                TreeNode::Leaf { switch } => return *switch,
                TreeNode::Split { feature, threshold, left, right } => {
                    // Indices strictly increase (validated), so this terminates.
                    at = if features[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}
