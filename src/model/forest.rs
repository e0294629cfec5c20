//! Decision-forest classifier loaded from a JSON artifact.
//!
//! ```json
//! { "trees": [ { "nodes": [
//!     { "feature": "severity", "threshold": 0.5, "left": 1, "right": 2 },
//!     { "hospital_id": 1 },
//!     { "hospital_id": 2 }
//! ] } ] }
//! ```
//!
//! A split sends `value <= threshold` left. Child indices must point
//! forward in the node list, which rules out cycles. Each tree votes for
//! one hospital; the most-voted id wins and ties go to the smaller id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Feature, FeatureVector, HospitalClassifier, ModelError, PredictionError};
use crate::types::HospitalId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: Feature,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        hospital_id: HospitalId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, tree_idx: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Invalid(format!("tree {tree_idx} has no nodes")));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                threshold,
                left,
                right,
                ..
            } = node
            {
                if !threshold.is_finite() {
                    return Err(ModelError::Invalid(format!(
                        "tree {tree_idx} node {i} has a non-finite threshold"
                    )));
                }
                for child in [*left, *right] {
                    if child <= i || child >= self.nodes.len() {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree_idx} node {i} points at invalid child {child}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, features: &FeatureVector) -> Result<HospitalId, PredictionError> {
        let mut idx = 0;
        // Forward-only children bound the walk by the node count.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { hospital_id }) => return Ok(*hospital_id),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    idx = if features.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => break,
            }
        }
        Err(PredictionError(format!("tree walk ended without a leaf at node {idx}")))
    }
}

/// Ensemble of decision trees with majority vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ForestArtifact")]
pub struct DecisionForest {
    trees: Vec<DecisionTree>,
}

#[derive(Deserialize)]
struct ForestArtifact {
    trees: Vec<DecisionTree>,
}

impl TryFrom<ForestArtifact> for DecisionForest {
    type Error = ModelError;

    fn try_from(artifact: ForestArtifact) -> Result<Self, Self::Error> {
        Self::new(artifact.trees)
    }
}

impl DecisionForest {
    pub fn new(trees: Vec<DecisionTree>) -> Result<Self, ModelError> {
        if trees.is_empty() {
            return Err(ModelError::Invalid("forest has no trees".to_string()));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(i)?;
        }
        Ok(Self { trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Every hospital id that some leaf can produce, ascending.
    pub fn known_labels(&self) -> Vec<HospitalId> {
        let mut labels: Vec<HospitalId> = self
            .trees
            .iter()
            .flat_map(|t| t.nodes.iter())
            .filter_map(|n| match n {
                TreeNode::Leaf { hospital_id } => Some(*hospital_id),
                TreeNode::Split { .. } => None,
            })
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

impl HospitalClassifier for DecisionForest {
    fn classify(&self, features: &FeatureVector) -> Result<HospitalId, PredictionError> {
        if let Some(bad) = Feature::ALL.iter().find(|f| !features.get(**f).is_finite()) {
            return Err(PredictionError(format!("feature {bad:?} is not finite")));
        }

        let mut votes: BTreeMap<HospitalId, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.predict(features)?).or_insert(0) += 1;
        }

        let mut winner: Option<(HospitalId, usize)> = None;
        for (id, count) in votes {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((id, count));
            }
        }
        winner
            .map(|(id, _)| id)
            .ok_or_else(|| PredictionError("forest produced no votes".to_string()))
    }
}
