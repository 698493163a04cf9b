//! Regression decision trees.
//!
//! Trees are stored the way scikit-learn exports them: parallel arrays indexed
//! by node id, where node 0 is the root and a node whose children are both
//! `-1` is a leaf. A sample goes to the left child when
//! `x[feature] <= threshold`.

use crate::error::{ModelError, Result, TreeError};
use serde::{Deserialize, Serialize};

/// Child marker scikit-learn uses for leaves.
pub const TREE_LEAF: i64 = -1;

/// Feature marker scikit-learn uses for leaves.
pub const TREE_UNDEFINED: i64 = -2;

/// Serialized form of a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeArtifact {
    /// Left child of each node, or -1 for leaves
    pub children_left: Vec<i64>,

    /// Right child of each node, or -1 for leaves
    pub children_right: Vec<i64>,

    /// Split feature of each node, -2 for leaves
    pub feature: Vec<i64>,

    /// Split threshold of each node
    pub threshold: Vec<f64>,

    /// Mean target value of the training samples reaching each node
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A validated regression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_features: usize,
}

impl DecisionTree {
    /// Tree with a single leaf.
    pub fn constant(value: f64, n_features: usize) -> Self {
        Self {
            nodes: vec![Node::Leaf { value }],
            n_features,
        }
    }

    /// Validate and decode a serialized tree.
    ///
    /// Every child must point strictly after its parent, so descent always
    /// terminates.
    pub fn from_artifact(
        artifact: &TreeArtifact,
        n_features: usize,
    ) -> std::result::Result<Self, TreeError> {
        let n = artifact.children_left.len();
        if n == 0 {
            return Err(TreeError::Empty);
        }
        let lengths = [
            artifact.children_right.len(),
            artifact.feature.len(),
            artifact.threshold.len(),
            artifact.value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(TreeError::LengthMismatch(format!(
                "children_left={}, children_right={}, feature={}, threshold={}, value={}",
                n, lengths[0], lengths[1], lengths[2], lengths[3]
            )));
        }

        let mut nodes = Vec::with_capacity(n);
        for node in 0..n {
            let left = artifact.children_left[node];
            let right = artifact.children_right[node];

            match (left == TREE_LEAF, right == TREE_LEAF) {
                (true, true) => {
                    let value = artifact.value[node];
                    if !value.is_finite() {
                        return Err(TreeError::NonFinite { node });
                    }
                    nodes.push(Node::Leaf { value });
                }
                (false, false) => {
                    let left = child_index(node, left, n)?;
                    let right = child_index(node, right, n)?;

                    let feature = artifact.feature[node];
                    let feature = usize::try_from(feature)
                        .ok()
                        .filter(|&f| f < n_features)
                        .ok_or(TreeError::FeatureOutOfRange {
                            node,
                            feature,
                            n_features,
                        })?;

                    let threshold = artifact.threshold[node];
                    if !threshold.is_finite() {
                        return Err(TreeError::NonFinite { node });
                    }

                    nodes.push(Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    });
                }
                _ => return Err(TreeError::HalfLeaf { node }),
            }
        }

        Ok(Self { nodes, n_features })
    }

    /// Serialized form of this tree.
    pub fn to_artifact(&self) -> TreeArtifact {
        let n = self.nodes.len();
        let mut artifact = TreeArtifact {
            children_left: Vec::with_capacity(n),
            children_right: Vec::with_capacity(n),
            feature: Vec::with_capacity(n),
            threshold: Vec::with_capacity(n),
            value: Vec::with_capacity(n),
        };

        for node in &self.nodes {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    artifact.children_left.push(left as i64);
                    artifact.children_right.push(right as i64);
                    artifact.feature.push(feature as i64);
                    artifact.threshold.push(threshold);
                    // Internal node values only matter to scikit-learn.
                    artifact.value.push(0.0);
                }
                Node::Leaf { value } => {
                    artifact.children_left.push(TREE_LEAF);
                    artifact.children_right.push(TREE_LEAF);
                    artifact.feature.push(TREE_UNDEFINED);
                    artifact.threshold.push(TREE_UNDEFINED as f64);
                    artifact.value.push(value);
                }
            }
        }

        artifact
    }

    /// Predict the target for one sample.
    pub fn predict(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                actual: x.len(),
            });
        }

        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { value } => return Ok(value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        // Children always follow their parent, so one forward pass suffices.
        let mut depth = vec![0usize; self.nodes.len()];
        let mut max_depth = 0;
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Node::Split { left, right, .. } = *node {
                let child_depth = depth[idx] + 1;
                depth[left] = child_depth;
                depth[right] = child_depth;
                max_depth = max_depth.max(child_depth);
            }
        }
        max_depth
    }

    /// Number of features the tree expects.
    pub const fn n_features(&self) -> usize {
        self.n_features
    }
}

fn child_index(node: usize, child: i64, n: usize) -> std::result::Result<usize, TreeError> {
    usize::try_from(child)
        .ok()
        .filter(|&c| c > node && c < n)
        .ok_or(TreeError::InvalidChild { node, child })
}
