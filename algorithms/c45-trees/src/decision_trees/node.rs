use std::fmt;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The label assigned by a leaf
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prediction {
    /// Every row reaching the leaf has this class
    Class(String),
    /// The attributes were exhausted before the rows became pure
    Mixed,
}

impl Prediction {
    /// Returns the class label, `None` for a mixed leaf
    pub fn class(&self) -> Option<&str> {
        match self {
            Prediction::Class(label) => Some(label.as_str()),
            Prediction::Mixed => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Prediction::Mixed)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Class(label) => write!(f, "{}", label),
            Prediction::Mixed => write!(f, "<mixed>"),
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// A node in the decision tree
///
/// Nodes are built bottom-up during induction and never change afterwards.
pub enum TreeNode {
    Leaf {
        prediction: Prediction,
        nsamples: usize,
        depth: usize,
    },
    Decision {
        attribute: String,
        attribute_idx: usize,
        /// Split value of a continuous attribute, `None` for discrete attributes
        threshold: Option<f64>,
        /// Entropy of the rows reaching the node
        entropy: f64,
        /// Size-weighted entropy of the children
        weighted_entropy: f64,
        /// For a threshold split the `<=` branch followed by the `>` branch, otherwise one
        /// branch per domain value. Branches without rows are `None`.
        children: Vec<Option<TreeNode>>,
        nsamples: usize,
        depth: usize,
    },
}

impl TreeNode {
    pub(crate) fn leaf(prediction: Prediction, nsamples: usize, depth: usize) -> Self {
        TreeNode::Leaf {
            prediction,
            nsamples,
            depth,
        }
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Returns the depth of the node in the decision tree
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { depth, .. } | TreeNode::Decision { depth, .. } => *depth,
        }
    }

    /// Returns the number of training rows which reached this node
    pub fn nsamples(&self) -> usize {
        match self {
            TreeNode::Leaf { nsamples, .. } | TreeNode::Decision { nsamples, .. } => *nsamples,
        }
    }

    /// Returns `Some(prediction)` for leaf nodes and `None` for internal nodes.
    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            TreeNode::Leaf { prediction, .. } => Some(prediction),
            TreeNode::Decision { .. } => None,
        }
    }

    /// Returns the name of the feature used in the split if the node is internal,
    /// `None` otherwise
    pub fn attribute(&self) -> Option<&str> {
        match self {
            TreeNode::Decision { attribute, .. } => Some(attribute.as_str()),
            TreeNode::Leaf { .. } => None,
        }
    }

    pub fn attribute_idx(&self) -> Option<usize> {
        match self {
            TreeNode::Decision { attribute_idx, .. } => Some(*attribute_idx),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns the threshold of a continuous split
    pub fn threshold(&self) -> Option<f64> {
        match self {
            TreeNode::Decision { threshold, .. } => *threshold,
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns the children in branch order, empty for leaves
    pub fn children(&self) -> &[Option<TreeNode>] {
        match self {
            TreeNode::Decision { children, .. } => children.as_slice(),
            TreeNode::Leaf { .. } => &[],
        }
    }

    /// Entropy of the node minus the weighted entropy of its children, zero for leaves
    pub fn information_gain(&self) -> f64 {
        match self {
            TreeNode::Decision {
                entropy,
                weighted_entropy,
                ..
            } => entropy - weighted_entropy,
            TreeNode::Leaf { .. } => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn accessors() {
        let leaf = TreeNode::leaf(Prediction::Class("yes".into()), 3, 1);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.prediction().and_then(Prediction::class), Some("yes"));
        assert_eq!(leaf.attribute(), None);
        assert_eq!(leaf.threshold(), None);
        assert!(leaf.children().is_empty());
        assert_eq!(leaf.information_gain(), 0.0);

        let node = TreeNode::Decision {
            attribute: "x".into(),
            attribute_idx: 2,
            threshold: Some(2.5),
            entropy: 1.0,
            weighted_entropy: 0.25,
            children: vec![Some(leaf), None],
            nsamples: 4,
            depth: 0,
        };
        assert!(!node.is_leaf());
        assert_eq!(node.prediction(), None);
        assert_eq!(node.attribute(), Some("x"));
        assert_eq!(node.attribute_idx(), Some(2));
        assert_eq!(node.threshold(), Some(2.5));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.nsamples(), 4);
        assert_eq!(node.depth(), 0);
        assert_abs_diff_eq!(node.information_gain(), 0.75);
    }

    #[test]
    fn mixed_is_not_a_class() {
        assert!(Prediction::Mixed.is_mixed());
        assert_eq!(Prediction::Mixed.class(), None);
        assert_ne!(Prediction::Mixed, Prediction::Class("<mixed>".into()));
        assert_eq!(Prediction::Class("<mixed>".into()).class(), Some("<mixed>"));
    }
}
