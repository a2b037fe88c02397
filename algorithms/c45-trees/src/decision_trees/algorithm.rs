//! C4.5 decision tree induction
//!
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use super::entropy::{class_entropy, entropy};
use super::split::select_best_split;
use super::NodeIter;
use super::{DecisionTreeValidParams, Prediction, TreeNode};
use c45::{
    error::{Error, Result},
    traits::*,
    Dataset, Schema,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

impl TreeNode {
    /// Recursively induces the subtree for `rows`
    ///
    /// Returns `None` for an empty subset, which marks an absent branch of the parent.
    fn fit(
        data: &Dataset,
        rows: &[usize],
        candidates: &[usize],
        hyperparameters: &DecisionTreeValidParams,
        depth: usize,
    ) -> Result<Option<Self>> {
        if rows.is_empty() {
            return Ok(None);
        }

        // compute frequencies for target classes
        let class_freq = data.class_frequencies(rows);

        // return a leaf when every row has the same class
        if let Some(class_idx) = single_class(&class_freq) {
            let label = data.schema().class_label(class_idx).to_string();
            return Ok(Some(Self::leaf(Prediction::Class(label), rows.len(), depth)));
        }

        // the attributes on this path are exhausted, but the rows are still impure
        if candidates.is_empty() {
            return Ok(Some(Self::leaf(Prediction::Mixed, rows.len(), depth)));
        }

        let split = match select_best_split(data, rows, candidates)? {
            Some(split) => split,
            // only tied continuous attributes are left, nothing can separate the rows
            None => return Ok(Some(Self::leaf(Prediction::Mixed, rows.len(), depth))),
        };

        let attribute_idx = split.attribute_idx();
        let threshold = split.threshold();
        let weighted_entropy = split.weighted_entropy();
        let attribute = data.schema().attributes()[attribute_idx].name().to_string();
        debug!(
            "depth {}: split {} rows on `{}` (threshold {:?}, weighted entropy {})",
            depth,
            rows.len(),
            attribute,
            threshold,
            weighted_entropy
        );

        let remaining = if hyperparameters.reuse_continuous() && threshold.is_some() {
            candidates.to_vec()
        } else {
            candidates
                .iter()
                .copied()
                .filter(|&idx| idx != attribute_idx)
                .collect::<Vec<_>>()
        };

        // Recurse into every subset, keeping the branch order of the split
        let children = split
            .into_subsets()
            .iter()
            .map(|subset| TreeNode::fit(data, subset, &remaining, hyperparameters, depth + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(TreeNode::Decision {
            attribute,
            attribute_idx,
            threshold,
            entropy: class_entropy(&class_freq),
            weighted_entropy,
            children,
            nsamples: rows.len(),
            depth,
        }))
    }
}

/// Induces a tree for the subset `rows` of `data`
///
/// `candidates` holds the schema indices of the attributes eligible for splitting, in evaluation
/// order. The tree is built by the following rules, in priority order:
///
/// 1. no rows: `None`, an absent branch
/// 2. all rows share a class: a leaf with this class
/// 3. no candidate left: a [mixed](Prediction::Mixed) leaf
/// 4. otherwise the best split of the candidates becomes a decision node and every subset is
///    induced recursively without the chosen attribute
///
/// If no candidate can partition the rows at all, because all remaining attributes are
/// continuous and tied, the node becomes a mixed leaf as well.
pub fn build_tree(
    data: &Dataset,
    rows: &[usize],
    candidates: &[usize],
    hyperparameters: &DecisionTreeValidParams,
) -> Result<Option<TreeNode>> {
    TreeNode::fit(data, rows, candidates, hyperparameters, 0)
}

/// Returns the class index if exactly one class has rows
fn single_class(class_freq: &[usize]) -> Option<usize> {
    let mut present = class_freq
        .iter()
        .enumerate()
        .filter(|(_, &freq)| freq > 0)
        .map(|(idx, _)| idx);

    match (present.next(), present.next()) {
        (Some(idx), None) => Some(idx),
        _ => None,
    }
}

/// A decision tree induced with the C4.5 entropy heuristic.
///
/// ### Structure
/// A decision tree structure is a tree where:
/// * Each internal node splits on an attribute. A continuous attribute has a threshold, and all
/// rows for which `attribute <= threshold` holds fall into the first subtree while the others
/// fall into the second. A discrete attribute has one subtree per value of its domain.
///
/// * leaf nodes carry the class shared by all their rows, or are marked as
/// [mixed](Prediction::Mixed) if the attributes ran out before the rows became pure.
///
/// ### Algorithm
///
/// Starting with all rows and all candidate attributes, the tree is induced recursively by
/// applying the following rule to every node considered:
///
/// * Find the best threshold of every continuous candidate and the partition of every discrete
///   candidate;
/// * Select the attribute whose partition has the lowest size-weighted entropy, the earliest
///   candidate wins ties;
/// * Remove the attribute from the candidates and induce one child per subset of the partition.
///   A subset without rows results in an absent child.
///
/// There is no pruning and no handling of missing values.
///
/// ### Example
///
/// Here is an example on how to induce a decision tree from its parameters:
///
/// ```rust
///
/// use c45::prelude::*;
/// use c45_trees::{DecisionTree, Prediction};
/// use c45_datasets;
///
/// // Load the dataset
/// let dataset = c45_datasets::lenses();
/// // Induce the tree
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
///
/// let root = tree.root_node().unwrap();
/// assert_eq!(root.attribute(), Some("tear-prod-rate"));
/// assert_eq!(
///     root.children()[0].as_ref().and_then(|x| x.prediction()),
///     Some(&Prediction::Class("none".to_string()))
/// );
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root_node: Option<TreeNode>,
    schema: Arc<Schema>,
}

impl Fit<Dataset, Error> for DecisionTreeValidParams {
    type Object = DecisionTree;

    /// Induce a decision tree using `hyperparameters` from all rows of the dataset.
    fn fit(&self, dataset: &Dataset) -> Result<Self::Object> {
        let schema = dataset.schema();
        let candidates = match self.candidate_attributes() {
            Some(names) => names
                .iter()
                .map(|name| {
                    schema.attribute_index(name).ok_or_else(|| {
                        Error::Parameters(format!("unknown candidate attribute `{}`", name))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => (0..schema.nattributes()).collect(),
        };

        info!(
            "inducing decision tree from {} rows with {} candidate attributes",
            dataset.nsamples(),
            candidates.len()
        );

        let root_node = build_tree(dataset, &dataset.row_indices(), &candidates, self)?;
        let tree = DecisionTree {
            root_node,
            schema: dataset.shared_schema(),
        };

        info!(
            "induced decision tree with {} leaves and depth {}",
            tree.num_leaves(),
            tree.max_depth()
        );

        Ok(tree)
    }
}

impl DecisionTree {
    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter<'_> {
        // queue of nodes yet to explore
        let queue = self.root_node.iter().collect::<VecDeque<_>>();

        NodeIter::new(queue)
    }

    /// Return root node of the tree, `None` if the tree was induced from an empty dataset
    pub fn root_node(&self) -> Option<&TreeNode> {
        self.root_node.as_ref()
    }

    /// Returns the schema of the dataset the tree was induced from
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Return the indices of all attributes used in a split, in ascending order
    pub fn features(&self) -> Vec<usize> {
        self.iter_nodes()
            .filter_map(TreeNode::attribute_idx)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Return the mean information gain of the splits on each attribute
    pub fn mean_information_gain(&self) -> Vec<f64> {
        // total information gain for each attribute
        let mut information_gain = vec![0.0; self.schema.nattributes()];
        let mut num_nodes = vec![0; self.schema.nattributes()];

        for node in self.iter_nodes() {
            if let Some(idx) = node.attribute_idx() {
                information_gain[idx] += node.information_gain();
                num_nodes[idx] += 1;
            }
        }

        information_gain
            .into_iter()
            .zip(num_nodes.into_iter())
            .map(|(val, n)| if n == 0 { 0.0 } else { val / n as f64 })
            .collect()
    }

    /// Return max depth of the tree
    pub fn max_depth(&self) -> usize {
        self.iter_nodes()
            .fold(0, |max, node| usize::max(max, node.depth()))
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Return the number of leaves which are marked as mixed
    pub fn num_mixed_leaves(&self) -> usize {
        self.iter_nodes()
            .filter_map(TreeNode::prediction)
            .filter(|prediction| prediction.is_mixed())
            .count()
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &TreeNode,
        branch: Option<String>,
    ) -> fmt::Result {
        if let Some(branch) = branch {
            write!(f, "{} {}: ", "+".repeat(node.depth()), branch)?;
        }

        match node {
            TreeNode::Leaf { prediction, .. } => writeln!(f, "{}", prediction)?,
            TreeNode::Decision {
                attribute,
                attribute_idx,
                threshold,
                children,
                ..
            } => {
                match threshold {
                    Some(threshold) => writeln!(f, "split on {} at {}", attribute, threshold)?,
                    None => writeln!(f, "split on {}", attribute)?,
                }

                let domain = self.schema.attributes()[*attribute_idx].domain();
                for (idx, child) in children.iter().enumerate() {
                    let child = match child {
                        Some(child) => child,
                        None => continue,
                    };
                    let branch = match (threshold, domain) {
                        (Some(threshold), _) if idx == 0 => format!("{} <= {}", attribute, threshold),
                        (Some(threshold), _) => format!("{} > {}", attribute, threshold),
                        (None, Some(domain)) => format!("{} = {}", attribute, domain[idx]),
                        (None, None) => format!("{} #{}", attribute, idx),
                    };
                    self.fmt_node(f, child, Some(branch))?;
                }
            }
        }

        Ok(())
    }
}

/// Renders one node per line, children are indented with one `+` per level and prefixed with
/// the branch leading to them. Absent branches are skipped.
impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root_node {
            Some(root) => self.fmt_node(f, root, None),
            None => writeln!(f, "<empty>"),
        }
    }
}

/// Entropy of the class distribution of all rows in `dataset`
pub fn dataset_entropy(dataset: &Dataset) -> f64 {
    entropy(dataset, &dataset.row_indices())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use c45::{Attribute, ParamGuard, Row, Value};
    use ndarray::{Array1, Array2};
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn schema(attributes: Vec<Attribute>) -> Arc<Schema> {
        Arc::new(Schema::new(vec!["yes", "no"], attributes).unwrap())
    }

    fn sunny_rainy() -> Dataset {
        let schema = schema(vec![Attribute::discrete("weather", vec!["sunny", "rainy"])]);
        let rows = vec![
            Row::new(vec!["sunny"], "yes"),
            Row::new(vec!["sunny"], "yes"),
            Row::new(vec!["rainy"], "no"),
            Row::new(vec!["rainy"], "no"),
        ];

        Dataset::from_rows(schema, rows).unwrap()
    }

    fn class_of(node: &Option<TreeNode>) -> Option<&str> {
        node.as_ref()
            .and_then(TreeNode::prediction)
            .and_then(Prediction::class)
    }

    #[test]
    fn single_class_example() {
        assert_eq!(single_class(&[0, 4, 0]), Some(1));
        assert_eq!(single_class(&[1, 4, 0]), None);
        assert_eq!(single_class(&[0, 0, 0]), None);
    }

    #[test]
    fn discrete_example() -> Result<()> {
        let dataset = sunny_rainy();
        assert_abs_diff_eq!(dataset_entropy(&dataset), 1.0);

        let tree = DecisionTree::params().fit(&dataset)?;
        let root = tree.root_node().unwrap();

        assert_eq!(root.attribute(), Some("weather"));
        assert_eq!(root.threshold(), None);
        assert_abs_diff_eq!(root.information_gain(), 1.0);
        assert_eq!(root.children().len(), 2);
        assert_eq!(class_of(&root.children()[0]), Some("yes"));
        assert_eq!(class_of(&root.children()[1]), Some("no"));
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.max_depth(), 1);
        assert_eq!(tree.features(), vec![0]);

        Ok(())
    }

    #[test]
    fn continuous_example() -> Result<()> {
        let schema = Arc::new(
            Schema::new(vec!["A", "B"], vec![Attribute::continuous("x")]).unwrap(),
        );
        let rows = vec![
            Row::new(vec![1.0], "A"),
            Row::new(vec![2.0], "A"),
            Row::new(vec![3.0], "B"),
            Row::new(vec![4.0], "B"),
        ];
        let dataset = Dataset::from_rows(schema, rows)?;

        let tree = DecisionTree::params().fit(&dataset)?;
        let root = tree.root_node().unwrap();

        assert_eq!(root.attribute(), Some("x"));
        assert_eq!(root.threshold(), Some(2.5));
        assert_eq!(class_of(&root.children()[0]), Some("A"));
        assert_eq!(class_of(&root.children()[1]), Some("B"));
        assert_eq!(tree.to_string(), "split on x at 2.5\n+ x <= 2.5: A\n+ x > 2.5: B\n");

        Ok(())
    }

    #[test]
    fn pure_rows_make_a_leaf() -> Result<()> {
        let schema = schema(vec![
            Attribute::discrete("weather", vec!["sunny", "rainy"]),
            Attribute::continuous("temperature"),
        ]);
        let rows = vec![
            Row::new(vec![Value::from("sunny"), Value::from(20.0)], "yes"),
            Row::new(vec![Value::from("rainy"), Value::from(10.0)], "yes"),
        ];
        let dataset = Dataset::from_rows(schema, rows)?;
        let params = DecisionTree::params().check()?;

        let node = build_tree(&dataset, &dataset.row_indices(), &[0, 1], &params)?.unwrap();
        assert_eq!(node, TreeNode::leaf(Prediction::Class("yes".into()), 2, 0));

        Ok(())
    }

    #[test]
    fn exhausted_candidates_make_a_mixed_leaf() -> Result<()> {
        let dataset = sunny_rainy();
        let params = DecisionTree::params().check()?;

        let node = build_tree(&dataset, &dataset.row_indices(), &[], &params)?.unwrap();
        assert_eq!(node, TreeNode::leaf(Prediction::Mixed, 4, 0));

        // the tree level agrees when no attribute is a candidate
        let tree = DecisionTree::params()
            .candidate_attributes(Vec::<String>::new())
            .fit(&dataset)?;
        assert_eq!(tree.num_mixed_leaves(), 1);
        assert_eq!(tree.to_string(), "<mixed>\n");

        Ok(())
    }

    #[test]
    fn empty_rows_are_absent() -> Result<()> {
        let dataset = sunny_rainy();
        let params = DecisionTree::params().check()?;
        assert_eq!(build_tree(&dataset, &[], &[0], &params)?, None);

        let empty = Dataset::from_rows(dataset.shared_schema(), Vec::new())?;
        let tree = DecisionTree::params().fit(&empty)?;
        assert!(tree.root_node().is_none());
        assert_eq!(tree.num_leaves(), 0);
        assert_eq!(tree.max_depth(), 0);
        assert_eq!(tree.to_string(), "<empty>\n");

        Ok(())
    }

    #[test]
    fn empty_branch_is_absent() -> Result<()> {
        let schema = schema(vec![Attribute::discrete(
            "outlook",
            vec!["sunny", "overcast", "rainy"],
        )]);
        let rows = vec![
            Row::new(vec!["sunny"], "yes"),
            Row::new(vec!["rainy"], "no"),
            Row::new(vec!["rainy"], "no"),
        ];
        let dataset = Dataset::from_rows(schema, rows)?;

        let tree = DecisionTree::params().fit(&dataset)?;
        let root = tree.root_node().unwrap();

        assert_eq!(root.children().len(), 3);
        assert_eq!(class_of(&root.children()[0]), Some("yes"));
        assert!(root.children()[1].is_none());
        assert_eq!(class_of(&root.children()[2]), Some("no"));
        assert_eq!(
            tree.to_string(),
            "split on outlook\n+ outlook = sunny: yes\n+ outlook = rainy: no\n"
        );

        Ok(())
    }

    #[test]
    fn tied_continuous_values_make_a_mixed_leaf() -> Result<()> {
        let schema = schema(vec![Attribute::continuous("x")]);
        let rows = vec![Row::new(vec![1.0], "yes"), Row::new(vec![1.0], "no")];
        let dataset = Dataset::from_rows(schema, rows)?;

        let tree = DecisionTree::params().fit(&dataset)?;
        assert_eq!(
            tree.root_node(),
            Some(&TreeNode::leaf(Prediction::Mixed, 2, 0))
        );

        Ok(())
    }

    #[test]
    fn attributes_are_used_once_per_path() -> Result<()> {
        let schema = schema(vec![Attribute::continuous("x")]);
        let rows = vec![
            Row::new(vec![1.0], "yes"),
            Row::new(vec![2.0], "no"),
            Row::new(vec![3.0], "yes"),
            Row::new(vec![4.0], "yes"),
        ];
        let dataset = Dataset::from_rows(schema, rows)?;

        // the first split leaves {1, 2} impure and x cannot be used again
        let tree = DecisionTree::params().fit(&dataset)?;
        let root = tree.root_node().unwrap();
        assert_eq!(root.threshold(), Some(2.5));
        assert_eq!(
            root.children()[0].as_ref().and_then(TreeNode::prediction),
            Some(&Prediction::Mixed)
        );
        assert_eq!(class_of(&root.children()[1]), Some("yes"));

        // reusing continuous attributes separates the remaining pair
        let tree = DecisionTree::params().reuse_continuous(true).fit(&dataset)?;
        let left = tree.root_node().unwrap().children()[0].as_ref().unwrap();
        assert_eq!(left.attribute(), Some("x"));
        assert_eq!(left.threshold(), Some(1.5));
        assert_eq!(tree.num_mixed_leaves(), 0);
        assert_eq!(tree.max_depth(), 2);

        Ok(())
    }

    #[test]
    fn unknown_candidate_attribute() {
        let dataset = sunny_rainy();
        let res = DecisionTree::params()
            .candidate_attributes(vec!["temperature"])
            .fit(&dataset);
        assert!(matches!(res, Err(Error::Parameters(_))));
    }

    #[test]
    fn repeated_candidate_attribute() {
        let dataset = sunny_rainy();
        let res = DecisionTree::params()
            .candidate_attributes(vec!["weather", "weather"])
            .fit(&dataset);
        assert!(matches!(res, Err(Error::Parameters(_))));
    }

    #[test]
    /// Depth is bounded by the number of attributes and every row ends up in exactly one leaf
    fn random_data_invariants() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let schema = Arc::new(
            Schema::new(
                vec!["a", "b", "c"],
                vec![
                    Attribute::continuous("x"),
                    Attribute::discrete("y", vec!["u", "v", "w"]),
                    Attribute::continuous("z"),
                    Attribute::discrete("q", vec!["on", "off"]),
                ],
            )
            .unwrap(),
        );

        for _ in 0..10 {
            let n = 80;
            let mut records = Array2::zeros((n, 4));
            for mut record in records.outer_iter_mut() {
                record[0] = rng.gen_range(0..10) as f64;
                record[1] = rng.gen_range(0..3) as f64;
                record[2] = rng.gen::<f64>();
                record[3] = rng.gen_range(0..2) as f64;
            }
            let targets = (0..n).map(|_| rng.gen_range(0..3)).collect::<Array1<usize>>();
            let dataset = Dataset::from_encoded(schema.clone(), records, targets)?;

            let tree = DecisionTree::params().fit(&dataset)?;
            assert!(tree.max_depth() <= 4);

            let leaf_rows = tree
                .iter_nodes()
                .filter(|node| node.is_leaf())
                .map(TreeNode::nsamples)
                .sum::<usize>();
            assert_eq!(leaf_rows, n);

            for node in tree.iter_nodes().filter(|node| !node.is_leaf()) {
                let children = node.children().iter().flatten();
                assert_eq!(children.map(TreeNode::nsamples).sum::<usize>(), node.nsamples());
                assert!(node.information_gain() >= -1e-12);
            }
        }

        Ok(())
    }

    #[test]
    fn induction_is_reproducible() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(7);
        let schema = Arc::new(
            Schema::new(
                vec!["a", "b"],
                vec![
                    Attribute::continuous("x"),
                    Attribute::continuous("y"),
                    Attribute::discrete("z", vec!["u", "v"]),
                ],
            )
            .unwrap(),
        );
        let records = Array2::from_shape_fn((60, 3), |(_, col)| {
            if col == 2 {
                rng.gen_range(0..2) as f64
            } else {
                rng.gen_range(0..5) as f64
            }
        });
        let targets = (0..60).map(|_| rng.gen_range(0..2)).collect::<Array1<usize>>();
        let dataset = Dataset::from_encoded(schema, records, targets)?;

        let params = DecisionTree::params();
        let first = params.fit(&dataset)?;
        let second = params.fit(&dataset)?;
        assert_eq!(first.root_node(), second.root_node());
        assert_eq!(first.to_string(), second.to_string());

        Ok(())
    }

    #[test]
    fn information_gain_per_attribute() -> Result<()> {
        let dataset = sunny_rainy();
        let tree = DecisionTree::params().fit(&dataset)?;

        assert_eq!(tree.mean_information_gain(), vec![1.0]);

        Ok(())
    }
}
