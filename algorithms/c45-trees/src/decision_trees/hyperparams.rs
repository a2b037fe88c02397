use std::collections::HashSet;

use c45::{
    error::{Error, Result},
    ParamGuard,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::DecisionTree;

/// The set of hyperparameters that can be specified for inducing a
/// [decision tree](struct.DecisionTree.html).
///
/// ### Example
///
/// ```rust
/// use c45::prelude::*;
/// use c45_trees::DecisionTree;
///
/// // Initialize the default set of parameters
/// let params = DecisionTree::params();
/// // Only split on the outlook and the humidity, in this order
/// let params = params.candidate_attributes(vec!["outlook", "humidity"]);
///
/// // Load the data and induce the tree
/// let dataset = c45_datasets::weather();
/// let tree = params.fit(&dataset).unwrap();
///
/// assert_eq!(tree.root_node().and_then(|root| root.attribute()), Some("outlook"));
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTreeValidParams {
    candidate_attributes: Option<Vec<String>>,
    reuse_continuous: bool,
}

impl DecisionTreeValidParams {
    pub fn candidate_attributes(&self) -> Option<&[String]> {
        self.candidate_attributes.as_deref()
    }

    pub fn reuse_continuous(&self) -> bool {
        self.reuse_continuous
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTreeParams(DecisionTreeValidParams);

impl DecisionTreeParams {
    pub fn new() -> Self {
        Self(DecisionTreeValidParams {
            candidate_attributes: None,
            reuse_continuous: false,
        })
    }

    /// Sets the attributes considered for splitting, in the order they are evaluated
    ///
    /// By default all attributes of the schema are candidates, in schema order. The order
    /// matters when two attributes split equally well: the earlier one is chosen.
    pub fn candidate_attributes<S: Into<String>>(
        mut self,
        attributes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.0.candidate_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Keeps continuous attributes eligible below a threshold split on them
    ///
    /// By default every attribute is used at most once on a path from the root, even continuous
    /// ones. Discrete attributes are always removed after their split.
    pub fn reuse_continuous(mut self, reuse_continuous: bool) -> Self {
        self.0.reuse_continuous = reuse_continuous;
        self
    }
}

impl Default for DecisionTreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `candidate_attributes = None` (all attributes in schema order)
    /// * `reuse_continuous = false`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> DecisionTreeParams {
        DecisionTreeParams::new()
    }
}

impl ParamGuard for DecisionTreeParams {
    type Checked = DecisionTreeValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if let Some(attributes) = &self.0.candidate_attributes {
            let mut seen = HashSet::new();
            if let Some(dup) = attributes.iter().find(|name| !seen.insert(name.as_str())) {
                return Err(Error::Parameters(format!(
                    "candidate attribute `{}` is listed twice",
                    dup
                )));
            }
        }

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
