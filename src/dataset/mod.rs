//! Datasets
//!
//! This module implements the schema describing a labelled table and the dataset struct holding
//! its validated rows.
use ndarray::{Array1, Array2};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod impl_dataset;
mod schema;

pub use schema::{Attribute, AttributeKind, Schema};

/// A single feature value as produced by ingestion
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Continuous(f64),
    Discrete(String),
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Continuous(x)
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Self {
        Value::Discrete(x.to_string())
    }
}

impl From<String> for Value {
    fn from(x: String) -> Self {
        Value::Discrete(x)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Continuous(x) => write!(f, "{}", x),
            Value::Discrete(x) => write!(f, "{}", x),
        }
    }
}

/// A labelled row before validation
///
/// `values` is aligned positionally with the attributes of the schema, `label` has to be one of
/// its classes.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
    pub label: String,
}

impl Row {
    pub fn new<V: Into<Value>>(values: impl IntoIterator<Item = V>, label: impl Into<String>) -> Self {
        Row {
            values: values.into_iter().map(Into::into).collect(),
            label: label.into(),
        }
    }
}

/// Dataset
///
/// This is the fundamental structure handed to the tree induction. It contains the shared
/// schema, a matrix of records and one class index per record.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures). Continuous
/// values are stored as they are, discrete values as their index into the attribute's domain
/// * `targets`: the class index of each record, indexing `schema.classes()`
///
/// A dataset can only be obtained through validating constructors, so every stored value is
/// consistent with the schema. Subsets of the dataset are expressed as slices of row indices,
/// the records themselves are never reordered.
#[derive(Clone, Debug)]
pub struct Dataset {
    schema: Arc<Schema>,
    records: Array2<f64>,
    targets: Array1<usize>,
}
