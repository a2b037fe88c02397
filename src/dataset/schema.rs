use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The type of a feature column
///
/// Continuous attributes hold ordered numeric values and are split on a threshold, discrete
/// attributes hold one value of a finite domain and are split into one branch per domain value.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeKind {
    Continuous,
    /// Permissible values, in the order used for the branches of a split
    Discrete(Vec<String>),
}

/// A named feature column
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    pub fn continuous(name: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Continuous,
        }
    }

    pub fn discrete<S: Into<String>>(
        name: impl Into<String>,
        domain: impl IntoIterator<Item = S>,
    ) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Discrete(domain.into_iter().map(Into::into).collect()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self.kind, AttributeKind::Continuous)
    }

    /// Returns the domain of a discrete attribute, `None` for continuous ones
    pub fn domain(&self) -> Option<&[String]> {
        match &self.kind {
            AttributeKind::Continuous => None,
            AttributeKind::Discrete(domain) => Some(domain),
        }
    }

    /// Position of `value` in the domain of a discrete attribute
    pub fn domain_index(&self, value: &str) -> Option<usize> {
        self.domain()?.iter().position(|x| x == value)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AttributeKind::Continuous => write!(f, "{} : continuous", self.name),
            AttributeKind::Discrete(domain) => write!(f, "{} : {{{}}}", self.name, domain.join(", ")),
        }
    }
}

/// Schema
///
/// Describes the class labels and the feature columns of a dataset. The order of `classes`
/// defines the class index of a label and the order of `attributes` defines the column order of
/// every record.
///
/// The schema is created once, validated, and then shared read-only (usually behind an
/// `Arc`) by the dataset and by every algorithm working on it.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    classes: Vec<String>,
    attributes: Vec<Attribute>,
}

impl Schema {
    /// Creates a new schema
    ///
    /// ### Errors
    ///
    /// Returns `Error::Schema` if there is no class, a class label is repeated, two attributes
    /// share a name, or a discrete attribute has an empty domain or a repeated domain value.
    pub fn new<S: Into<String>>(
        classes: impl IntoIterator<Item = S>,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Result<Self> {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        let attributes: Vec<Attribute> = attributes.into_iter().collect();

        if classes.is_empty() {
            return Err(Error::Schema("at least one class label is required".into()));
        }
        if let Some(dup) = first_duplicate(classes.iter().map(String::as_str)) {
            return Err(Error::Schema(format!("class label `{}` is repeated", dup)));
        }
        if let Some(dup) = first_duplicate(attributes.iter().map(Attribute::name)) {
            return Err(Error::Schema(format!("attribute `{}` is repeated", dup)));
        }

        for attribute in &attributes {
            if let Some(domain) = attribute.domain() {
                if domain.is_empty() {
                    return Err(Error::Schema(format!(
                        "discrete attribute `{}` has an empty domain",
                        attribute.name()
                    )));
                }
                if let Some(dup) = first_duplicate(domain.iter().map(String::as_str)) {
                    return Err(Error::Schema(format!(
                        "value `{}` is repeated in the domain of `{}`",
                        dup,
                        attribute.name()
                    )));
                }
            }
        }

        Ok(Schema {
            classes,
            attributes,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn nclasses(&self) -> usize {
        self.classes.len()
    }

    pub fn nattributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute(&self, idx: usize) -> Option<&Attribute> {
        self.attributes.get(idx)
    }

    /// Names of all attributes in column order
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.iter().map(|x| x.name.clone()).collect()
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|x| x.name == name)
    }

    pub fn class_index(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|x| x == label)
    }

    /// Returns the class label for a class index
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn class_label(&self, idx: usize) -> &str {
        &self.classes[idx]
    }
}

fn first_duplicate<'a>(names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}
