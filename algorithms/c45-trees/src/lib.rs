//!
//! # C4.5 decision trees
//! `c45-trees` induces classification trees with the C4.5 entropy heuristic
//! from datasets mixing discrete and continuous attributes.
//!
//! # The big picture
//!
//! `c45-trees` builds on the [`c45`] crate, which provides the attribute
//! [schema](c45::Schema) and the encoded [dataset](c45::Dataset) the trees are induced from.
//!
//! Every internal node of a tree splits on the attribute whose partition of the rows has the
//! lowest size-weighted class entropy. Discrete attributes partition the rows by value, continuous
//! attributes by the best threshold between two adjacent observed values.
//!
//! # Current state
//!
//! `c45-trees` provides [induction](DecisionTree) of a single, unpruned tree and its
//! textual rendering through `Display`. The building blocks,
//! [entropy](entropy) and [split selection](split), are exported as well.
//!

mod decision_trees;

// Re-export all core decision tree functionality
pub use decision_trees::*;

// Re-export the common Result alias for convenience
pub use c45::error::Result;
