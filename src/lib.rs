//! `c45` provides the shared building blocks for inducing decision trees with the C4.5
//! entropy heuristic.
//!
//! ## The big picture
//!
//! The workspace is split the same way as the algorithms it serves:
//!
//! * this crate describes labelled tables: a [`Schema`] listing the class labels and the
//!   continuous or discrete attributes, and a validated [`Dataset`] of rows,
//! * `c45-trees` implements the induction itself on top of the [`Fit`](traits::Fit) trait,
//! * `c45-datasets` reads the text description/data format and ships a few small datasets.
//!
//! ## Current state
//!
//! Rows are validated against the schema when a dataset is created, so the algorithms can rely
//! on every class label and discrete value being known. Hyperparameters are checked through
//! [`ParamGuard`] before an algorithm sees them.
//!

pub mod dataset;
pub mod error;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Attribute, AttributeKind, Dataset, Row, Schema, Value};
pub use error::{Error, Result};
pub use param_guard::ParamGuard;
