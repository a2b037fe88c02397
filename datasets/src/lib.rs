//! `c45-datasets` reads labelled tables in the description/data text format and provides a
//! couple of small datasets ready to be used in tests and examples.
//!
//! ## The Big Picture
//!
//! `c45-datasets` is a crate in the `c45` workspace. Loaded tables are returned as a validated
//! [`c45::Dataset`] which can be handed to the tree induction of `c45-trees` directly.
//!
//! ## File format
//!
//! A table is stored in two files. The description lists the class labels on its first line,
//! followed by the attributes:
//!
//! ```text
//! yes, no
//! outlook : false
//! sunny, overcast, rainy
//! temperature : true
//! ```
//!
//! `true` marks a continuous attribute, `false` a discrete one whose domain follows on the next
//! line. The data file holds one comma separated row per line, with the class label last:
//!
//! ```text
//! sunny, 85, no
//! overcast, 83, yes
//! ```
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * `["weather"]` : the numeric weather dataset, mixing discrete and continuous attributes
//! * `["lenses"]` : contact lenses dataset, all attributes discrete
//!
//! ## Using a dataset
//!
//! To use one of the provided datasets in your project add the crate to your Cargo.toml with the corresponding feature enabled:
//! ```ignore
//! c45-datasets = { version = "0.1.0", features = ["weather"] }
//! ```
//! and then use it in your example or tests as
//! ```ignore
//! let dataset = c45_datasets::weather();
//!  /// ...
//! ```

mod dataset;
mod loader;

pub use dataset::*;
pub use loader::{load, load_files, rows_from_data, schema_from_description, DatasetError, Result};
