//! Provide traits for different classes of algorithms
//!

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in *C4.5* this would be the decision tree induced from the labelled rows of the dataset.
///
/// The error type has to implement `From<c45::Error>` so that schema and parameter problems
/// raised by the base crate can be propagated by every algorithm.
pub trait Fit<D, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &D) -> Result<Self::Object, E>;
}
