mod algorithm;
pub mod entropy;
mod hyperparams;
mod iter;
mod node;
pub mod split;

pub use algorithm::*;
pub use hyperparams::*;
pub use iter::*;
pub use node::*;
pub use split::{select_best_split, Split};
