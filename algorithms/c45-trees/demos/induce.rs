// File: demos/induce.rs

use c45::traits::Fit;
use c45_trees::DecisionTree;

/// Prints the tree induced from the description and data files given as arguments, or from the
/// bundled weather dataset if there are none
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    let dataset = match args.as_slice() {
        [description, data] => c45_datasets::load_files(description, data)?,
        [] => c45_datasets::weather(),
        _ => return Err("usage: induce [<description> <data>]".into()),
    };

    let tree = DecisionTree::params().fit(&dataset)?;

    print!("{}", tree);
    println!(
        "{} leaves ({} mixed), depth {}",
        tree.num_leaves(),
        tree.num_mixed_leaves(),
        tree.max_depth()
    );

    Ok(())
}
