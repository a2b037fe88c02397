//! Entropy of row subsets
//!
//! All functions work on subsets of a [`Dataset`] given as slices of row indices.
use c45::Dataset;

/// Shannon entropy (base two) of the class distribution of the rows in `rows`
///
/// Returns `0.0` for an empty subset.
pub fn entropy(dataset: &Dataset, rows: &[usize]) -> f64 {
    class_entropy(&dataset.class_frequencies(rows))
}

/// Size-weighted entropy of a partition of `parent`
///
/// Every subset is weighted by `len(subset) / len(parent)`. Empty subsets have weight zero and
/// do not contribute. Returns `0.0` when `parent` is empty.
pub fn weighted_entropy(dataset: &Dataset, parent: &[usize], subsets: &[Vec<usize>]) -> f64 {
    partition_entropy(
        parent.len(),
        subsets
            .iter()
            .map(|subset| (subset.len(), dataset.class_frequencies(subset))),
    )
}

/// Given the class frequencies calculates the entropy of the subset.
pub fn class_entropy(class_freq: &[usize]) -> f64 {
    let n_samples = class_freq.iter().sum::<usize>();
    if n_samples == 0 {
        return 0.0;
    }
    let n_samples = n_samples as f64;

    class_freq
        .iter()
        .map(|&x| x as f64 / n_samples)
        .map(|p| if p > 0.0 { -p * p.log2() } else { 0.0 })
        .sum()
}

/// Weighted entropy of a partition given as `(size, class frequencies)` pairs
///
/// Shared by [`weighted_entropy`] and the threshold scan, so both produce bit-identical scores
/// for the same partition.
pub(crate) fn partition_entropy(
    n_parent: usize,
    parts: impl IntoIterator<Item = (usize, Vec<usize>)>,
) -> f64 {
    if n_parent == 0 {
        return 0.0;
    }
    let n_parent = n_parent as f64;

    parts
        .into_iter()
        .filter(|(len, _)| *len > 0)
        .map(|(len, freq)| len as f64 / n_parent * class_entropy(&freq))
        .sum()
}
