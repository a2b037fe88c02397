//! Best split search
//!
use log::trace;
use ndarray::ArrayView1;

use super::entropy::{partition_entropy, weighted_entropy};
use c45::{
    error::{Error, Result},
    AttributeKind, Dataset,
};

/// The partition chosen for a node
///
/// For a continuous attribute there are exactly two subsets, the rows with a value lower or
/// equal than the threshold followed by the remaining rows. For a discrete attribute there is
/// one subset per domain value, in domain order, and some of them may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    attribute_idx: usize,
    threshold: Option<f64>,
    subsets: Vec<Vec<usize>>,
    weighted_entropy: f64,
}

impl Split {
    /// Index of the splitting attribute in the schema
    pub fn attribute_idx(&self) -> usize {
        self.attribute_idx
    }

    /// Threshold of a continuous split, `None` for discrete splits
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn subsets(&self) -> &[Vec<usize>] {
        &self.subsets
    }

    pub fn into_subsets(self) -> Vec<Vec<usize>> {
        self.subsets
    }

    pub fn weighted_entropy(&self) -> f64 {
        self.weighted_entropy
    }
}

/// Finds the candidate attribute whose partition of `rows` has the lowest weighted entropy
///
/// ### Parameters
///
/// * `dataset`: the dataset `rows` indexes into
/// * `rows`: the subset of rows to split, it is never reordered
/// * `candidates`: schema indices of the attributes still eligible, evaluated in this order
///
/// ### Returns
///
/// `None` if `candidates` is empty or none of them can partition `rows`, which happens when all
/// candidates are continuous and every row has the same value. Ties are resolved in favour of the
/// earliest candidate and, within a continuous attribute, the lowest threshold.
///
/// ### Errors
///
/// `Error::InvalidRow` if a discrete value matches no domain entry, `Error::Parameters` if a
/// candidate index is not part of the schema.
pub fn select_best_split(
    dataset: &Dataset,
    rows: &[usize],
    candidates: &[usize],
) -> Result<Option<Split>> {
    let mut best: Option<Split> = None;

    for &attribute_idx in candidates {
        let attribute = dataset.schema().attribute(attribute_idx).ok_or_else(|| {
            Error::Parameters(format!("attribute index {} is out of range", attribute_idx))
        })?;
        let column = dataset.column(attribute_idx);

        let split = match attribute.kind() {
            AttributeKind::Continuous => best_threshold(dataset, rows, column, attribute_idx),
            AttributeKind::Discrete(domain) => Some(partition_by_value(
                dataset,
                rows,
                column,
                attribute_idx,
                domain.len(),
            )?),
        };

        let split = match split {
            Some(split) => split,
            None => {
                trace!("attribute `{}` cannot partition the rows", attribute.name());
                continue;
            }
        };
        trace!(
            "attribute `{}` scores {} (threshold {:?})",
            attribute.name(),
            split.weighted_entropy,
            split.threshold
        );

        // override best split only when strictly improved
        best = match best.take() {
            None => Some(split),
            Some(current) if split.weighted_entropy < current.weighted_entropy => Some(split),
            x => x,
        };
    }

    Ok(best)
}

/// Splits `rows` into one bucket per domain value of a discrete attribute
fn partition_by_value(
    dataset: &Dataset,
    rows: &[usize],
    column: ArrayView1<'_, f64>,
    attribute_idx: usize,
    domain_len: usize,
) -> Result<Split> {
    let mut subsets = vec![Vec::new(); domain_len];

    for &row in rows {
        let value = column[row];
        if value < 0.0 || value.fract() != 0.0 || value as usize >= domain_len {
            return Err(Error::invalid_row(
                row,
                format!(
                    "encoded value {} matches no domain value of attribute {}",
                    value, attribute_idx
                ),
            ));
        }
        subsets[value as usize].push(row);
    }

    let weighted_entropy = weighted_entropy(dataset, rows, &subsets);

    Ok(Split {
        attribute_idx,
        threshold: None,
        subsets,
        weighted_entropy,
    })
}

/// Finds the best binary split of `rows` on a continuous attribute
///
/// The rows are sorted by value on a working copy. Every pair of adjacent distinct values yields
/// a candidate threshold at their midpoint. Class frequencies are moved from the right to the
/// left side one row at a time, so that every threshold is scored without recounting.
fn best_threshold(
    dataset: &Dataset,
    rows: &[usize],
    column: ArrayView1<'_, f64>,
    attribute_idx: usize,
) -> Option<Split> {
    let mut sorted = rows.to_vec();
    // stable, rows with equal values keep their relative order
    sorted.sort_by(|&a, &b| column[a].total_cmp(&column[b]));

    let mut left_class_freq = vec![0; dataset.schema().nclasses()];
    let mut right_class_freq = dataset.class_frequencies(&sorted);

    // (number of rows on the left side, threshold, score)
    let mut best: Option<(usize, f64, f64)> = None;

    for i in 0..sorted.len().saturating_sub(1) {
        let class_idx = dataset.class_of(sorted[i]);
        left_class_freq[class_idx] += 1;
        right_class_freq[class_idx] -= 1;

        let (lower, upper) = (column[sorted[i]], column[sorted[i + 1]]);
        // equal values have to end up in the same subset
        if lower == upper {
            continue;
        }

        let score = partition_entropy(
            sorted.len(),
            vec![
                (i + 1, left_class_freq.clone()),
                (sorted.len() - i - 1, right_class_freq.clone()),
            ],
        );

        if best.map(|(_, _, best_score)| score < best_score).unwrap_or(true) {
            // halves first, the sum of two large values overflows
            let mut threshold = lower / 2.0 + upper / 2.0;
            // the midpoint of neighbouring floats may round to either bound
            if !(lower <= threshold && threshold < upper) {
                threshold = lower;
            }
            best = Some((i + 1, threshold, score));
        }
    }

    best.map(|(n_left, threshold, weighted_entropy)| {
        let right = sorted.split_off(n_left);
        Split {
            attribute_idx,
            threshold: Some(threshold),
            subsets: vec![sorted, right],
            weighted_entropy,
        }
    })
}
