use std::sync::Arc;

use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::{AttributeKind, Dataset, Row, Schema, Value};
use crate::error::{Error, Result};

impl Dataset {
    /// Validates and encodes labelled rows
    ///
    /// ### Errors
    ///
    /// Returns `Error::InvalidRow` for the first row which
    /// * has a different number of values than the schema has attributes,
    /// * carries a class label which is not part of the schema,
    /// * has a discrete value outside of its attribute's domain,
    /// * has a value of the wrong kind for its attribute, or
    /// * has a continuous value which is not finite. Missing values are not supported.
    pub fn from_rows(schema: Arc<Schema>, rows: impl IntoIterator<Item = Row>) -> Result<Self> {
        let nfeatures = schema.nattributes();
        let mut flat = Vec::new();
        let mut targets = Vec::new();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.values.len() != nfeatures {
                return Err(Error::invalid_row(
                    row_idx,
                    format!(
                        "expected {} values, found {}",
                        nfeatures,
                        row.values.len()
                    ),
                ));
            }

            let class_idx = schema.class_index(&row.label).ok_or_else(|| {
                Error::invalid_row(row_idx, format!("unknown class label `{}`", row.label))
            })?;

            for (value, attribute) in row.values.iter().zip(schema.attributes()) {
                let encoded = match (attribute.kind(), value) {
                    (AttributeKind::Continuous, Value::Continuous(x)) if x.is_finite() => *x,
                    (AttributeKind::Continuous, Value::Continuous(x)) => {
                        return Err(Error::invalid_row(
                            row_idx,
                            format!("value {} of `{}` is not finite", x, attribute.name()),
                        ))
                    }
                    (AttributeKind::Discrete(_), Value::Discrete(x)) => {
                        attribute.domain_index(x).ok_or_else(|| {
                            Error::invalid_row(
                                row_idx,
                                format!("`{}` is not in the domain of `{}`", x, attribute.name()),
                            )
                        })? as f64
                    }
                    (_, value) => {
                        return Err(Error::invalid_row(
                            row_idx,
                            format!(
                                "value `{}` has the wrong kind for attribute `{}`",
                                value,
                                attribute.name()
                            ),
                        ))
                    }
                };
                flat.push(encoded);
            }
            targets.push(class_idx);
        }

        let records = Array2::from_shape_vec((targets.len(), nfeatures), flat)?;
        debug!(
            "ingested {} rows with {} attributes and {} classes",
            records.nrows(),
            nfeatures,
            schema.nclasses()
        );

        Ok(Dataset {
            schema,
            records,
            targets: Array1::from(targets),
        })
    }

    /// Creates a dataset from already encoded records and class indices
    ///
    /// Discrete columns have to hold domain indices. The same validation as in
    /// [`from_rows`](Dataset::from_rows) is applied to the encoded values.
    pub fn from_encoded(
        schema: Arc<Schema>,
        records: Array2<f64>,
        targets: Array1<usize>,
    ) -> Result<Self> {
        if records.ncols() != schema.nattributes() || records.nrows() != targets.len() {
            return Err(Error::Parameters(format!(
                "records of shape {:?} and {} targets do not match a schema with {} attributes",
                records.shape(),
                targets.len(),
                schema.nattributes()
            )));
        }

        for (row_idx, (record, &class_idx)) in records.outer_iter().zip(targets.iter()).enumerate() {
            if class_idx >= schema.nclasses() {
                return Err(Error::invalid_row(
                    row_idx,
                    format!("class index {} is out of range", class_idx),
                ));
            }
            for (x, attribute) in record.iter().zip(schema.attributes()) {
                let valid = match attribute.domain() {
                    None => x.is_finite(),
                    Some(domain) => x.fract() == 0.0 && *x >= 0.0 && (*x as usize) < domain.len(),
                };
                if !valid {
                    return Err(Error::invalid_row(
                        row_idx,
                        format!("encoded value {} is invalid for `{}`", x, attribute.name()),
                    ));
                }
            }
        }

        Ok(Dataset {
            schema,
            records,
            targets,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns a new handle to the shared schema
    pub fn shared_schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    pub fn records(&self) -> ArrayView2<'_, f64> {
        self.records.view()
    }

    /// Encoded values of attribute `attr` for all rows
    ///
    /// ### Panics
    ///
    /// If `attr` is out of bounds
    pub fn column(&self, attr: usize) -> ArrayView1<'_, f64> {
        self.records.column(attr)
    }

    pub fn targets(&self) -> ArrayView1<'_, usize> {
        self.targets.view()
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.nsamples() == 0
    }

    /// Indices of all rows, in ingestion order
    pub fn row_indices(&self) -> Vec<usize> {
        (0..self.nsamples()).collect()
    }

    /// Encoded value of attribute `attr` in row `row`
    ///
    /// ### Panics
    ///
    /// If `row` or `attr` is out of bounds
    pub fn encoded(&self, row: usize, attr: usize) -> f64 {
        self.records[(row, attr)]
    }

    /// Decoded value of attribute `attr` in row `row`
    ///
    /// ### Panics
    ///
    /// If `row` or `attr` is out of bounds
    pub fn value(&self, row: usize, attr: usize) -> Value {
        let x = self.records[(row, attr)];
        match self.schema.attributes()[attr].domain() {
            None => Value::Continuous(x),
            Some(domain) => Value::Discrete(domain[x as usize].clone()),
        }
    }

    /// Class index of row `row`
    pub fn class_of(&self, row: usize) -> usize {
        self.targets[row]
    }

    /// Class label of row `row`
    pub fn label(&self, row: usize) -> &str {
        self.schema.class_label(self.targets[row])
    }

    /// Counts the rows of every class in the subset `rows`
    ///
    /// The returned vector is indexed by class index.
    pub fn class_frequencies(&self, rows: &[usize]) -> Vec<usize> {
        let mut freq = vec![0; self.schema.nclasses()];
        for &row in rows {
            freq[self.targets[row]] += 1;
        }
        freq
    }
}
