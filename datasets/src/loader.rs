use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use c45::{Attribute, Dataset, Row, Schema, Value};
use csv::{ReaderBuilder, Trim};
use log::debug;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors raised while reading a description or data file
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("invalid description at line {line}: {reason}")]
    Description { line: usize, reason: String },
    #[error(transparent)]
    Dataset(#[from] c45::Error),
}

impl DatasetError {
    fn description(line: usize, reason: impl Into<String>) -> Self {
        DatasetError::Description {
            line,
            reason: reason.into(),
        }
    }
}

/// Parses a description into a schema
///
/// The first non-blank line lists the class labels, separated by commas. Every following
/// attribute is declared as `name : true` for continuous or `name : false` for discrete
/// attributes, and a discrete declaration is followed by the line listing its domain. Blank lines
/// are ignored everywhere. Line numbers in errors start at one.
pub fn schema_from_description<R: Read>(mut reader: R) -> Result<Schema> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let classes = match lines.next() {
        Some((_, line)) => split_list(line),
        None => return Err(DatasetError::description(1, "missing class labels")),
    };

    let mut attributes = Vec::new();
    while let Some((line_nr, line)) = lines.next() {
        let (name, continuous) = match line.split_once(':') {
            Some((name, flag)) => (name.trim(), flag.trim()),
            None => {
                return Err(DatasetError::description(
                    line_nr,
                    format!("expected `name : true|false`, found `{}`", line),
                ))
            }
        };

        let attribute = match continuous {
            "true" => Attribute::continuous(name),
            "false" => match lines.next() {
                Some((_, domain)) => Attribute::discrete(name, split_list(domain)),
                None => {
                    return Err(DatasetError::description(
                        line_nr,
                        format!("missing domain of discrete attribute `{}`", name),
                    ))
                }
            },
            other => {
                return Err(DatasetError::description(
                    line_nr,
                    format!("expected `true` or `false` after `{}`, found `{}`", name, other),
                ))
            }
        };
        attributes.push(attribute);
    }

    Ok(Schema::new(classes, attributes)?)
}

/// Reads comma separated rows of `schema` from `reader`
///
/// Fields are trimmed and empty lines skipped. The last field of every row is its class label.
pub fn rows_from_data<R: Read>(schema: Arc<Schema>, reader: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // lines holding only whitespace
        if record.iter().all(str::is_empty) {
            continue;
        }
        let idx = rows.len();
        let fields = record.iter().collect::<Vec<_>>();
        let (label, values) = match fields.split_last() {
            Some(split) => split,
            None => return Err(c45::Error::invalid_row(idx, "empty row").into()),
        };

        if values.len() != schema.nattributes() {
            return Err(c45::Error::invalid_row(
                idx,
                format!(
                    "expected {} fields, found {}",
                    schema.nattributes() + 1,
                    fields.len()
                ),
            )
            .into());
        }

        let values = schema
            .attributes()
            .iter()
            .zip(values.iter())
            .map(|(attribute, field)| {
                if attribute.is_continuous() {
                    field.parse::<f64>().map(Value::Continuous).map_err(|_| {
                        c45::Error::invalid_row(
                            idx,
                            format!("`{}` of `{}` is not a number", field, attribute.name()),
                        )
                    })
                } else {
                    Ok(Value::from(*field))
                }
            })
            .collect::<c45::Result<Vec<_>>>()?;

        rows.push(Row::new(values, *label));
    }

    debug!("read {} rows", rows.len());

    Ok(Dataset::from_rows(schema, rows)?)
}

/// Loads a dataset from a description and a data reader
///
/// ```rust
/// let description = "yes, no\nwindy : false\ntrue, false\n";
/// let data = "true, no\nfalse, yes\n";
///
/// let dataset = c45_datasets::load(description.as_bytes(), data.as_bytes()).unwrap();
/// assert_eq!(dataset.nsamples(), 2);
/// assert_eq!(dataset.label(0), "no");
/// ```
pub fn load<D: Read, R: Read>(description: D, data: R) -> Result<Dataset> {
    let schema = schema_from_description(description)?;

    rows_from_data(Arc::new(schema), data)
}

/// Loads a dataset from the description file at `description` and the data file at `data`
pub fn load_files<P: AsRef<Path>, Q: AsRef<Path>>(description: P, data: Q) -> Result<Dataset> {
    let description = BufReader::new(File::open(description)?);
    let data = BufReader::new(File::open(data)?);

    load(description, data)
}

fn split_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
