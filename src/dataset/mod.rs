pub mod loader;
pub mod value;

pub use loader::{load_directory, LoadFailure, Loaded};
pub use value::Value;

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Read;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No columns to parse")]
    NoColumns,
    #[error("Expected {expected} fields in line {line}, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// The rows of one export file, tagged with the file's name.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Option<Value>>>,
}

impl Dataset {
    pub fn new(name: &str, columns: Vec<String>, rows: Vec<Vec<Option<Value>>>) -> Dataset {
        let mut index = HashMap::with_capacity(columns.len());

        // The first of several identically named columns wins.
        for (i, column) in columns.iter().enumerate() {
            index.entry(column.clone()).or_insert(i);
        }

        Dataset {
            name: name.to_string(),
            columns,
            index,
            rows,
        }
    }

    /// Parses CSV content with a header row.
    ///
    /// Short records are padded with nulls. Records longer than the header,
    /// and content that is not valid UTF-8, fail the whole dataset.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Dataset, Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = reader
            .headers()?
            .iter()
            .map(|header| header.to_string())
            .collect::<Vec<_>>();

        if columns.is_empty() {
            return Err(Error::NoColumns);
        }

        let mut rows = vec![];

        for result in reader.records() {
            let record = result?;

            if record.len() > columns.len() {
                return Err(Error::TooManyFields {
                    line: record.position().map_or(0, |position| position.line()),
                    expected: columns.len(),
                    found: record.len(),
                });
            }

            let mut values = record.iter().map(Value::parse).collect::<Vec<_>>();
            values.resize(columns.len(), None);
            rows.push(values);
        }

        Ok(Dataset::new(name, columns, rows))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            dataset: self,
            values,
        })
    }

    /// All values of one column, with `None` for nulls, or `None` if the
    /// column is absent.
    pub fn column_values(&self, column: &str) -> Option<impl Iterator<Item = Option<&Value>>> {
        self.column_index(column)
            .map(move |i| {
                self.rows
                    .iter()
                    .map(move |values| values.get(i).and_then(|value| value.as_ref()))
            })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    values: &'a [Option<Value>],
}

impl<'a> Row<'a> {
    /// The value at a column index resolved ahead of time.
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index).and_then(|value| value.as_ref())
    }

    /// The value of a named column; absent columns and nulls are both `None`.
    pub fn get_optional(&self, column: &str) -> Option<&'a Value> {
        self.dataset
            .column_index(column)
            .and_then(|index| self.get(index))
    }
}
