//! Tabular dataset model
//!
//! A [`Dataset`] is a header row plus an ordered list of [`Record`]s that all
//! share the header's width. Values are kept as the strings read from the
//! CSV export; nothing is typed beyond that.

use super::errors::PosanonError;
use super::result::Result;
use std::collections::HashSet;

/// One row of a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Creates a record from its field values
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Returns the value at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Replaces the value at `index`; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.fields.get_mut(index) {
            *slot = value.into();
        }
    }

    /// All field values in column order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn remove_indices(&mut self, sorted_desc: &[usize]) {
        for &index in sorted_desc {
            if index < self.fields.len() {
                self.fields.remove(index);
            }
        }
    }
}

/// Ordered sequence of records sharing one column set
///
/// # Examples
///
/// ```
/// use posanon::domain::Dataset;
///
/// let mut dataset = Dataset::new(vec!["Client".into(), "RefVendeur".into()]);
/// dataset.push(vec!["DUPONT Marie".into(), "V12".into()]).unwrap();
///
/// let client = dataset.require_column("Client").unwrap();
/// assert_eq!(dataset.records()[0].get(client), Some("DUPONT Marie"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates an empty dataset with the given header
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            records: Vec::new(),
        }
    }

    /// Builds a dataset from a header and raw rows
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::Validation`] if a row's width differs from the header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut dataset = Self::new(headers);
        for row in rows {
            dataset.push(row)?;
        }
        Ok(dataset)
    }

    /// Appends a row
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::Validation`] if the row's width differs from the header.
    pub fn push(&mut self, fields: Vec<String>) -> Result<()> {
        if fields.len() != self.headers.len() {
            return Err(PosanonError::Validation(format!(
                "row has {} fields, header has {}",
                fields.len(),
                self.headers.len()
            )));
        }
        self.records.push(Record::new(fields));
        Ok(())
    }

    /// Column names in order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All records in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable access to the records; widths cannot change through [`Record::set`]
    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column that must exist
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::MissingField`] when the column is absent.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| PosanonError::MissingField(name.to_string()))
    }

    /// Values of a column, one per record
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.records
            .iter()
            .map(move |record| record.get(index).unwrap_or_default())
    }

    /// Distinct values of a column in first-appearance order, skipping `exclude`
    pub fn distinct_values(&self, index: usize, exclude: Option<&str>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for value in self.column_values(index) {
            if Some(value) == exclude {
                continue;
            }
            if seen.insert(value) {
                values.push(value.to_string());
            }
        }
        values
    }

    /// Keeps only the records matching the predicate
    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.retain(predicate);
    }

    /// Removes columns by name, returning the names that were actually dropped
    ///
    /// Names that are not part of the header are skipped with a warning.
    pub fn drop_columns(&mut self, names: &[String]) -> Vec<String> {
        let mut indices = Vec::new();
        let mut dropped = Vec::new();

        for name in names {
            match self.column_index(name) {
                Some(index) if !indices.contains(&index) => {
                    indices.push(index);
                    dropped.push(name.clone());
                }
                Some(_) => {}
                None => tracing::warn!(column = %name, "Column to drop not found, skipping"),
            }
        }

        indices.sort_unstable_by(|a, b| b.cmp(a));
        for &index in &indices {
            self.headers.remove(index);
        }
        for record in &mut self.records {
            record.remove_indices(&indices);
        }

        dropped
    }
}
