//! Table and Row data structures

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::debug;

use super::schema::Column;
use super::value::{FromScalar, IntoScalar};
use crate::error::{Error, Result};

/// One row materialized as column name -> widened value, in table column order
pub type Row = IndexMap<String, f64>;

/// A table of equal-length, uniquely named columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table, validating that it has at least one column, that all
    /// columns have the same length and that names are unique
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(Error::Validation(
                "table must have at least one column".to_string(),
            ));
        };

        let expected = first.len();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for column in &columns {
            if column.len() != expected {
                return Err(Error::Validation(format!(
                    "column '{}' has inconsistent number of rows: expected {}, got {}",
                    column.name(),
                    expected,
                    column.len()
                )));
            }
            if !seen.insert(column.name()) {
                return Err(Error::Validation(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
        }

        debug!(
            columns = columns.len(),
            rows = expected,
            "table constructed"
        );
        Ok(Self { columns })
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns in canonical order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in canonical order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Get column by position
    pub fn column_at(&self, index: usize) -> Result<&Column> {
        self.columns
            .get(index)
            .ok_or_else(|| Error::column_out_of_range(index, self.columns.len()))
    }

    /// Read a cell converted to `T`
    pub fn value_at<T: FromScalar>(&self, row: usize, col: usize) -> Result<T> {
        self.column_at(col)?.value_as(row)
    }

    /// Write a cell; the column kind decides how the value is stored
    pub fn set_value_at<V: IntoScalar>(&mut self, row: usize, col: usize, value: V) -> Result<()> {
        let len = self.columns.len();
        self.columns
            .get_mut(col)
            .ok_or_else(|| Error::column_out_of_range(col, len))?
            .set_value(row, value)
    }

    /// Snapshot one row as name -> f64
    pub fn row(&self, index: usize) -> Result<Row> {
        let mut row = Row::with_capacity(self.columns.len());
        self.row_into(index, &mut row)?;
        Ok(row)
    }

    /// Refill `row` with the values of row `index`, reusing its allocation
    pub fn row_into(&self, index: usize, row: &mut Row) -> Result<()> {
        if index >= self.row_count() {
            return Err(Error::row_out_of_range(index, self.row_count()));
        }
        row.clear();
        for column in &self.columns {
            row.insert(column.name().to_string(), column.value_as::<f64>(index)?);
        }
        Ok(())
    }

    /// Write the provided keys of `row` into row `index`.
    ///
    /// Keys that name no column are ignored and columns absent from `row`
    /// keep their current value.
    pub fn set_row(&mut self, index: usize, row: &Row) -> Result<()> {
        if index >= self.row_count() {
            return Err(Error::row_out_of_range(index, self.row_count()));
        }
        for column in &mut self.columns {
            if let Some(&value) = row.get(column.name()) {
                column.set_value(index, value)?;
            }
        }
        Ok(())
    }

    /// Remove a column by name, returning whether one was removed
    pub fn remove_column(&mut self, name: &str) -> bool {
        match self.column_index(name) {
            Some(idx) => {
                self.columns.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Consume the table, returning its columns
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
