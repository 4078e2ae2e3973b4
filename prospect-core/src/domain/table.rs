//! Columnar feature table
//!
//! Feature artifacts arrive as column-oriented tables keyed by a reserved
//! system record identifier. This module holds the table type and the two
//! operations result assembly needs: a full outer join on the record key and
//! prefix stripping for columns the service namespaced.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Reserved join-key column present in every feature block.
pub const SYSTEM_RECORD_ID: &str = "system_record_id";

/// Prefix the service adds to disambiguate caller-provided columns.
pub const ETALON_PREFIX: &str = "etalon_";

/// Errors from table algebra.
#[derive(Debug, Error)]
pub enum TableError {
    /// A join was requested on a column one side does not carry.
    #[error("table has no key column '{0}'")]
    MissingKeyColumn(String),
    /// A column's length disagrees with the table's row count.
    #[error("column '{name}' has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// A named column of JSON cell values. Absent cells are `Value::Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// Column-oriented table with a shared row count across all columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub columns: Vec<Column>,
}

impl FeatureTable {
    /// Builds a table, checking that every column has the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for column in &columns {
                if column.values.len() != expected {
                    return Err(TableError::ColumnLengthMismatch {
                        name: column.name.clone(),
                        expected,
                        actual: column.values.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Looks up a column by name. Returns the first match.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows (length of any column).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Full outer join with `other` on the `key` column.
    ///
    /// The result's row set is the union of both sides' key values: rows keep
    /// this table's order, keys only `other` carries are appended in its
    /// order. Non-key columns absent on one side are null-filled for that
    /// side's rows.
    pub fn outer_join(&self, other: &FeatureTable, key: &str) -> Result<FeatureTable, TableError> {
        let left_key = self
            .column(key)
            .ok_or_else(|| TableError::MissingKeyColumn(key.to_string()))?;
        let right_key = other
            .column(key)
            .ok_or_else(|| TableError::MissingKeyColumn(key.to_string()))?;

        let mut keys: Vec<Value> = left_key.values.clone();
        let mut seen: HashSet<String> = keys.iter().map(key_repr).collect();
        for value in &right_key.values {
            if seen.insert(key_repr(value)) {
                keys.push(value.clone());
            }
        }

        let left_rows = row_index(left_key);
        let right_rows = row_index(right_key);

        let mut columns = vec![Column {
            name: key.to_string(),
            values: keys.clone(),
        }];
        for column in self.columns.iter().filter(|c| c.name != key) {
            columns.push(aligned_column(column, &keys, &left_rows));
        }
        for column in other.columns.iter().filter(|c| c.name != key) {
            columns.push(aligned_column(column, &keys, &right_rows));
        }

        Ok(FeatureTable { columns })
    }

    /// Strips `prefix` from the name of every column that carries it.
    pub fn strip_column_prefix(&mut self, prefix: &str) {
        for column in &mut self.columns {
            if let Some(rest) = column.name.strip_prefix(prefix) {
                column.name = rest.to_string();
            }
        }
    }
}

/// Canonical text form of a key cell, used for hashing joins.
fn key_repr(value: &Value) -> String {
    value.to_string()
}

fn row_index(key_column: &Column) -> HashMap<String, usize> {
    key_column
        .values
        .iter()
        .enumerate()
        .map(|(row, value)| (key_repr(value), row))
        .collect()
}

/// Re-orders one side's column onto the joined key order, null-filling rows
/// that side does not have.
fn aligned_column(column: &Column, keys: &[Value], rows: &HashMap<String, usize>) -> Column {
    let values = keys
        .iter()
        .map(|key| {
            rows.get(&key_repr(key))
                .map_or(Value::Null, |&row| column.values[row].clone())
        })
        .collect();
    Column {
        name: column.name.clone(),
        values,
    }
}
