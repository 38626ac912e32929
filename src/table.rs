//! Typed in-memory tables.
//!
//! A [`Table`] pairs a [`Schema`] with rows whose cells line up with it: every
//! row has one cell per column, and every present cell holds a [`Value`] of
//! the column's declared type. [`Table::new`] checks this once; afterwards the
//! table is read-only.

use thiserror::Error;

use crate::{
    data::Value,
    schema::{ColumnType, Schema},
};

pub type Row = Vec<Option<Value>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("row {row} has {found} cell(s) but the schema declares {expected} column(s)")]
    Arity {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row} column {column} holds a {found} value but the column is declared {expected}")]
    CellType {
        row: usize,
        column: usize,
        expected: ColumnType,
        found: ColumnType,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self, TableError> {
        for (row_idx, row) in rows.iter().enumerate() {
            check_row(&schema, row_idx, row)?;
        }
        Ok(Self { schema, rows })
    }

    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    // Callers must already hold rows that satisfy `schema`, either because
    // they came out of validated tables or were checked against a witness.
    pub(crate) fn from_checked_parts(schema: Schema, rows: Vec<Row>) -> Self {
        debug_assert!(
            rows.iter()
                .enumerate()
                .all(|(idx, row)| check_row(&schema, idx, row).is_ok())
        );
        Self { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&Value>> + '_ {
        self.rows.iter().map(move |row| row.get(index).and_then(Option::as_ref))
    }

    /// Rows rendered as display strings, empty cells as `""`.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map(Value::as_display).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

fn check_row(schema: &Schema, row_idx: usize, row: &Row) -> Result<(), TableError> {
    if row.len() != schema.len() {
        return Err(TableError::Arity {
            row: row_idx,
            expected: schema.len(),
            found: row.len(),
        });
    }
    for (col_idx, (cell, column)) in row.iter().zip(&schema.columns).enumerate() {
        if let Some(value) = cell
            && value.column_type() != column.datatype
        {
            return Err(TableError::CellType {
                row: row_idx,
                column: col_idx,
                expected: column.datatype,
                found: value.column_type(),
            });
        }
    }
    Ok(())
}
