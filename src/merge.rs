//! Guarded table merges.
//!
//! Row-wise concatenation only proceeds once [`decide_schema`] has produced a
//! [`SchemaWitness`] for the two operands; column-wise zipping only proceeds
//! when both operands have the same number of rows. Operands are borrowed and
//! never modified.

use itertools::Itertools;
use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    decide::{Divergence, SchemaDecision, SchemaWitness, decide_schema},
    table::{Row, Table},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema mismatch: {divergence}")]
pub struct SchemaMismatchError {
    pub divergence: Divergence,
}

impl SchemaMismatchError {
    pub fn position(&self) -> usize {
        self.divergence.position()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row count mismatch: left has {left} row(s), right has {right}")]
pub struct RowCountMismatchError {
    pub left: usize,
    pub right: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConcatError {
    #[error("at least one table is required")]
    Empty,
    #[error("table {table_index} does not match the first table: {source}")]
    Schema {
        table_index: usize,
        source: SchemaMismatchError,
    },
}

/// Stacks the rows of `right` under the rows of `left`.
///
/// The result keeps the left table's schema, column names included.
pub fn concat_tables(left: &Table, right: &Table) -> Result<Table, SchemaMismatchError> {
    debug!(
        "Concatenating {} row(s) of {} with {} row(s) of {}",
        left.row_count(),
        left.schema(),
        right.row_count(),
        right.schema()
    );
    match decide_schema(left.schema(), right.schema()) {
        SchemaDecision::Match(witness) => {
            let merged = append_rows(witness, left, right);
            info!("Concatenated table holds {} row(s)", merged.row_count());
            Ok(merged)
        }
        SchemaDecision::Mismatch(divergence) => {
            warn!("Refusing to concatenate: {divergence}");
            Err(SchemaMismatchError { divergence })
        }
    }
}

/// Concatenates every table in order, checking each against the first.
pub fn concat_all(tables: &[Table]) -> Result<Table, ConcatError> {
    let (first, rest) = tables.split_first().ok_or(ConcatError::Empty)?;
    let mut rows: Vec<Row> = Vec::with_capacity(tables.iter().map(Table::row_count).sum());
    rows.extend_from_slice(first.rows());

    for (offset, table) in rest.iter().enumerate() {
        let table_index = offset + 1;
        let witness = decide_schema(first.schema(), table.schema())
            .into_result()
            .map_err(|divergence| {
                warn!("Table {table_index} diverges from the first table: {divergence}");
                ConcatError::Schema {
                    table_index,
                    source: SchemaMismatchError { divergence },
                }
            })?;
        debug_assert!(witness.covers(first.schema(), table.schema()));
        rows.extend_from_slice(table.rows());
    }

    info!(
        "Concatenated {} table(s) into {} row(s)",
        tables.len(),
        rows.len()
    );
    Ok(Table::from_checked_parts(first.schema().clone(), rows))
}

/// Places the columns of `right` after the columns of `left`, row by row.
pub fn zip_columns(left: &Table, right: &Table) -> Result<Table, RowCountMismatchError> {
    if left.row_count() != right.row_count() {
        warn!(
            "Refusing to zip tables with {} and {} row(s)",
            left.row_count(),
            right.row_count()
        );
        return Err(RowCountMismatchError {
            left: left.row_count(),
            right: right.row_count(),
        });
    }
    let schema = left.schema().extended_with(right.schema());
    let rows = left
        .rows()
        .iter()
        .zip_eq(right.rows())
        .map(|(l, r)| l.iter().chain(r.iter()).cloned().collect::<Row>())
        .collect::<Vec<_>>();
    info!(
        "Zipped {} row(s) into {} column(s)",
        rows.len(),
        schema.len()
    );
    Ok(Table::from_checked_parts(schema, rows))
}

fn append_rows(witness: SchemaWitness<'_>, left: &Table, right: &Table) -> Table {
    debug_assert!(witness.covers(left.schema(), right.schema()));
    let mut rows = Vec::with_capacity(left.row_count() + right.row_count());
    rows.extend_from_slice(left.rows());
    rows.extend_from_slice(right.rows());
    Table::from_checked_parts(witness.schema().clone(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::Value,
        schema::{ColumnType, Schema},
    };

    fn ints(values: &[i64]) -> Table {
        Table::new(
            Schema::from_types(&[ColumnType::Integer]),
            values.iter().map(|v| vec![Some(Value::Integer(*v))]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn concat_keeps_left_rows_first() {
        let merged = concat_tables(&ints(&[1, 2]), &ints(&[3])).unwrap();
        assert_eq!(
            merged.column(0).collect::<Vec<_>>(),
            vec![
                Some(&Value::Integer(1)),
                Some(&Value::Integer(2)),
                Some(&Value::Integer(3))
            ]
        );
    }

    #[test]
    fn concat_all_requires_input() {
        assert_eq!(concat_all(&[]).unwrap_err(), ConcatError::Empty);
    }

    #[test]
    fn concat_all_names_the_offending_table() {
        let strings = Table::empty(Schema::from_types(&[ColumnType::String]));
        let err = concat_all(&[ints(&[1]), ints(&[2]), strings]).unwrap_err();
        match err {
            ConcatError::Schema {
                table_index,
                source,
            } => {
                assert_eq!(table_index, 2);
                assert_eq!(source.position(), 0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn zip_of_empty_tables_combines_schemas() {
        let left = Table::empty(Schema::from_types(&[ColumnType::Integer]));
        let right = Table::empty(Schema::from_types(&[ColumnType::Boolean]));
        let zipped = zip_columns(&left, &right).unwrap();
        assert_eq!(zipped.row_count(), 0);
        assert_eq!(
            zipped.schema().column_types(),
            vec![ColumnType::Integer, ColumnType::Boolean]
        );
    }
}
