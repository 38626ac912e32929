//! Conversion of raw CSV records into typed [`Row`]s.

use anyhow::{Context, Result, ensure};

use crate::{data::parse_typed_value, schema::Schema, table::Row};

/// Parses one raw record against `schema`, one cell per column.
pub fn parse_typed_row(schema: &Schema, raw: &[String]) -> Result<Row> {
    ensure!(
        raw.len() == schema.len(),
        "Expected {} field(s) but found {}",
        schema.len(),
        raw.len()
    );
    schema
        .columns
        .iter()
        .zip(raw)
        .map(|(column, value)| {
            parse_typed_value(value, column.datatype)
                .with_context(|| format!("Column '{}'", column.name))
        })
        .collect()
}
