use proptest::prelude::*;
use schema_merge::data::Value;
use schema_merge::{
    ColumnMeta, ColumnType, ConcatError, Divergence, RowCountMismatchError, Schema, Table,
    concat_all, concat_tables, zip_columns,
};

fn id_label(rows: &[(i64, &str)]) -> Table {
    Table::new(
        Schema::new(vec![
            ColumnMeta::new("id", ColumnType::Integer),
            ColumnMeta::new("label", ColumnType::String),
        ]),
        rows.iter()
            .map(|(id, label)| {
                vec![
                    Some(Value::Integer(*id)),
                    Some(Value::String((*label).to_string())),
                ]
            })
            .collect(),
    )
    .expect("valid table")
}

fn single(ty: ColumnType, values: Vec<Value>) -> Table {
    Table::new(
        Schema::from_types(&[ty]),
        values.into_iter().map(|v| vec![Some(v)]).collect(),
    )
    .expect("valid table")
}

#[test]
fn concat_appends_rows_in_order() {
    let first = id_label(&[(1, "a"), (2, "b")]);
    let second = id_label(&[(3, "c")]);
    let merged = concat_tables(&first, &second).expect("schemas match");

    assert_eq!(merged.schema(), first.schema());
    assert_eq!(merged.row_count(), 3);
    assert_eq!(&merged.rows()[..2], first.rows());
    assert_eq!(&merged.rows()[2..], second.rows());
    // operands untouched
    assert_eq!(first.row_count(), 2);
    assert_eq!(second.row_count(), 1);
}

#[test]
fn concat_rejects_diverging_schemas_at_position_one() {
    let left = id_label(&[(1, "a")]);
    let right = Table::new(
        Schema::from_types(&[ColumnType::Integer, ColumnType::Boolean]),
        vec![vec![Some(Value::Integer(2)), Some(Value::Boolean(true))]],
    )
    .unwrap();

    let err = concat_tables(&left, &right).unwrap_err();
    assert_eq!(err.position(), 1);
    assert_eq!(
        err.divergence,
        Divergence::Tag {
            position: 1,
            left: ColumnType::String,
            right: ColumnType::Boolean,
        }
    );
    assert_eq!(
        err.to_string(),
        "schema mismatch: column 1 differs: left is string, right is boolean"
    );
}

#[test]
fn concat_rejects_length_mismatch() {
    let left = id_label(&[]);
    let right = Table::empty(Schema::from_types(&[ColumnType::Integer]));
    let err = concat_tables(&left, &right).unwrap_err();
    assert!(err.divergence.is_length_mismatch());
    assert_eq!(err.position(), 1);
    assert_eq!(err.divergence.left_tag(), None);
}

#[test]
fn concat_all_stacks_every_table() {
    let merged = concat_all(&[
        id_label(&[(1, "a")]),
        id_label(&[]),
        id_label(&[(2, "b"), (3, "c")]),
    ])
    .unwrap();
    let ids = merged.column(0).map(|cell| cell.cloned()).collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            Some(Value::Integer(1)),
            Some(Value::Integer(2)),
            Some(Value::Integer(3))
        ]
    );
}

#[test]
fn concat_all_reports_which_table_diverged() {
    let err = concat_all(&[
        id_label(&[(1, "a")]),
        single(ColumnType::Integer, vec![Value::Integer(2)]),
    ])
    .unwrap_err();
    assert!(matches!(err, ConcatError::Schema { table_index: 1, .. }));
    assert!(err.to_string().starts_with("table 1 does not match"));
}

#[test]
fn zip_combines_columns_row_by_row() {
    let ids = single(
        ColumnType::Integer,
        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)],
    );
    let names = single(
        ColumnType::String,
        vec![
            Value::String("x".into()),
            Value::String("y".into()),
            Value::String("z".into()),
        ],
    );

    let zipped = zip_columns(&ids, &names).expect("row counts match");
    assert_eq!(zipped.row_count(), 3);
    assert_eq!(
        zipped.schema().column_types(),
        vec![ColumnType::Integer, ColumnType::String]
    );
    assert_eq!(
        zipped.row(1),
        Some(&vec![
            Some(Value::Integer(2)),
            Some(Value::String("y".into()))
        ])
    );
}

#[test]
fn zip_rejects_different_row_counts() {
    let three = single(
        ColumnType::Integer,
        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)],
    );
    let two = single(
        ColumnType::String,
        vec![Value::String("a".into()), Value::String("b".into())],
    );
    assert_eq!(
        zip_columns(&three, &two).unwrap_err(),
        RowCountMismatchError { left: 3, right: 2 }
    );
}

#[test]
fn zip_ignores_schema_content() {
    let left = id_label(&[(1, "a")]);
    let zipped = zip_columns(&left, &left).expect("same table zips with itself");
    assert_eq!(zipped.column_count(), 4);
    assert_eq!(zipped.schema().headers(), vec!["id", "label", "id", "label"]);
}

proptest! {
    #[test]
    fn concat_row_count_is_the_sum(
        left in prop::collection::vec(any::<i64>(), 0..20),
        right in prop::collection::vec(any::<i64>(), 0..20),
    ) {
        let a = single(ColumnType::Integer, left.iter().copied().map(Value::Integer).collect());
        let b = single(ColumnType::Integer, right.iter().copied().map(Value::Integer).collect());
        let merged = concat_tables(&a, &b).unwrap();
        prop_assert_eq!(merged.row_count(), left.len() + right.len());
        let expected = left
            .iter()
            .chain(right.iter())
            .map(|v| Some(Value::Integer(*v)))
            .collect::<Vec<_>>();
        prop_assert_eq!(merged.column(0).map(|cell| cell.cloned()).collect::<Vec<_>>(), expected);
    }
}
