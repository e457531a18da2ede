use super::*;

#[test]
fn test_single_row_insert() {
    let insert = parse_insert("insert into t (id) values (1)").unwrap();
    assert_eq!(insert.table, "t");
    assert_eq!(insert.schema, None);
    assert_eq!(insert.columns, vec!["id"]);
    assert_eq!(insert.rows, vec![vec![Literal::Integer(1)]]);
}

#[test]
fn test_multi_row_insert() {
    let insert =
        parse_insert("insert into students(id, name) values (2, 'Tom2'), (3, 'Tom3')").unwrap();
    assert_eq!(insert.table, "students");
    assert_eq!(insert.columns, vec!["id", "name"]);
    assert_eq!(
        insert.rows,
        vec![
            vec![Literal::Integer(2), Literal::String("Tom2".to_string())],
            vec![Literal::Integer(3), Literal::String("Tom3".to_string())],
        ]
    );
}

#[test]
fn test_column_names_lowercased() {
    let insert = parse_insert("insert into t (ID, Name) values (1, 'a')").unwrap();
    assert_eq!(insert.columns, vec!["id", "name"]);
    assert_eq!(insert.column_index("Id"), Some(0));
    assert_eq!(insert.column_index("NAME"), Some(1));
    assert_eq!(insert.column_index("missing"), None);
}

#[test]
fn test_schema_qualified_table() {
    let insert = parse_insert("insert into app.t (id) values (1)").unwrap();
    assert_eq!(insert.schema.as_deref(), Some("app"));
    assert_eq!(insert.table, "t");
    assert_eq!(insert.qualified_table(), "app.t");
}

#[test]
fn test_literal_shapes() {
    let insert = parse_insert(
        "insert into t (a, b, c, d, e) values ('x', -5, 1.5, NULL, DATE '2024-01-02')",
    )
    .unwrap();
    assert_eq!(
        insert.rows[0],
        vec![
            Literal::String("x".to_string()),
            Literal::Integer(-5),
            Literal::Float(1.5),
            Literal::Null,
            Literal::Date("2024-01-02".to_string()),
        ]
    );
}

#[test]
fn test_timestamp_literal() {
    let insert =
        parse_insert("insert into t (a) values (TIMESTAMP '2024-01-02 03:04:05')").unwrap();
    assert_eq!(
        insert.rows[0],
        vec![Literal::Timestamp("2024-01-02 03:04:05".to_string())]
    );
}

#[test]
fn test_function_value_rejected() {
    let result = parse_insert("insert into t (a) values (now())");
    assert!(matches!(
        result.unwrap_err(),
        SqlError::UnsupportedExpression { .. }
    ));
}

#[test]
fn test_non_insert_rejected() {
    let result = parse_insert("select * from t");
    assert!(matches!(result.unwrap_err(), SqlError::NotAnInsert { .. }));
}

#[test]
fn test_insert_from_select_rejected() {
    let result = parse_insert("insert into t (id) select id from s");
    assert!(matches!(
        result.unwrap_err(),
        SqlError::NoInsertValues { .. }
    ));
}

#[test]
fn test_missing_column_list_rejected() {
    let result = parse_insert("insert into t values (1)");
    assert!(matches!(
        result.unwrap_err(),
        SqlError::MissingColumnList { .. }
    ));
}

#[test]
fn test_column_count_mismatch_rejected() {
    let result = parse_insert("insert into t (a, b) values (1)");
    assert!(matches!(
        result.unwrap_err(),
        SqlError::ColumnCountMismatch {
            columns: 2,
            values: 1
        }
    ));
}
