use super::*;

#[test]
fn test_add_column() {
    let alter = parse_add_column("alter table users add column age int").unwrap();
    assert_eq!(alter.table, "users");
    assert_eq!(alter.schema, None);
    assert_eq!(alter.column, "age");
}

#[test]
fn test_add_column_schema_qualified() {
    let alter = parse_add_column("alter table app.users add column age int").unwrap();
    assert_eq!(alter.schema.as_deref(), Some("app"));
    assert_eq!(alter.table, "users");
}

#[test]
fn test_non_alter_rejected() {
    let result = parse_add_column("insert into t (id) values (1)");
    assert!(matches!(result.unwrap_err(), SqlError::NotAnAlter { .. }));
}

#[test]
fn test_multiple_alterations_rejected() {
    let result = parse_add_column("alter table t add column a int, add column b int");
    assert!(matches!(
        result.unwrap_err(),
        SqlError::UnsupportedAlter { .. }
    ));
}

#[test]
fn test_drop_column_rejected() {
    let result = parse_add_column("alter table t drop column a");
    assert!(matches!(
        result.unwrap_err(),
        SqlError::UnsupportedAlter { .. }
    ));
}

#[test]
fn test_parse_failure_surfaced() {
    let result = parse_add_column("alter nonsense");
    assert!(matches!(result.unwrap_err(), SqlError::ParseError { .. }));
}
