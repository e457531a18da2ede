use super::*;

#[test]
fn test_parse_single_insert() {
    let stmt = parse_single("insert into t (id) values (1)").unwrap();
    assert!(matches!(stmt, Statement::Insert(_)));
}

#[test]
fn test_empty_sql_rejected() {
    assert!(matches!(parse_single("   "), Err(SqlError::EmptySql)));
}

#[test]
fn test_garbage_rejected() {
    assert!(matches!(
        parse_single("not really sql"),
        Err(SqlError::ParseError { .. })
    ));
}
