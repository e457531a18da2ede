use super::*;

fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE t (id INT, name VARCHAR)")
        .unwrap();
    conn
}

#[test]
fn test_insert_update_delete_classified() {
    let conn = test_conn();
    let tracked = TrackedConnection::new(&conn);

    tracked
        .execute("INSERT INTO t VALUES (1, 'a'), (2, 'b'), (3, 'c')", [])
        .unwrap();
    tracked
        .execute("update t set name = 'x' where id <= 2", [])
        .unwrap();
    tracked.execute("DELETE FROM t WHERE id = 3", []).unwrap();

    let stats = tracked.stats();
    assert_eq!(stats.inserted, 3);
    assert_eq!(stats.updated, 2);
    assert_eq!(stats.deleted, 1);
    assert_eq!(stats.total(), 6);
    assert_eq!(tracked.total_affected(), 6);
}

#[test]
fn test_non_dml_not_counted() {
    let conn = test_conn();
    let tracked = TrackedConnection::new(&conn);

    tracked.ddl("CREATE TABLE other (id INT)").unwrap();
    let rows = tracked
        .query_list("SELECT id FROM t", [], |row| row.get::<_, i64>(0))
        .unwrap();

    assert!(rows.is_empty());
    assert_eq!(tracked.stats(), SqlExecutionStats::default());
}

#[test]
fn test_fresh_tracker_starts_at_zero() {
    let conn = test_conn();
    {
        let tracked = TrackedConnection::new(&conn);
        tracked.execute("INSERT INTO t VALUES (1, 'a')", []).unwrap();
        assert_eq!(tracked.stats().inserted, 1);
    }
    let tracked = TrackedConnection::new(&conn);
    assert_eq!(tracked.total_affected(), 0);
}

#[test]
fn test_parameterized_execute_counted() {
    let conn = test_conn();
    let tracked = TrackedConnection::new(&conn);

    let count = tracked
        .execute(
            "INSERT INTO t (id, name) VALUES (?, ?)",
            duckdb::params![10, "ten"],
        )
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(tracked.stats().inserted, 1);
}

#[test]
fn test_display_format() {
    let stats = SqlExecutionStats {
        inserted: 2,
        updated: 1,
        deleted: 0,
    };
    assert_eq!(stats.to_string(), "inserted=2, updated=1, deleted=0, total=3");
}
