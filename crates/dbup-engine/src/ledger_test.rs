use super::*;
use dbup_core::UpgradeConfig;

fn test_config() -> UpgradeConfig {
    UpgradeConfig::builder()
        .namespace("app")
        .application("demo")
        .target_version(3)
        .build()
        .unwrap()
}

fn test_conn() -> Connection {
    Connection::open_in_memory().unwrap()
}

#[test]
fn test_ensure_tables_is_idempotent() {
    let config = test_config();
    let ledger = HistoryLedger::new(&config);
    let conn = test_conn();

    ledger.ensure_tables(&conn).unwrap();
    ledger.ensure_tables(&conn).unwrap();

    assert!(helpers::table_exists(&conn, "db_upgrade_history").unwrap());
    assert!(helpers::table_exists(&conn, "db_upgrade_configuration").unwrap());
}

#[test]
fn test_current_version_seeds_zero() {
    let config = test_config();
    let ledger = HistoryLedger::new(&config);
    let conn = test_conn();
    ledger.ensure_tables(&conn).unwrap();

    assert_eq!(ledger.current_version(&conn).unwrap(), 0);

    // The seed row persists; a second read does not insert again.
    assert_eq!(ledger.current_version(&conn).unwrap(), 0);
    let rows: i64 = conn
        .query_row(
            "SELECT count(*) FROM db_upgrade_configuration",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_set_version_round_trips() {
    let config = test_config();
    let ledger = HistoryLedger::new(&config);
    let conn = test_conn();
    ledger.ensure_tables(&conn).unwrap();
    ledger.current_version(&conn).unwrap();

    ledger.set_version(&conn, 7).unwrap();

    assert_eq!(ledger.current_version(&conn).unwrap(), 7);
}

#[test]
fn test_record_and_has_executed() {
    let config = test_config();
    let ledger = HistoryLedger::new(&config);
    let conn = test_conn();
    ledger.ensure_tables(&conn).unwrap();

    assert!(!ledger.has_executed(&conn, "v1_create_users").unwrap());
    ledger.record(&conn, "v1_create_users").unwrap();
    assert!(ledger.has_executed(&conn, "v1_create_users").unwrap());

    let application: String = conn
        .query_row(
            "SELECT application FROM db_upgrade_history WHERE class_name = 'v1_create_users'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(application, "demo");
}

#[test]
fn test_custom_table_names() {
    let config = UpgradeConfig::builder()
        .namespace("app")
        .application("demo")
        .target_version(1)
        .history_table("my_history")
        .configuration_table("my_config")
        .build()
        .unwrap();
    let ledger = HistoryLedger::new(&config);
    let conn = test_conn();

    ledger.ensure_tables(&conn).unwrap();

    assert!(helpers::table_exists(&conn, "my_history").unwrap());
    assert!(helpers::table_exists(&conn, "my_config").unwrap());
    assert!(!helpers::table_exists(&conn, "db_upgrade_history").unwrap());
}
