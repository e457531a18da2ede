use super::*;

fn minimal() -> UpgradeConfigBuilder {
    UpgradeConfig::builder()
        .namespace("app.upgrades")
        .application("server")
        .target_version(3)
}

#[test]
fn test_defaults_applied() {
    let config = minimal().build().unwrap();

    assert_eq!(config.namespace(), "app.upgrades");
    assert_eq!(config.application(), "server");
    assert_eq!(config.target_version(), 3);
    assert_eq!(config.history_table(), "db_upgrade_history");
    assert_eq!(config.configuration_table(), "db_upgrade_configuration");
    assert_eq!(config.potential_miss_version_count(), 10);
    assert!(!config.dry_run());
    assert!(config.skip_units().is_empty());
}

#[test]
fn test_missing_namespace_rejected() {
    let result = UpgradeConfig::builder()
        .application("server")
        .target_version(1)
        .build();
    assert!(matches!(
        result.unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_blank_application_rejected() {
    let result = UpgradeConfig::builder()
        .namespace("app.upgrades")
        .application("  ")
        .target_version(1)
        .build();
    assert!(matches!(
        result.unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_non_positive_target_version_rejected() {
    let result = minimal().target_version(0).build();
    assert!(matches!(
        result.unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_ddl_template_requires_placeholder() {
    let result = minimal()
        .create_history_table_sql("CREATE TABLE history (id BIGINT)")
        .build();
    assert!(matches!(
        result.unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_ddl_substitutes_every_placeholder() {
    let config = minimal()
        .history_table("my_history")
        .create_history_table_sql("CREATE SEQUENCE %s_seq; CREATE TABLE %s (id BIGINT)")
        .build()
        .unwrap();

    let ddl = config.history_table_ddl();
    assert_eq!(
        ddl,
        "CREATE SEQUENCE my_history_seq; CREATE TABLE my_history (id BIGINT)"
    );
}

#[test]
fn test_default_ddl_names_the_configured_tables() {
    let config = minimal()
        .history_table("hist")
        .configuration_table("cfg")
        .build()
        .unwrap();

    assert!(config.history_table_ddl().contains("CREATE TABLE hist"));
    assert!(!config.history_table_ddl().contains("%s"));
    assert!(config.configuration_table_ddl().contains("CREATE TABLE cfg"));
    assert!(!config.configuration_table_ddl().contains("%s"));
}

#[test]
fn test_skip_units_collected() {
    let config = minimal()
        .skip_unit("V1BrokenUnit")
        .skip_unit("V2Other")
        .build()
        .unwrap();

    assert!(config.skip_units().contains("V1BrokenUnit"));
    assert!(config.skip_units().contains("V2Other"));
    assert_eq!(config.skip_units().len(), 2);
}
