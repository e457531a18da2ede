//! Validated configuration for one upgrade run.
//!
//! Built through [`UpgradeConfigBuilder`]; `build()` rejects missing or
//! invalid required fields before any database access happens.

use crate::error::{CoreError, CoreResult};
use std::collections::HashSet;

/// Key under which the applied-version counter is stored in the
/// configuration table.
pub const CONFIG_CURRENT_VERSION: &str = "current_version";

/// Default DDL for the history table. `%s` is replaced with the configured
/// table name (every occurrence, so the sequence name derives from it too).
const DEFAULT_HISTORY_TABLE_SQL: &str = "\
CREATE SEQUENCE %s_seq START 1;
CREATE TABLE %s (
    id BIGINT PRIMARY KEY DEFAULT nextval('%s_seq'),
    application VARCHAR(100) NOT NULL,
    class_name VARCHAR(200) NOT NULL UNIQUE,
    gmt_create TIMESTAMP DEFAULT current_timestamp
);";

/// Default DDL for the configuration table.
const DEFAULT_CONFIGURATION_TABLE_SQL: &str = "\
CREATE SEQUENCE %s_seq START 1;
CREATE TABLE %s (
    id BIGINT PRIMARY KEY DEFAULT nextval('%s_seq'),
    key_name VARCHAR(100) NOT NULL UNIQUE,
    value VARCHAR(500) NOT NULL,
    gmt_create TIMESTAMP DEFAULT current_timestamp,
    gmt_modified TIMESTAMP DEFAULT current_timestamp
);";

/// Immutable settings for one upgrade run.
#[derive(Debug, Clone)]
pub struct UpgradeConfig {
    namespace: String,
    target_version: i64,
    application: String,
    history_table: String,
    configuration_table: String,
    create_history_table_sql: String,
    create_configuration_table_sql: String,
    dry_run: bool,
    potential_miss_version_count: i64,
    skip_units: HashSet<String>,
}

impl UpgradeConfig {
    pub fn builder() -> UpgradeConfigBuilder {
        UpgradeConfigBuilder::default()
    }

    /// Namespace the discovery collaborator resolves units from.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Highest version this run is allowed to apply.
    pub fn target_version(&self) -> i64 {
        self.target_version
    }

    /// Application name, stored next to each history record so projects
    /// sharing a database don't collide.
    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn history_table(&self) -> &str {
        &self.history_table
    }

    pub fn configuration_table(&self) -> &str {
        &self.configuration_table
    }

    /// History-table DDL with the table name substituted in.
    pub fn history_table_ddl(&self) -> String {
        self.create_history_table_sql
            .replace("%s", &self.history_table)
    }

    /// Configuration-table DDL with the table name substituted in.
    pub fn configuration_table_ddl(&self) -> String {
        self.create_configuration_table_sql
            .replace("%s", &self.configuration_table)
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// How many versions below the current one the recovery scan revisits.
    /// Zero or negative disables the scan.
    pub fn potential_miss_version_count(&self) -> i64 {
        self.potential_miss_version_count
    }

    /// Unit identifiers excluded from execution.
    pub fn skip_units(&self) -> &HashSet<String> {
        &self.skip_units
    }
}

/// Builder for [`UpgradeConfig`].
#[derive(Debug, Default)]
pub struct UpgradeConfigBuilder {
    namespace: Option<String>,
    target_version: Option<i64>,
    application: Option<String>,
    history_table: Option<String>,
    configuration_table: Option<String>,
    create_history_table_sql: Option<String>,
    create_configuration_table_sql: Option<String>,
    dry_run: bool,
    potential_miss_version_count: Option<i64>,
    skip_units: HashSet<String>,
}

impl UpgradeConfigBuilder {
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn target_version(mut self, target_version: i64) -> Self {
        self.target_version = Some(target_version);
        self
    }

    pub fn application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    pub fn history_table(mut self, table: impl Into<String>) -> Self {
        self.history_table = Some(table.into());
        self
    }

    pub fn configuration_table(mut self, table: impl Into<String>) -> Self {
        self.configuration_table = Some(table.into());
        self
    }

    pub fn create_history_table_sql(mut self, sql: impl Into<String>) -> Self {
        self.create_history_table_sql = Some(sql.into());
        self
    }

    pub fn create_configuration_table_sql(mut self, sql: impl Into<String>) -> Self {
        self.create_configuration_table_sql = Some(sql.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn potential_miss_version_count(mut self, count: i64) -> Self {
        self.potential_miss_version_count = Some(count);
        self
    }

    /// Exclude a unit identifier from execution.
    pub fn skip_unit(mut self, identifier: impl Into<String>) -> Self {
        self.skip_units.insert(identifier.into());
        self
    }

    pub fn build(self) -> CoreResult<UpgradeConfig> {
        let namespace = require_non_empty(self.namespace, "namespace")?;
        let application = require_non_empty(self.application, "application")?;
        let target_version = self
            .target_version
            .ok_or_else(|| invalid("target_version must be set"))?;
        if target_version <= 0 {
            return Err(invalid("target_version must be > 0"));
        }

        let history_table = non_empty_or(self.history_table, "db_upgrade_history", "history_table")?;
        let configuration_table = non_empty_or(
            self.configuration_table,
            "db_upgrade_configuration",
            "configuration_table",
        )?;
        let create_history_table_sql = ddl_template(
            self.create_history_table_sql,
            DEFAULT_HISTORY_TABLE_SQL,
            "create_history_table_sql",
        )?;
        let create_configuration_table_sql = ddl_template(
            self.create_configuration_table_sql,
            DEFAULT_CONFIGURATION_TABLE_SQL,
            "create_configuration_table_sql",
        )?;

        Ok(UpgradeConfig {
            namespace,
            target_version,
            application,
            history_table,
            configuration_table,
            create_history_table_sql,
            create_configuration_table_sql,
            dry_run: self.dry_run,
            potential_miss_version_count: self.potential_miss_version_count.unwrap_or(10),
            skip_units: self.skip_units,
        })
    }
}

fn invalid(message: &str) -> CoreError {
    CoreError::ConfigInvalid {
        message: message.to_string(),
    }
}

fn require_non_empty(value: Option<String>, field: &str) -> CoreResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(invalid(&format!("{field} must be set"))),
    }
}

fn non_empty_or(value: Option<String>, default: &str, field: &str) -> CoreResult<String> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(invalid(&format!("{field} must not be empty"))),
    }
}

fn ddl_template(value: Option<String>, default: &str, field: &str) -> CoreResult<String> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if v.trim().is_empty() => Err(invalid(&format!("{field} must not be empty"))),
        Some(v) if !v.contains("%s") => Err(invalid(&format!(
            "{field} must contain a %s placeholder for the table name"
        ))),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
