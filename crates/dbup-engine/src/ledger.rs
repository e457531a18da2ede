//! Version ledger and execution history.
//!
//! Two bookkeeping tables live in the target database: the configuration
//! table holds the applied-version counter under the `current_version` key,
//! and the history table records every unit identifier that ever executed
//! successfully. Both are created from the configured DDL templates when
//! absent.

use crate::error::{UpgradeError, UpgradeResult};
use crate::helpers;
use dbup_core::{UpgradeConfig, CONFIG_CURRENT_VERSION};
use duckdb::{params, Connection};

/// Per-run view over the bookkeeping tables of one database.
pub struct HistoryLedger<'a> {
    config: &'a UpgradeConfig,
}

impl<'a> HistoryLedger<'a> {
    pub fn new(config: &'a UpgradeConfig) -> Self {
        Self { config }
    }

    /// Create the configuration and history tables when absent.
    pub fn ensure_tables(&self, conn: &Connection) -> UpgradeResult<()> {
        helpers::create_table_if_not_exists(
            conn,
            self.config.configuration_table(),
            &self.config.configuration_table_ddl(),
        )?;
        helpers::create_table_if_not_exists(
            conn,
            self.config.history_table(),
            &self.config.history_table_ddl(),
        )
    }

    /// Read the applied-version counter, seeding a `0` row on first use.
    pub fn current_version(&self, conn: &Connection) -> UpgradeResult<i64> {
        let sql = format!(
            "SELECT value FROM {} WHERE key_name = ?",
            self.config.configuration_table()
        );
        let value: Option<String> =
            helpers::query_one(conn, &sql, params![CONFIG_CURRENT_VERSION], |row| row.get(0))?;

        match value {
            Some(raw) => raw.parse::<i64>().map_err(|e| {
                UpgradeError::Query(format!(
                    "corrupt {CONFIG_CURRENT_VERSION} value '{raw}': {e}"
                ))
            }),
            None => {
                let insert = format!(
                    "INSERT INTO {} (key_name, value) VALUES (?, ?)",
                    self.config.configuration_table()
                );
                helpers::insert_returning_id(conn, &insert, params![CONFIG_CURRENT_VERSION, "0"])?;
                Ok(0)
            }
        }
    }

    /// Advance the applied-version counter.
    ///
    /// Must run inside the same transaction as the unit executions whose
    /// version it reflects.
    pub fn set_version(&self, conn: &Connection, version: i64) -> UpgradeResult<()> {
        let sql = format!(
            "UPDATE {} SET value = ?, gmt_modified = current_timestamp WHERE key_name = ?",
            self.config.configuration_table()
        );
        helpers::execute_update(
            conn,
            &sql,
            params![version.to_string(), CONFIG_CURRENT_VERSION],
        )?;
        Ok(())
    }

    /// Has this unit identifier ever executed successfully?
    pub fn has_executed(&self, conn: &Connection, identifier: &str) -> UpgradeResult<bool> {
        let sql = format!(
            "SELECT class_name FROM {} WHERE class_name = ?",
            self.config.history_table()
        );
        let found: Option<String> =
            helpers::query_one(conn, &sql, params![identifier], |row| row.get(0))?;
        Ok(found.is_some())
    }

    /// Record a successful execution.
    pub fn record(&self, conn: &Connection, identifier: &str) -> UpgradeResult<()> {
        let sql = format!(
            "INSERT INTO {} (application, class_name) VALUES (?, ?)",
            self.config.history_table()
        );
        helpers::execute_update(conn, &sql, params![self.config.application(), identifier])?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
