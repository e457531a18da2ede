//! Affected-row accounting for unit execution.
//!
//! [`TrackedConnection`] is an explicit decorator over a borrowed
//! connection: every statement routed through [`TrackedConnection::execute`]
//! is classified by its leading keyword and counted. The orchestrator
//! creates one tracker per unit execution and compares the running total
//! against the unit's declared ceiling.

use crate::error::UpgradeResult;
use crate::helpers;
use duckdb::{Connection, Params, Row};
use std::cell::RefCell;
use std::fmt;

/// Running totals of rows touched while a unit body executes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SqlExecutionStats {
    pub inserted: u64,
    pub updated: u64,
    pub deleted: u64,
}

impl SqlExecutionStats {
    pub fn total(&self) -> u64 {
        self.inserted + self.updated + self.deleted
    }
}

impl fmt::Display for SqlExecutionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inserted={}, updated={}, deleted={}, total={}",
            self.inserted,
            self.updated,
            self.deleted,
            self.total()
        )
    }
}

/// Connection decorator that counts affected rows per statement verb.
pub struct TrackedConnection<'a> {
    conn: &'a Connection,
    stats: RefCell<SqlExecutionStats>,
}

impl<'a> TrackedConnection<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            stats: RefCell::new(SqlExecutionStats::default()),
        }
    }

    /// Execute a statement, counting its affected rows when it is an
    /// INSERT, UPDATE, or DELETE.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> UpgradeResult<usize> {
        let count = helpers::execute_update(self.conn, sql, params)?;
        self.track(sql, count);
        Ok(count)
    }

    /// Execute DDL as an uncounted batch (DDL affects no rows).
    pub fn ddl(&self, sql: &str) -> UpgradeResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| crate::error::UpgradeError::Query(format!("{sql}: {e}")))
    }

    /// Run a query and map its first row.
    pub fn query_one<T, P, F>(&self, sql: &str, params: P, f: F) -> UpgradeResult<Option<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        helpers::query_one(self.conn, sql, params, f)
    }

    /// Run a query and map every row.
    pub fn query_list<T, P, F>(&self, sql: &str, params: P, f: F) -> UpgradeResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        helpers::query_list(self.conn, sql, params, f)
    }

    /// The underlying connection, for catalog lookups that should not be
    /// counted. Unit bodies must not commit, roll back, or close it.
    pub fn raw(&self) -> &Connection {
        self.conn
    }

    /// Snapshot of the accumulated counts.
    pub fn stats(&self) -> SqlExecutionStats {
        *self.stats.borrow()
    }

    pub fn total_affected(&self) -> u64 {
        self.stats.borrow().total()
    }

    fn track(&self, sql: &str, count: usize) {
        let Some(verb) = sql.trim_start().split_whitespace().next() else {
            return;
        };
        let mut stats = self.stats.borrow_mut();
        if verb.eq_ignore_ascii_case("insert") {
            stats.inserted += count as u64;
        } else if verb.eq_ignore_ascii_case("update") {
            stats.updated += count as u64;
        } else if verb.eq_ignore_ascii_case("delete") {
            stats.deleted += count as u64;
        }
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
