//! Parameterized query primitives and catalog lookups.
//!
//! Shared by the ledger, the smart helpers, and upgrade-unit bodies. All
//! functions operate on a borrowed connection and never manage transaction
//! boundaries themselves; see [`with_transaction`] for those.

use crate::error::{UpgradeError, UpgradeResult};
use duckdb::{Connection, Params, Row};

/// Execute a row-affecting statement, returning the affected-row count.
pub fn execute_update<P: Params>(conn: &Connection, sql: &str, params: P) -> UpgradeResult<usize> {
    conn.execute(sql, params)
        .map_err(|e| UpgradeError::Query(format!("{sql}: {e}")))
}

/// Run a query and map its first row, or `None` when it returns nothing.
pub fn query_one<T, P, F>(conn: &Connection, sql: &str, params: P, f: F) -> UpgradeResult<Option<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> duckdb::Result<T>,
{
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| UpgradeError::Query(format!("{sql}: {e}")))?;
    let mut rows = stmt
        .query_map(params, f)
        .map_err(|e| UpgradeError::Query(format!("{sql}: {e}")))?;
    match rows.next() {
        Some(row) => Ok(Some(
            row.map_err(|e| UpgradeError::Query(format!("{sql}: {e}")))?,
        )),
        None => Ok(None),
    }
}

/// Run a query and map every row.
pub fn query_list<T, P, F>(conn: &Connection, sql: &str, params: P, f: F) -> UpgradeResult<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> duckdb::Result<T>,
{
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| UpgradeError::Query(format!("{sql}: {e}")))?;
    let rows = stmt
        .query_map(params, f)
        .map_err(|e| UpgradeError::Query(format!("{sql}: {e}")))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| UpgradeError::Query(format!("{sql}: {e}")))
}

/// Execute an INSERT and return its generated `id` via a RETURNING clause.
pub fn insert_returning_id<P: Params>(conn: &Connection, sql: &str, params: P) -> UpgradeResult<i64> {
    let sql = format!("{sql} RETURNING id");
    query_one(conn, &sql, params, |row| row.get(0))?
        .ok_or_else(|| UpgradeError::Query(format!("no generated id returned: {sql}")))
}

/// Check whether a table exists, matching the name case-insensitively.
///
/// Unqualified names are looked up in the `main` schema.
pub fn table_exists(conn: &Connection, name: &str) -> UpgradeResult<bool> {
    let (schema, table) = split_qualified(name);
    let count: Option<i64> = query_one(
        conn,
        "SELECT count(*) FROM information_schema.tables \
         WHERE lower(table_schema) = lower(?) AND lower(table_name) = lower(?)",
        [schema.unwrap_or("main"), table],
        |row| row.get(0),
    )?;
    Ok(count.unwrap_or(0) > 0)
}

/// Execute `ddl` unless the table already exists.
///
/// The DDL runs as a batch so templates may carry auxiliary statements
/// (sequences) alongside the CREATE TABLE.
pub fn create_table_if_not_exists(conn: &Connection, name: &str, ddl: &str) -> UpgradeResult<()> {
    if table_exists(conn, name)? {
        return Ok(());
    }
    log::debug!("creating table {name}");
    conn.execute_batch(ddl)
        .map_err(|e| UpgradeError::Query(format!("create table {name} failed: {e}")))
}

/// Check whether a column exists on a table, case-insensitively.
pub fn column_exists(
    conn: &Connection,
    schema: Option<&str>,
    table: &str,
    column: &str,
) -> UpgradeResult<bool> {
    let count: Option<i64> = query_one(
        conn,
        "SELECT count(*) FROM information_schema.columns \
         WHERE lower(table_schema) = lower(?) AND lower(table_name) = lower(?) \
           AND lower(column_name) = lower(?)",
        [schema.unwrap_or("main"), table, column],
        |row| row.get(0),
    )?;
    Ok(count.unwrap_or(0) > 0)
}

/// Primary-key column names of a table, lowercased, in declaration order.
pub fn primary_key_columns(conn: &Connection, table: &str) -> UpgradeResult<Vec<String>> {
    let sql = format!(
        "SELECT name FROM pragma_table_info('{}') WHERE pk",
        table.replace('\'', "''")
    );
    let columns = query_list(conn, &sql, [], |row| row.get::<_, String>(0))?;
    Ok(columns.into_iter().map(|c| c.to_lowercase()).collect())
}

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
pub fn with_transaction<T, F>(conn: &Connection, body: F) -> UpgradeResult<T>
where
    F: FnOnce(&Connection) -> UpgradeResult<T>,
{
    conn.execute_batch("BEGIN TRANSACTION")
        .map_err(|e| UpgradeError::Transaction(format!("BEGIN failed: {e}")))?;

    let result = body(conn);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = conn.execute_batch("COMMIT") {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(UpgradeError::Transaction(format!(
                    "COMMIT failed: {commit_err}"
                )));
            }
        }
        Err(_) => {
            let _ = conn.execute_batch("ROLLBACK");
        }
    }
    result
}

/// Split `schema.table` into its qualifier and base name.
fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

#[cfg(test)]
#[path = "helpers_test.rs"]
mod tests;
