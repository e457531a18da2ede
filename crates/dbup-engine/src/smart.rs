//! Idempotent SQL helpers for upgrade-unit bodies.
//!
//! Each helper parses the statement it is given, consults the catalog, and
//! executes only the part that is still missing, so a unit can run safely
//! against a partially-upgraded or re-run database. They take the unit's
//! [`TrackedConnection`] so their mutations count toward the row ceiling.

use crate::error::{UpgradeError, UpgradeResult};
use crate::helpers;
use crate::stats::TrackedConnection;
use dbup_sql::{parse_add_column, parse_insert, InsertStatement, Literal};
use duckdb::params_from_iter;
use duckdb::types::Value;

/// Add a column unless it already exists.
///
/// `sql` must be a single-column `ALTER TABLE ... ADD COLUMN` statement.
/// Returns whether the alteration was executed.
pub fn smart_add_column(tracked: &TrackedConnection<'_>, sql: &str) -> UpgradeResult<bool> {
    let alter = parse_add_column(sql)?;
    if helpers::column_exists(
        tracked.raw(),
        alter.schema.as_deref(),
        &alter.table,
        &alter.column,
    )? {
        log::info!(
            "column {} already exists on {}, skipping: {sql}",
            alter.column,
            alter.table
        );
        return Ok(false);
    }

    tracked.execute(sql, [])?;
    Ok(true)
}

/// Insert only the VALUES tuples not already present, keyed by the table's
/// primary key. Returns the number of rows actually inserted.
pub fn smart_insert_with_primary_key(
    tracked: &TrackedConnection<'_>,
    sql: &str,
) -> UpgradeResult<usize> {
    let insert = parse_insert(sql)?;
    let key_columns = helpers::primary_key_columns(tracked.raw(), &insert.qualified_table())?;
    if key_columns.is_empty() {
        return Err(UpgradeError::NoPrimaryKey {
            table: insert.qualified_table(),
        });
    }
    insert_missing_rows(tracked, &insert, &key_columns)
}

/// Insert only the VALUES tuples not already present, keyed by the given
/// columns. Returns the number of rows actually inserted.
pub fn smart_insert_with_unique_columns(
    tracked: &TrackedConnection<'_>,
    sql: &str,
    unique_columns: &[&str],
) -> UpgradeResult<usize> {
    if unique_columns.is_empty() {
        return Err(UpgradeError::NoUniqueColumns);
    }
    let insert = parse_insert(sql)?;
    let key_columns: Vec<String> = unique_columns.iter().map(|c| c.to_lowercase()).collect();
    insert_missing_rows(tracked, &insert, &key_columns)
}

/// Existence-check each tuple against `key_columns` and insert the missing
/// ones through a parameterized single-row INSERT.
fn insert_missing_rows(
    tracked: &TrackedConnection<'_>,
    insert: &InsertStatement,
    key_columns: &[String],
) -> UpgradeResult<usize> {
    let table = insert.qualified_table();

    let key_indexes = key_columns
        .iter()
        .map(|column| {
            insert
                .column_index(column)
                .ok_or_else(|| UpgradeError::KeyColumnMissing {
                    column: column.clone(),
                })
        })
        .collect::<UpgradeResult<Vec<_>>>()?;

    let predicates: Vec<String> = key_columns.iter().map(|c| format!("{c} = ?")).collect();
    let existence_sql = format!(
        "SELECT count(1) FROM {table} WHERE {}",
        predicates.join(" AND ")
    );
    let placeholders = vec!["?"; insert.columns.len()].join(", ");
    let insert_sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        insert.columns.join(", "),
        placeholders
    );

    let mut inserted = 0;
    for row in &insert.rows {
        let mut key_values = Vec::with_capacity(key_indexes.len());
        for (&index, column) in key_indexes.iter().zip(key_columns) {
            let literal = &row[index];
            if literal.is_null() {
                return Err(UpgradeError::NullKeyValue {
                    column: column.clone(),
                });
            }
            key_values.push(bind_value(literal));
        }

        let existing: Option<i64> =
            tracked.query_one(&existence_sql, params_from_iter(key_values), |r| r.get(0))?;
        if existing.unwrap_or(0) > 0 {
            log::info!("record already exists, skipping insert into {table}");
            continue;
        }

        let values: Vec<Value> = row.iter().map(bind_value).collect();
        tracked.execute(&insert_sql, params_from_iter(values))?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Map a parsed literal to a bindable DuckDB value. Temporal literals bind
/// as text; DuckDB coerces them against DATE/TIME/TIMESTAMP columns.
fn bind_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) | Literal::Date(s) | Literal::Time(s) | Literal::Timestamp(s) => {
            Value::Text(s.clone())
        }
        Literal::Integer(i) => Value::BigInt(*i),
        Literal::Float(f) => Value::Double(*f),
        Literal::Null => Value::Null,
    }
}

#[cfg(test)]
#[path = "smart_test.rs"]
mod tests;
