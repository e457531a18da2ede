//! INSERT statement decomposition.
//!
//! The smart-insert helpers re-issue the statement as a parameterized
//! `INSERT INTO t (cols) VALUES (?, ...)` per tuple, so every value must be
//! a bindable literal.

use crate::error::{SqlError, SqlResult};
use crate::literal::Literal;
use crate::parser::parse_single;
use sqlparser::ast::{ObjectName, ObjectNamePart, SetExpr, Statement, TableObject};

/// A decomposed single- or multi-row INSERT.
#[derive(Debug, Clone)]
pub struct InsertStatement {
    /// Schema qualifier, when the table name carried one.
    pub schema: Option<String>,
    pub table: String,
    /// Column names, lowercased.
    pub columns: Vec<String>,
    /// One literal tuple per VALUES row.
    pub rows: Vec<Vec<Literal>>,
}

impl InsertStatement {
    /// Position of `name` in the column list, matched case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.columns.iter().position(|c| *c == name)
    }

    /// Table name with its schema qualifier, if any.
    pub fn qualified_table(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.table),
            None => self.table.clone(),
        }
    }
}

/// Parse an INSERT statement into its table, columns, and literal rows.
pub fn parse_insert(sql: &str) -> SqlResult<InsertStatement> {
    let statement = parse_single(sql)?;
    let insert = match statement {
        Statement::Insert(insert) => insert,
        other => {
            return Err(SqlError::NotAnInsert {
                found: other.to_string(),
            })
        }
    };

    let (schema, table) = match &insert.table {
        TableObject::TableName(name) => split_object_name(name),
        other => {
            return Err(SqlError::NotAnInsert {
                found: other.to_string(),
            })
        }
    };

    let columns: Vec<String> = insert
        .columns
        .iter()
        .map(|c| c.value.to_lowercase())
        .collect();
    if columns.is_empty() {
        return Err(SqlError::MissingColumnList {
            statement: sql.to_string(),
        });
    }

    let source = insert.source.as_ref().ok_or_else(|| SqlError::NoInsertValues {
        statement: sql.to_string(),
    })?;
    let values = match source.body.as_ref() {
        SetExpr::Values(values) => values,
        _ => {
            return Err(SqlError::NoInsertValues {
                statement: sql.to_string(),
            })
        }
    };
    if values.rows.is_empty() {
        return Err(SqlError::NoInsertValues {
            statement: sql.to_string(),
        });
    }

    let mut rows = Vec::with_capacity(values.rows.len());
    for tuple in &values.rows {
        if tuple.len() != columns.len() {
            return Err(SqlError::ColumnCountMismatch {
                columns: columns.len(),
                values: tuple.len(),
            });
        }
        let literals = tuple
            .iter()
            .map(Literal::from_expr)
            .collect::<SqlResult<Vec<_>>>()?;
        rows.push(literals);
    }

    Ok(InsertStatement {
        schema,
        table,
        columns,
        rows,
    })
}

/// Split `schema.table` into its qualifier and base name.
pub(crate) fn split_object_name(name: &ObjectName) -> (Option<String>, String) {
    let parts: Vec<String> = name
        .0
        .iter()
        .map(|part| match part {
            ObjectNamePart::Identifier(ident) => ident.value.clone(),
            other => other.to_string(),
        })
        .collect();
    match parts.split_last() {
        Some((table, rest)) if !rest.is_empty() => (Some(rest.join(".")), table.clone()),
        Some((table, _)) => (None, table.clone()),
        None => (None, String::new()),
    }
}

#[cfg(test)]
#[path = "insert_test.rs"]
mod tests;
