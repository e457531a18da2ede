//! ALTER TABLE validation for the smart add-column helper.
//!
//! Only a single-column `ADD COLUMN` alteration is accepted; anything else
//! is a usage error surfaced to the caller.

use crate::error::{SqlError, SqlResult};
use crate::insert::split_object_name;
use crate::parser::parse_single;
use sqlparser::ast::{AlterTable, AlterTableOperation, Statement};

/// A validated `ALTER TABLE ... ADD COLUMN` statement.
#[derive(Debug, Clone)]
pub struct AddColumnStatement {
    pub schema: Option<String>,
    pub table: String,
    /// Column being added, as written.
    pub column: String,
}

/// Parse and validate a single-column ADD COLUMN alteration.
pub fn parse_add_column(sql: &str) -> SqlResult<AddColumnStatement> {
    let statement = parse_single(sql)?;
    let (name, operations) = match statement {
        Statement::AlterTable(AlterTable {
            name, operations, ..
        }) => (name, operations),
        other => {
            return Err(SqlError::NotAnAlter {
                found: other.to_string(),
            })
        }
    };

    if operations.len() != 1 {
        return Err(SqlError::UnsupportedAlter {
            message: format!("expected exactly one alteration, found {}", operations.len()),
        });
    }

    let column = match &operations[0] {
        AlterTableOperation::AddColumn { column_def, .. } => column_def.name.value.clone(),
        other => {
            return Err(SqlError::UnsupportedAlter {
                message: format!("only ADD COLUMN is supported, found: {other}"),
            })
        }
    };

    let (schema, table) = split_object_name(&name);

    Ok(AddColumnStatement {
        schema,
        table,
        column,
    })
}

#[cfg(test)]
#[path = "alter_test.rs"]
mod tests;
