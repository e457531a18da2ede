//! Thin wrapper over sqlparser with the DuckDB dialect.

use crate::error::{SqlError, SqlResult};
use sqlparser::ast::Statement;
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;

/// Parse SQL and return the single statement it must contain.
pub fn parse_single(sql: &str) -> SqlResult<Statement> {
    let sql = sql.trim();
    if sql.is_empty() {
        return Err(SqlError::EmptySql);
    }

    let statements = Parser::parse_sql(&DuckDbDialect {}, sql).map_err(|e| SqlError::ParseError {
        message: e.to_string(),
    })?;

    statements.into_iter().next().ok_or(SqlError::EmptySql)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
