//! Error types for dbup-sql

use thiserror::Error;

/// SQL analysis errors.
#[derive(Error, Debug)]
pub enum SqlError {
    /// S001: sqlparser rejected the statement text
    #[error("[S001] SQL parse error: {message}")]
    ParseError { message: String },

    /// S002: empty input
    #[error("[S002] Empty SQL statement")]
    EmptySql,

    /// S003: a different statement kind was required
    #[error("[S003] Expected an INSERT statement, found: {found}")]
    NotAnInsert { found: String },

    /// S004: a different statement kind was required
    #[error("[S004] Expected an ALTER TABLE statement, found: {found}")]
    NotAnAlter { found: String },

    /// S005: the alteration is not a single-column ADD COLUMN
    #[error("[S005] Unsupported ALTER TABLE: {message}")]
    UnsupportedAlter { message: String },

    /// S006: INSERT without a VALUES list
    #[error("[S006] No insert values found in: {statement}")]
    NoInsertValues { statement: String },

    /// S007: a value expression has no literal mapping
    #[error("[S007] Unsupported expression in VALUES list: {expression}")]
    UnsupportedExpression { expression: String },

    /// S008: VALUES tuple length differs from the column list
    #[error("[S008] Value tuple has {values} values but {columns} columns are named")]
    ColumnCountMismatch { columns: usize, values: usize },

    /// S009: INSERT without an explicit column list
    #[error("[S009] INSERT must name its columns: {statement}")]
    MissingColumnList { statement: String },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
