//! Error types for the upgrade engine.

use dbup_core::CoreError;
use dbup_sql::SqlError;
use thiserror::Error;

/// Upgrade engine errors.
#[derive(Error, Debug)]
pub enum UpgradeError {
    /// Failed to open or clone a database connection (U001).
    #[error("[U001] Database connection failed: {0}")]
    Connection(String),

    /// Transaction management error (U002).
    #[error("[U002] Transaction failed: {0}")]
    Transaction(String),

    /// SQL execution error (U003).
    #[error("[U003] Query failed: {0}")]
    Query(String),

    /// The discovery collaborator could not resolve a namespace (U004).
    #[error("[U004] Unit discovery failed for namespace '{namespace}': {message}")]
    Discovery { namespace: String, message: String },

    /// Cycle among one version's units (U005).
    #[error("[U005] Circular dependency among units of version {version}: {cycle}")]
    CircularDependency { version: i64, cycle: String },

    /// A unit mutated more rows than its declared ceiling allows (U006).
    #[error("[U006] Unit '{unit}' affected {affected} records, exceeding its limit of {limit}")]
    RecordLimitExceeded {
        unit: String,
        affected: u64,
        limit: i64,
    },

    /// A unit body failed; the original error is preserved as cause (U007).
    #[error("[U007] Unit '{unit}' failed")]
    UnitExecution {
        unit: String,
        #[source]
        source: Box<UpgradeError>,
    },

    /// Smart insert needs a primary key the table doesn't have (U008).
    #[error("[U008] No primary key on table '{table}', use smart_insert_with_unique_columns")]
    NoPrimaryKey { table: String },

    /// A key column's literal is NULL (U009).
    #[error("[U009] NULL value for key column '{column}'")]
    NullKeyValue { column: String },

    /// A key column is absent from the INSERT's column list (U010).
    #[error("[U010] Key column '{column}' is not named in the INSERT column list")]
    KeyColumnMissing { column: String },

    /// smart_insert_with_unique_columns called without columns (U011).
    #[error("[U011] No unique columns supplied")]
    NoUniqueColumns,

    /// Configuration or dependency-graph error from dbup-core (U012).
    #[error("[U012] {0}")]
    Core(#[from] CoreError),

    /// Statement analysis error from dbup-sql (U013).
    #[error("[U013] {0}")]
    Sql(#[from] SqlError),

    /// DuckDB driver error with preserved source chain (U014).
    #[error("[U014] DuckDB error")]
    DuckDb(#[source] duckdb::Error),
}

/// Result type alias for [`UpgradeError`].
pub type UpgradeResult<T> = Result<T, UpgradeError>;

impl From<duckdb::Error> for UpgradeError {
    fn from(err: duckdb::Error) -> Self {
        UpgradeError::DuckDb(err)
    }
}
