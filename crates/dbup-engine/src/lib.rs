//! dbup-engine - schema-upgrade engine for DuckDB.
//!
//! Applies versioned, idempotent upgrade units to a database: units are
//! discovered per namespace, grouped by version, ordered by their declared
//! predecessors, and executed in per-version transactions. A configuration
//! table tracks the applied version counter and a history table records
//! every unit that ever ran, so re-running the engine is safe.

pub mod error;
pub mod helpers;
pub mod ledger;
pub mod provider;
pub mod registry;
pub mod smart;
pub mod stats;
pub mod unit;
pub mod upgrader;

pub use dbup_core::{UpgradeConfig, UpgradeConfigBuilder, CONFIG_CURRENT_VERSION};
pub use error::{UpgradeError, UpgradeResult};
pub use ledger::HistoryLedger;
pub use provider::{ConnectionProvider, FileConnectionProvider};
pub use registry::{UnitDiscovery, UnitRegistry};
pub use smart::{smart_add_column, smart_insert_with_primary_key, smart_insert_with_unique_columns};
pub use stats::{SqlExecutionStats, TrackedConnection};
pub use unit::{UpgradeContext, UpgradeUnit, DEFAULT_MAX_AFFECTED_RECORDS, UNLIMITED_AFFECTED_RECORDS};
pub use upgrader::DbUpgrader;
