//! Connection supply for the orchestrator.
//!
//! The engine opens a fresh connection for the bootstrap read and one per
//! version batch; it never holds a connection across versions. Autocommit
//! boundaries are owned by the engine via explicit BEGIN/COMMIT/ROLLBACK.

use crate::error::{UpgradeError, UpgradeResult};
use duckdb::Connection;
use std::path::{Path, PathBuf};

/// Supplies one connection per call.
pub trait ConnectionProvider {
    fn connection(&self) -> UpgradeResult<Connection>;
}

/// A DuckDB connection is its own provider: clones share the database.
///
/// This is the in-process path used with in-memory databases, where opening
/// by path again would create a different database.
impl ConnectionProvider for Connection {
    fn connection(&self) -> UpgradeResult<Connection> {
        self.try_clone()
            .map_err(|e| UpgradeError::Connection(e.to_string()))
    }
}

/// Opens the database file fresh on every call.
pub struct FileConnectionProvider {
    path: PathBuf,
}

impl FileConnectionProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConnectionProvider for FileConnectionProvider {
    fn connection(&self) -> UpgradeResult<Connection> {
        Connection::open(&self.path)
            .map_err(|e| UpgradeError::Connection(format!("{e}: {}", self.path.display())))
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
