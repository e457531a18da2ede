//! Upgrade-unit descriptors.
//!
//! A unit is one versioned, idempotent mutation step: an identifier, the
//! version it belongs to, an optional same-version predecessor, an
//! affected-row ceiling, and a body closure. Bodies receive a narrow
//! [`UpgradeContext`] plus the batch's tracked connection; they must not
//! commit, roll back, or close the connection themselves.

use crate::error::UpgradeResult;
use crate::stats::TrackedConnection;
use std::fmt;
use std::sync::Arc;

/// Default per-unit affected-row ceiling.
pub const DEFAULT_MAX_AFFECTED_RECORDS: i64 = 100;

/// Ceiling value that disables the affected-row check.
pub const UNLIMITED_AFFECTED_RECORDS: i64 = -1;

type UnitBody =
    dyn Fn(&UpgradeContext<'_>, &TrackedConnection<'_>) -> UpgradeResult<()> + Send + Sync;

/// What a unit body may see of the run: its own identity, for logging.
pub struct UpgradeContext<'a> {
    identifier: &'a str,
    version: i64,
}

impl<'a> UpgradeContext<'a> {
    pub(crate) fn new(identifier: &'a str, version: i64) -> Self {
        Self {
            identifier,
            version,
        }
    }

    pub fn identifier(&self) -> &str {
        self.identifier
    }

    pub fn version(&self) -> i64 {
        self.version
    }
}

/// Immutable descriptor of one upgrade step.
#[derive(Clone)]
pub struct UpgradeUnit {
    identifier: String,
    version: i64,
    after: Option<String>,
    max_affected_records: i64,
    body: Arc<UnitBody>,
}

impl UpgradeUnit {
    pub fn new<F>(identifier: impl Into<String>, version: i64, body: F) -> Self
    where
        F: Fn(&UpgradeContext<'_>, &TrackedConnection<'_>) -> UpgradeResult<()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            identifier: identifier.into(),
            version,
            after: None,
            max_affected_records: DEFAULT_MAX_AFFECTED_RECORDS,
            body: Arc::new(body),
        }
    }

    /// Declare a same-version predecessor this unit must run after.
    pub fn after(mut self, predecessor: impl Into<String>) -> Self {
        self.after = Some(predecessor.into());
        self
    }

    /// Override the affected-row ceiling. [`UNLIMITED_AFFECTED_RECORDS`]
    /// disables the check.
    pub fn max_affected_records(mut self, limit: i64) -> Self {
        self.max_affected_records = limit;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn predecessor(&self) -> Option<&str> {
        self.after.as_deref()
    }

    pub fn record_limit(&self) -> i64 {
        self.max_affected_records
    }

    pub(crate) fn run(
        &self,
        ctx: &UpgradeContext<'_>,
        conn: &TrackedConnection<'_>,
    ) -> UpgradeResult<()> {
        (self.body)(ctx, conn)
    }
}

impl fmt::Debug for UpgradeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpgradeUnit")
            .field("identifier", &self.identifier)
            .field("version", &self.version)
            .field("after", &self.after)
            .field("max_affected_records", &self.max_affected_records)
            .finish_non_exhaustive()
    }
}
