//! Upgrade orchestration.
//!
//! [`DbUpgrader::upgrade`] runs discovery, bootstraps the bookkeeping
//! tables, recovers recently missed versions, then advances version by
//! version toward the target. Each version executes as one transactional
//! batch: its units topologically ordered by their `after` edges, already
//! recorded or skip-listed units passed over, and the ledger ticked inside
//! the same transaction. The first error rolls back the open batch and
//! aborts the run.

use crate::error::{UpgradeError, UpgradeResult};
use crate::helpers;
use crate::ledger::HistoryLedger;
use crate::provider::ConnectionProvider;
use crate::registry::UnitDiscovery;
use crate::stats::TrackedConnection;
use crate::unit::{UpgradeContext, UpgradeUnit};
use dbup_core::{CoreError, UnitDag, UpgradeConfig};
use duckdb::Connection;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Named upgrade run over one database.
pub struct DbUpgrader<P, D> {
    name: String,
    provider: P,
    discovery: D,
    config: UpgradeConfig,
}

impl<P: ConnectionProvider, D: UnitDiscovery> DbUpgrader<P, D> {
    pub fn new(name: impl Into<String>, provider: P, discovery: D, config: UpgradeConfig) -> Self {
        Self {
            name: name.into(),
            provider,
            discovery,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &UpgradeConfig {
        &self.config
    }

    /// Run the upgrade to the configured target version.
    pub fn upgrade(&self) -> UpgradeResult<()> {
        let units = self.discovery.discover(self.config.namespace())?;
        let by_version = self.group_by_version(units)?;
        let ledger = HistoryLedger::new(&self.config);

        // Bootstrap on a short-lived connection; the read is outside any
        // batch transaction.
        let current = {
            let conn = self.provider.connection()?;
            ledger.ensure_tables(&conn)?;
            ledger.current_version(&conn)?
        };
        log::info!(
            "[{}] current version {current}, target {}",
            self.name,
            self.config.target_version()
        );

        self.recover_missed_versions(&ledger, &by_version, current)?;

        let mut version = current;
        while version <= self.config.target_version() {
            if let Some(units) = by_version.get(&version) {
                self.execute_version(&ledger, version, units, true)?;
            }
            version += 1;
        }

        log::info!("[{}] upgrade complete", self.name);
        Ok(())
    }

    /// Group discovered units by version, rejecting duplicate identifiers
    /// and versions below 1. Discovery implementations other than
    /// [`UnitRegistry`](crate::registry::UnitRegistry) are not trusted to
    /// have validated versions themselves.
    fn group_by_version(
        &self,
        units: Vec<UpgradeUnit>,
    ) -> UpgradeResult<BTreeMap<i64, Vec<UpgradeUnit>>> {
        let mut seen = HashSet::new();
        let mut by_version: BTreeMap<i64, Vec<UpgradeUnit>> = BTreeMap::new();
        for unit in units {
            if unit.version() < 1 {
                return Err(UpgradeError::Discovery {
                    namespace: self.config.namespace().to_string(),
                    message: format!(
                        "unit '{}' declares version {}, must be >= 1",
                        unit.identifier(),
                        unit.version()
                    ),
                });
            }
            if !seen.insert(unit.identifier().to_string()) {
                return Err(UpgradeError::Discovery {
                    namespace: self.config.namespace().to_string(),
                    message: format!("duplicate unit identifier '{}'", unit.identifier()),
                });
            }
            by_version.entry(unit.version()).or_default().push(unit);
        }
        Ok(by_version)
    }

    /// Re-run versions recently passed by the ledger whose units are not all
    /// in history. Recovery batches never advance the ledger.
    fn recover_missed_versions(
        &self,
        ledger: &HistoryLedger<'_>,
        by_version: &BTreeMap<i64, Vec<UpgradeUnit>>,
        current: i64,
    ) -> UpgradeResult<()> {
        let scan = self.config.potential_miss_version_count();
        if scan <= 0 {
            return Ok(());
        }

        let mut missed = Vec::new();
        {
            let conn = self.provider.connection()?;
            for offset in 1..=scan {
                let version = current - offset;
                if version < 1 {
                    break;
                }
                let Some(units) = by_version.get(&version) else {
                    continue;
                };
                for unit in units {
                    if !ledger.has_executed(&conn, unit.identifier())? {
                        missed.push(version);
                        break;
                    }
                }
            }
        }

        for version in missed {
            log::warn!(
                "[{}] version {version} has unexecuted units, recovering",
                self.name
            );
            self.execute_version(ledger, version, &by_version[&version], false)?;
        }
        Ok(())
    }

    /// Execute one version's units as a single transaction, advancing the
    /// ledger on success when `advance` is set.
    fn execute_version(
        &self,
        ledger: &HistoryLedger<'_>,
        version: i64,
        units: &[UpgradeUnit],
        advance: bool,
    ) -> UpgradeResult<()> {
        let order = ordered_identifiers(version, units)?;
        let by_id: HashMap<&str, &UpgradeUnit> =
            units.iter().map(|u| (u.identifier(), u)).collect();

        let conn = self.provider.connection()?;
        helpers::with_transaction(&conn, |conn| {
            for identifier in &order {
                let unit = by_id[identifier.as_str()];
                if self.config.skip_units().contains(identifier) {
                    log::warn!("[{}] unit {identifier} is skip-listed", self.name);
                    continue;
                }
                if self.config.dry_run() {
                    log::info!(
                        "[{}] dry run: would execute unit {identifier} for version {version}",
                        self.name
                    );
                    continue;
                }
                if ledger.has_executed(conn, identifier)? {
                    log::debug!("[{}] unit {identifier} already in history", self.name);
                    continue;
                }
                self.execute_unit(conn, ledger, unit)?;
            }

            if advance {
                if self.config.dry_run() {
                    log::info!("[{}] dry run: would tick version to {version}", self.name);
                } else {
                    ledger.set_version(conn, version)?;
                    log::info!("[{}] version ticked to {version}", self.name);
                }
            }
            Ok(())
        })
    }

    /// Run one unit body under a tracked connection, record it in history,
    /// and enforce its affected-row ceiling.
    fn execute_unit(
        &self,
        conn: &Connection,
        ledger: &HistoryLedger<'_>,
        unit: &UpgradeUnit,
    ) -> UpgradeResult<()> {
        let identifier = unit.identifier();
        log::info!("[{}] executing unit {identifier}", self.name);

        let tracked = TrackedConnection::new(conn);
        let ctx = UpgradeContext::new(identifier, unit.version());
        unit.run(&ctx, &tracked)
            .map_err(|e| UpgradeError::UnitExecution {
                unit: identifier.to_string(),
                source: Box::new(e),
            })?;

        ledger.record(conn, identifier)?;

        let limit = unit.record_limit();
        let affected = tracked.total_affected();
        if limit >= 0 && affected > limit as u64 {
            return Err(UpgradeError::RecordLimitExceeded {
                unit: identifier.to_string(),
                affected,
                limit,
            });
        }

        log::info!("[{}] unit {identifier} done: {}", self.name, tracked.stats());
        Ok(())
    }
}

/// Topologically order one version's units by their `after` edges.
fn ordered_identifiers(version: i64, units: &[UpgradeUnit]) -> UpgradeResult<Vec<String>> {
    let map_cycle = |e: CoreError| match e {
        CoreError::CircularDependency { cycle } => {
            UpgradeError::CircularDependency { version, cycle }
        }
        other => UpgradeError::Core(other),
    };

    let predecessors: HashMap<String, Vec<String>> = units
        .iter()
        .map(|u| {
            (
                u.identifier().to_string(),
                u.predecessor().map(String::from).into_iter().collect(),
            )
        })
        .collect();

    let dag = UnitDag::build(&predecessors).map_err(map_cycle)?;
    dag.topological_order().map_err(map_cycle)
}

#[cfg(test)]
#[path = "upgrader_test.rs"]
mod tests;
