//! Unit discovery.
//!
//! [`UnitDiscovery`] is the seam the orchestrator resolves units through.
//! [`UnitRegistry`] is the explicit-registration implementation: callers
//! register each unit under a namespace up front, and discovery is a map
//! lookup. Implementations must be deterministic per namespace within a run.

use crate::error::{UpgradeError, UpgradeResult};
use crate::unit::UpgradeUnit;
use std::collections::HashMap;

/// Resolves a namespace to its upgrade units.
pub trait UnitDiscovery {
    fn discover(&self, namespace: &str) -> UpgradeResult<Vec<UpgradeUnit>>;
}

/// Explicit in-memory registration of units per namespace.
#[derive(Default)]
pub struct UnitRegistry {
    namespaces: HashMap<String, Vec<UpgradeUnit>>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit under a namespace.
    ///
    /// Rejects versions below 1 and identifiers already registered in the
    /// same namespace.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        unit: UpgradeUnit,
    ) -> UpgradeResult<()> {
        let namespace = namespace.into();
        if unit.version() < 1 {
            return Err(UpgradeError::Discovery {
                message: format!(
                    "unit '{}' declares version {}, must be >= 1",
                    unit.identifier(),
                    unit.version()
                ),
                namespace,
            });
        }

        let units = self.namespaces.entry(namespace.clone()).or_default();
        if units.iter().any(|u| u.identifier() == unit.identifier()) {
            return Err(UpgradeError::Discovery {
                message: format!("duplicate unit identifier '{}'", unit.identifier()),
                namespace,
            });
        }

        units.push(unit);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl UnitDiscovery for UnitRegistry {
    fn discover(&self, namespace: &str) -> UpgradeResult<Vec<UpgradeUnit>> {
        self.namespaces
            .get(namespace)
            .cloned()
            .ok_or_else(|| UpgradeError::Discovery {
                namespace: namespace.to_string(),
                message: "no units registered for this namespace".to_string(),
            })
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
