//! dbup-core - Core library for dbup
//!
//! This crate provides the validated upgrade configuration and the
//! intra-version dependency DAG used by the upgrade engine. It has no
//! database dependencies.

pub mod config;
pub mod dag;
pub mod error;

pub use config::{UpgradeConfig, UpgradeConfigBuilder, CONFIG_CURRENT_VERSION};
pub use dag::UnitDag;
pub use error::{CoreError, CoreResult};
