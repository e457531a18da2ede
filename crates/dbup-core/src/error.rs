//! Error types for dbup-core

use thiserror::Error;

/// Core error type for dbup
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Invalid or missing configuration value
    #[error("[C001] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C002: Circular dependency detected among a version's units
    #[error("[C002] Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
