//! Core error types for humancalc-core.
//!
//! Round errors are reported to the driver as values; none of them ends the
//! session.

use std::path::PathBuf;
use thiserror::Error;

use crate::quiz::Phase;

/// Core error type for humancalc-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Round lifecycle errors
    #[error("Round error: {0}")]
    Round(#[from] RoundError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session store errors
    #[error("Session store error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the round state machine and question generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    /// No operator is selected; the player must pick at least one.
    #[error("choose at least one operation")]
    NoOperatorSelected,

    /// A division question was built with a zero divisor.
    #[error("divisor must not be zero")]
    ZeroDivisor,

    /// The entitlement gate has not granted play for this session.
    #[error("session is locked; unlock it before starting a round")]
    Locked,

    /// The requested action is not valid in the current phase.
    #[error("cannot {action} while {phase}")]
    InvalidTransition { phase: Phase, action: &'static str },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
