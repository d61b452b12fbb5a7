//! Error types for configuration, policy checkpoints and the environment boundary.
//!
//! The simulation tick itself is infallible; errors only arise where external
//! input enters the crate (files, integer actions).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating an [`EnvConfig`](crate::EnvConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot run with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised while loading a policy checkpoint.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read checkpoint {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed checkpoint: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported checkpoint version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Weight or bias tensor has the wrong dimensions.
    #[error("checkpoint `{tensor}` has shape {found}, expected {expected}")]
    Shape {
        tensor: &'static str,
        found: String,
        expected: String,
    },

    #[error("checkpoint `{tensor}` contains a non-finite value")]
    NonFinite { tensor: &'static str },
}

/// Errors at the environment boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("invalid action {0} (expected 0, 1 or 2)")]
    InvalidAction(u8),
}
