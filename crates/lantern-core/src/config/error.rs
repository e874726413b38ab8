//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The judge model's provider credential is not present in the
    /// environment, so every remote rank would fail at the provider.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// A limit that must be positive was configured as zero.
    #[error("{name} must be greater than zero")]
    ZeroLimit { name: &'static str },

    /// The remote candidate cap cannot exceed the extraction cap, or the
    /// judge would be shown candidates that were never produced.
    #[error("remote cap {remote_cap} exceeds extraction cap {max_candidates}")]
    CapOrdering {
        remote_cap: usize,
        max_candidates: usize,
    },
}
