//! Configuration error definitions.
//!
//! This module defines the two error regimes of the configuration core. It provides:
//! 1. **Construction errors:** `ConfigError`, raised synchronously as soon as an invalid
//!    value, unknown name, or malformed input is supplied. Nothing invalid is ever stored.
//! 2. **Fatal conflicts:** `FatalConfigError`, raised by system validation when continuing
//!    would silently produce a wrong address map. Callers must stop the generation run.
//!
//! Ordinary validation findings are not errors; see [`crate::soc::validation`].

use std::path::PathBuf;

use thiserror::Error;

use crate::soc::interconnect::BusType;

/// Errors raised while constructing configuration objects.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A raw parameter value could not be coerced, or was out of range.
    #[error("invalid value '{value}' for parameter '{param}': {reason}")]
    InvalidParameterValue {
        /// Parameter name.
        param: String,
        /// Offending raw value, as supplied.
        value: String,
        /// Human-readable explanation of the accepted domain.
        reason: String,
    },

    /// The CPU variant does not declare the parameter at any level of its hierarchy.
    #[error("CPU '{cpu}' has no parameter named '{param}'")]
    UnknownParameter {
        /// CPU variant name.
        cpu: String,
        /// Parameter name that was supplied.
        param: String,
    },

    /// No built-in CPU variant carries this name.
    #[error("unknown CPU '{0}'")]
    UnknownCpu(String),

    /// A peripheral domain offered neither the base nor the user capability.
    #[error("peripheral domain '{0}' is neither a base nor a user peripheral domain")]
    UnrecognizedDomainKind(String),

    /// A peripheral domain was declared with a zero length.
    #[error("peripheral domain '{0}' must have a non-zero length")]
    InvalidDomainLength(String),

    /// The configuration document is not valid JSON or does not match the schema.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Builds an `InvalidParameterValue` error.
    ///
    /// # Arguments
    ///
    /// * `param` - Parameter name.
    /// * `value` - The offending value (anything displayable).
    /// * `reason` - What the parameter accepts.
    pub fn invalid_value(
        param: &str,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameterValue {
            param: param.to_owned(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Conflicts that must abort the whole generation run.
///
/// Returned from [`System::check`](crate::soc::System::check) instead of a plain
/// `false`: the configuration is not merely invalid, generating from it would emit
/// an address map that looks correct but is not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalConfigError {
    /// Interleaved RAM was requested on a bus topology that cannot route it.
    #[error(
        "this system has a {bus} bus, one of [{}] is required for interleaved memory",
        join_bus_types(.compatible)
    )]
    InterleavedBusMismatch {
        /// Configured bus topology.
        bus: BusType,
        /// Topologies that support interleaved banking.
        compatible: &'static [BusType],
    },
}

fn join_bus_types(types: &[BusType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
