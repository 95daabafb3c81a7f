//! CLI error definitions.

use std::io;

use socgen_core::common::{ConfigError, FatalConfigError};
use thiserror::Error;

/// Errors surfaced by the `socgen` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration could not be loaded or converted.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation hit a conflict that forbids generation.
    #[error(transparent)]
    Fatal(#[from] FatalConfigError),

    /// `--compilers` and `--compiler-prefixes` list different numbers of entries.
    #[error("number of compilers ({compilers}) must match number of prefixes ({prefixes})")]
    ToolchainMismatch {
        /// Entries in the compiler list.
        compilers: usize,
        /// Entries in the prefix list.
        prefixes: usize,
    },

    /// An external step ran but reported failure.
    #[error("{what} failed:\n{output}")]
    StepFailed {
        /// Human-readable step name.
        what: String,
        /// Captured stdout and stderr.
        output: String,
    },

    /// An external step could not be started.
    #[error("{what} could not be started: {source}")]
    Spawn {
        /// Human-readable step name.
        what: String,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },
}
