//! `socgen sweep`: generate, compile, and simulate every CPU variant.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::error;

use crate::error::CliError;
use crate::harness::runner::ProjectRunner;
use crate::harness::{self, SweepConfig, Toolchain, defaults};

/// Options of the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Root of the generator checkout
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Only generate and compile, skip simulations
    #[arg(long)]
    pub compile_only: bool,

    /// Print results in a table format
    #[arg(long)]
    pub table: bool,

    /// Comma-separated list of compilers to test
    #[arg(long, default_value = defaults::COMPILERS)]
    pub compilers: String,

    /// Comma-separated list of compiler prefixes, one per compiler
    #[arg(long, default_value = defaults::COMPILER_PREFIXES)]
    pub compiler_prefixes: String,

    /// CPU variants to test (default: every built-in variant)
    #[arg(long, value_delimiter = ',')]
    pub cpus: Vec<String>,

    /// CPU variants to report as skipped
    #[arg(long, value_delimiter = ',')]
    pub blacklist: Vec<String>,

    /// Seconds allowed for each compile-only run
    #[arg(long, default_value_t = defaults::COMPILE_TIMEOUT_S)]
    pub compile_timeout: u64,

    /// Seconds allowed for each simulation run
    #[arg(long, default_value_t = defaults::SIM_TIMEOUT_S)]
    pub sim_timeout: u64,

    /// Python interpreter for the test-application driver
    #[arg(long, default_value = defaults::PYTHON)]
    pub python: String,
}

impl SweepArgs {
    /// Resolves the options into a sweep configuration.
    ///
    /// # Errors
    ///
    /// `CliError::ToolchainMismatch` when the compiler and prefix lists differ in length.
    pub fn into_config(self) -> Result<SweepConfig, CliError> {
        let mut config = SweepConfig::new(self.base_dir);
        config.toolchains = Toolchain::zip_lists(&self.compilers, &self.compiler_prefixes)?;
        if !self.cpus.is_empty() {
            config.cpus = self.cpus;
        }
        config.blacklist = self.blacklist;
        config.compile_only = self.compile_only;
        config.table = self.table;
        config.compile_timeout = Duration::from_secs(self.compile_timeout);
        config.simulate_timeout = Duration::from_secs(self.sim_timeout);
        config.python = self.python;
        Ok(config)
    }
}

/// Runs the sweep.
///
/// # Returns
///
/// `1` if any variant failed or the options were inconsistent, `0` otherwise.
pub fn run(args: SweepArgs) -> i32 {
    let config = match args.into_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return 1;
        }
    };

    let mut runner = ProjectRunner::new(&config);
    match harness::run_sweep(&config, &mut runner, &mut io::stdout()) {
        Ok(summary) => i32::from(summary.has_failures()),
        Err(err) => {
            error!("{err}");
            1
        }
    }
}
