//! `StepRunner` implementation that drives a generator checkout.

use std::path::Path;
use std::process::Command;

use socgen_core::SocConfig;
use tracing::{error, info};

use super::process::{self, ProcessOutcome};
use super::{SimulationResult, StepRunner, SweepConfig, Toolchain};
use crate::error::CliError;

/// Runs the real generator, compilers, and simulator for a sweep.
#[derive(Debug)]
pub struct ProjectRunner<'a> {
    config: &'a SweepConfig,
}

impl<'a> ProjectRunner<'a> {
    /// Creates a runner working in `config.base_dir`.
    pub const fn new(config: &'a SweepConfig) -> Self {
        Self { config }
    }

    /// Loads, builds, and validates one configuration file.
    ///
    /// # Errors
    ///
    /// Construction errors and the fatal bus/interleave conflict.
    pub fn check_config(path: &Path) -> Result<bool, CliError> {
        let mut system = SocConfig::from_path(path)?.into_system()?;
        system.build();
        Ok(system.validate()?)
    }

    fn test_apps_command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.config.python);
        let _ = command
            .arg(self.config.test_apps_script())
            .args(args)
            .current_dir(&self.config.base_dir);
        command
    }
}

/// Runs `command` to completion, capturing its output.
fn run_captured(command: &mut Command, what: &str) -> Result<(), CliError> {
    let out = command.output().map_err(|source| CliError::Spawn {
        what: what.to_owned(),
        source,
    })?;
    if !out.status.success() {
        return Err(CliError::StepFailed {
            what: what.to_owned(),
            output: format!(
                "{}\n{}",
                String::from_utf8_lossy(&out.stdout),
                String::from_utf8_lossy(&out.stderr)
            ),
        });
    }
    Ok(())
}

impl StepRunner for ProjectRunner<'_> {
    fn generate(&mut self, cpu: &str, config: &Path) -> bool {
        info!("Generating MCU with {cpu}...");
        match Self::check_config(config) {
            Ok(true) => {}
            Ok(false) => {
                error!("Configuration {} for {cpu} is invalid.", config.display());
                return false;
            }
            Err(err) => {
                error!("Configuration {} for {cpu} rejected: {err}", config.display());
                return false;
            }
        }

        let result = run_captured(
            Command::new("make")
                .arg("mcu-gen")
                .arg(format!("X_HEEP_CFG={}", config.display()))
                .current_dir(&self.config.base_dir),
            "MCU generation",
        );
        match result {
            Ok(()) => {
                info!("Generated MCU with {cpu} successfully.");
                true
            }
            Err(err) => {
                error!("Error generating MCU with {cpu}: {err}");
                false
            }
        }
    }

    fn compile(&mut self, cpu: &str, toolchain: &Toolchain) -> bool {
        info!(
            "Compiling test apps for {cpu} with {} ({})...",
            toolchain.compiler, toolchain.prefix
        );
        let log = self.config.compile_log(cpu, &toolchain.compiler);
        let mut command = self.test_apps_command(&[
            "--compilers",
            &toolchain.compiler,
            "--compiler-prefixes",
            &toolchain.prefix,
            "--compile-only",
            "--table",
        ]);

        match process::run_tee(&mut command, &log, self.config.compile_timeout, true) {
            Ok(outcome) if outcome.success() => {
                info!("Compiled test apps for {cpu} with {} successfully.", toolchain.compiler);
                true
            }
            Ok(ProcessOutcome::TimedOut) => {
                error!(
                    "Compilation of test apps for {cpu} with {} timed out.",
                    toolchain.compiler
                );
                false
            }
            Ok(ProcessOutcome::Exited(_)) => {
                error!(
                    "Error compiling test apps for {cpu} with {}. Check {} for details.",
                    toolchain.compiler,
                    log.display()
                );
                false
            }
            Err(err) => {
                error!("Compilation of test apps for {cpu} failed to start: {err}");
                false
            }
        }
    }

    fn simulate(&mut self, cpu: &str, toolchains: &[Toolchain]) -> SimulationResult {
        info!("Running simulation for {cpu}...");
        let compilers = join(toolchains, |toolchain| &toolchain.compiler);
        let prefixes = join(toolchains, |toolchain| &toolchain.prefix);
        let log = self.config.simulation_log(cpu);
        let mut command = self.test_apps_command(&[
            "--compilers",
            &compilers,
            "--compiler-prefixes",
            &prefixes,
            "--table",
        ]);

        match process::run_tee(&mut command, &log, self.config.simulate_timeout, true) {
            Ok(outcome) if outcome.success() => {
                info!("Simulation for {cpu} completed.");
                SimulationResult::Passed
            }
            Ok(ProcessOutcome::TimedOut) => {
                error!("Simulation for {cpu} timed out.");
                SimulationResult::Skipped
            }
            Ok(ProcessOutcome::Exited(_)) => {
                error!(
                    "Simulation for {cpu} failed. Check {} for details.",
                    log.display()
                );
                SimulationResult::Failed
            }
            Err(err) => {
                error!("Simulation for {cpu} failed to start: {err}");
                SimulationResult::Failed
            }
        }
    }
}

fn join<'t>(toolchains: &'t [Toolchain], field: impl Fn(&'t Toolchain) -> &'t String) -> String {
    toolchains
        .iter()
        .map(field)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
