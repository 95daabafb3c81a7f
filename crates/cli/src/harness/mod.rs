//! Multi-CPU build sweep.
//!
//! Drives each selected CPU variant through the generator, the test-application
//! compilers, and the simulator, then classifies the outcome. It provides:
//! 1. **Configuration:** `SweepConfig`, the explicit variant lists, toolchains, and limits.
//! 2. **Steps:** The `StepRunner` seam; [`runner::ProjectRunner`] drives a real checkout.
//! 3. **Classification:** `CpuRun::outcome` and the per-sweep `Summary`.
//! 4. **Driver:** `run_sweep`, which runs variants one after another and prints progress.

/// Streaming subprocess execution with a deadline.
pub mod process;

/// Table rows and summaries.
pub mod report;

/// `StepRunner` backed by the generator checkout.
pub mod runner;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::error::CliError;

/// Default sweep settings.
pub mod defaults {
    /// Seconds allowed for one compile-only run of the test applications.
    pub const COMPILE_TIMEOUT_S: u64 = 300;
    /// Seconds allowed for one simulation run.
    pub const SIM_TIMEOUT_S: u64 = 900;
    /// Comma-separated compiler names.
    pub const COMPILERS: &str = "gcc";
    /// Comma-separated compiler prefixes, one per compiler.
    pub const COMPILER_PREFIXES: &str = "riscv32-corev-";
    /// Interpreter used for the test-application driver.
    pub const PYTHON: &str = "python3";
}

/// A compiler together with the binary prefix of its toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Compiler family (`gcc`, `clang`).
    pub compiler: String,
    /// Binary prefix (`riscv32-corev-`).
    pub prefix: String,
}

impl Toolchain {
    /// Creates a toolchain.
    pub fn new(compiler: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            prefix: prefix.into(),
        }
    }

    /// Column label, e.g. `gcc(riscv32-corev-)`.
    pub fn label(&self) -> String {
        format!("{}({})", self.compiler, self.prefix)
    }

    /// Pairs comma-separated compiler and prefix lists.
    ///
    /// # Errors
    ///
    /// `CliError::ToolchainMismatch` when the lists differ in length.
    pub fn zip_lists(compilers: &str, prefixes: &str) -> Result<Vec<Self>, CliError> {
        let compilers: Vec<&str> = compilers.split(',').collect();
        let prefixes: Vec<&str> = prefixes.split(',').collect();
        if compilers.len() != prefixes.len() {
            return Err(CliError::ToolchainMismatch {
                compilers: compilers.len(),
                prefixes: prefixes.len(),
            });
        }
        Ok(compilers
            .into_iter()
            .zip(prefixes)
            .map(|(compiler, prefix)| Self::new(compiler, prefix))
            .collect())
    }
}

/// Settings of one sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Root of the generator checkout.
    pub base_dir: PathBuf,
    /// Variants to sweep, in order.
    pub cpus: Vec<String>,
    /// Variants reported as skipped without running anything.
    pub blacklist: Vec<String>,
    /// Toolchains to build the test applications with.
    pub toolchains: Vec<Toolchain>,
    /// Stop after compilation; no simulation.
    pub compile_only: bool,
    /// Print one table row per variant and a compact summary.
    pub table: bool,
    /// Limit for one compile-only run.
    pub compile_timeout: Duration,
    /// Limit for one simulation run.
    pub simulate_timeout: Duration,
    /// Interpreter for the test-application driver.
    pub python: String,
}

impl SweepConfig {
    /// Creates a sweep over every built-in variant with the default toolchain.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            cpus: socgen_core::cpu::variant_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            blacklist: Vec::new(),
            toolchains: vec![Toolchain::new(
                defaults::COMPILERS,
                defaults::COMPILER_PREFIXES,
            )],
            compile_only: false,
            table: false,
            compile_timeout: Duration::from_secs(defaults::COMPILE_TIMEOUT_S),
            simulate_timeout: Duration::from_secs(defaults::SIM_TIMEOUT_S),
            python: defaults::PYTHON.to_owned(),
        }
    }

    /// Directory holding the per-variant configuration files.
    pub fn cpu_config_dir(&self) -> PathBuf {
        self.base_dir.join("test").join("test_cpus")
    }

    /// Configuration file of `cpu`.
    pub fn cpu_config_path(&self, cpu: &str) -> PathBuf {
        self.cpu_config_dir().join(format!("{cpu}.json"))
    }

    /// Test-application driver script.
    pub fn test_apps_script(&self) -> PathBuf {
        self.base_dir
            .join("test")
            .join("test_apps")
            .join("test_apps.py")
    }

    /// Log of a compile-only run.
    pub fn compile_log(&self, cpu: &str, compiler: &str) -> PathBuf {
        self.base_dir.join(format!("{cpu}_{compiler}_test_output.log"))
    }

    /// Log of a simulation run.
    pub fn simulation_log(&self, cpu: &str) -> PathBuf {
        self.base_dir.join(format!("{cpu}_simulation.log"))
    }

    fn is_blacklisted(&self, cpu: &str) -> bool {
        self.blacklist.iter().any(|name| name == cpu)
    }

    /// Builds the run list.
    ///
    /// Blacklisted variants are kept (and later reported as skipped). Any other
    /// variant without a configuration file is dropped with a warning.
    pub fn select_variants(&self) -> Vec<CpuRun> {
        self.cpus
            .iter()
            .filter_map(|cpu| {
                if self.is_blacklisted(cpu) {
                    return Some(CpuRun::blacklisted(cpu, self.toolchains.len()));
                }
                let path = self.cpu_config_path(cpu);
                if path.is_file() {
                    Some(CpuRun::new(cpu, self.toolchains.len()))
                } else {
                    warn!(
                        "Configuration file {} not found. Skipping {cpu}.",
                        path.display()
                    );
                    None
                }
            })
            .collect()
    }
}

/// Result of a simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationResult {
    /// Every test application passed.
    Passed,
    /// The run failed or could not be started.
    Failed,
    /// The run did not happen or hit its deadline.
    Skipped,
}

/// Final classification of one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    /// Blacklisted.
    Skipped,
    /// Configuration invalid or the generator failed.
    GenerationFailed,
    /// At least one toolchain failed to build the test applications.
    CompilationFailed,
    /// The simulation run failed.
    SimulationFailed,
    /// Everything that ran succeeded.
    Ok,
}

/// Progress of one variant through the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuRun {
    /// Variant name.
    pub name: String,
    /// Listed in the blacklist.
    pub blacklisted: bool,
    /// Generator result, once attempted.
    pub generation: Option<bool>,
    /// Per-toolchain compile result, in toolchain order; `None` when not attempted.
    pub compilation: Vec<Option<bool>>,
    /// Simulation result, once decided.
    pub simulation: Option<SimulationResult>,
}

impl CpuRun {
    /// Creates a pending run.
    pub fn new(name: impl Into<String>, toolchains: usize) -> Self {
        Self {
            name: name.into(),
            blacklisted: false,
            generation: None,
            compilation: vec![None; toolchains],
            simulation: None,
        }
    }

    /// Creates a run that will be skipped.
    pub fn blacklisted(name: impl Into<String>, toolchains: usize) -> Self {
        Self {
            blacklisted: true,
            ..Self::new(name, toolchains)
        }
    }

    /// Returns whether no attempted compilation failed.
    pub fn compilation_succeeded(&self) -> bool {
        self.compilation.iter().all(|status| *status != Some(false))
    }

    /// Classifies the run. Earlier categories take precedence over later ones.
    pub fn outcome(&self) -> Outcome {
        if self.blacklisted {
            Outcome::Skipped
        } else if self.generation != Some(true) {
            Outcome::GenerationFailed
        } else if !self.compilation_succeeded() {
            Outcome::CompilationFailed
        } else if self.simulation == Some(SimulationResult::Failed) {
            Outcome::SimulationFailed
        } else {
            Outcome::Ok
        }
    }
}

/// Variant names grouped by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Variants that took part, skipped ones included.
    pub total: usize,
    /// Blacklisted variants.
    pub skipped: Vec<String>,
    /// Successful variants.
    pub ok: Vec<String>,
    /// Variants whose generation failed.
    pub generation_failed: Vec<String>,
    /// Variants whose compilation failed.
    pub compilation_failed: Vec<String>,
    /// Variants whose simulation failed.
    pub simulation_failed: Vec<String>,
}

impl Summary {
    /// Groups finished runs by outcome.
    pub fn classify(runs: &[CpuRun]) -> Self {
        let mut summary = Self {
            total: runs.len(),
            ..Self::default()
        };
        for run in runs {
            let bucket = match run.outcome() {
                Outcome::Skipped => &mut summary.skipped,
                Outcome::GenerationFailed => &mut summary.generation_failed,
                Outcome::CompilationFailed => &mut summary.compilation_failed,
                Outcome::SimulationFailed => &mut summary.simulation_failed,
                Outcome::Ok => &mut summary.ok,
            };
            bucket.push(run.name.clone());
        }
        summary
    }

    /// Returns whether any variant failed a step. Skipped variants do not count.
    pub fn has_failures(&self) -> bool {
        !(self.generation_failed.is_empty()
            && self.compilation_failed.is_empty()
            && self.simulation_failed.is_empty())
    }
}

/// The external steps of a sweep.
#[cfg_attr(test, mockall::automock)]
pub trait StepRunner {
    /// Validates the configuration and generates the MCU. Returns `true` on success.
    fn generate(&mut self, cpu: &str, config: &Path) -> bool;

    /// Builds the test applications with one toolchain. Returns `true` on success.
    fn compile(&mut self, cpu: &str, toolchain: &Toolchain) -> bool;

    /// Builds and simulates the test applications with every toolchain.
    fn simulate(&mut self, cpu: &str, toolchains: &[Toolchain]) -> SimulationResult;
}

/// Advances one run through its steps.
fn execute<R: StepRunner + ?Sized>(config: &SweepConfig, runner: &mut R, run: &mut CpuRun) {
    let generated = runner.generate(&run.name, &config.cpu_config_path(&run.name));
    run.generation = Some(generated);

    if !generated {
        run.compilation.fill(Some(false));
        run.simulation = Some(SimulationResult::Skipped);
        return;
    }

    if config.compile_only {
        for (status, toolchain) in run.compilation.iter_mut().zip(&config.toolchains) {
            *status = Some(runner.compile(&run.name, toolchain));
        }
    } else {
        // The simulation run compiles the applications itself.
        run.compilation.fill(Some(true));
        run.simulation = Some(runner.simulate(&run.name, &config.toolchains));
    }
}

/// Runs the sweep and prints progress to `out`.
///
/// Variants run sequentially. In table mode one row is printed per finished variant
/// followed by a compact summary; otherwise an itemized summary is printed at the end.
///
/// # Errors
///
/// Only failures to write to `out` are returned; step failures are recorded in the
/// returned summary.
pub fn run_sweep<R, W>(config: &SweepConfig, runner: &mut R, out: &mut W) -> io::Result<Summary>
where
    R: StepRunner + ?Sized,
    W: Write + ?Sized,
{
    let mut runs = config.select_variants();
    writeln!(out, "{}", report::variant_list(&runs))?;

    if runs.is_empty() {
        writeln!(out, "{}", report::paint(report::color::WARNING, "No CPU configurations to test."))?;
        return Ok(Summary::default());
    }

    let layout = report::TableLayout::new(&runs, &config.toolchains, config.compile_only);
    if config.table {
        writeln!(out, "{}", layout.header())?;
    }

    for run in &mut runs {
        if run.blacklisted {
            info!(cpu = %run.name, "blacklisted");
            if !config.table {
                writeln!(
                    out,
                    "{}",
                    report::paint(report::color::WARNING, &format!("Skipping {}...", run.name))
                )?;
            }
            continue;
        }

        execute(config, runner, run);
        info!(cpu = %run.name, outcome = ?run.outcome(), "variant finished");

        if config.table {
            writeln!(out, "{}", layout.row(run))?;
            out.flush()?;
        }
    }

    let summary = Summary::classify(&runs);
    let text = if config.table {
        report::table_summary(&summary)
    } else {
        report::detailed_summary(&summary)
    };
    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(summary)
}
