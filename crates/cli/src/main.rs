//! RISC-V microcontroller SoC generator CLI.
//!
//! This binary wraps the configuration core for day-to-day use. It performs:
//! 1. **Check:** Load one JSON configuration, build and validate it, and print the
//!    resolved CPU parameters and address map.
//! 2. **Sweep:** Generate, compile, and simulate the MCU for every CPU variant of a
//!    generator checkout and report which ones work.

mod commands;
mod error;
mod harness;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::sweep::SweepArgs;

#[derive(Parser, Debug)]
#[command(
    name = "socgen",
    author,
    version,
    about = "RISC-V microcontroller SoC configuration checker and CPU sweep",
    long_about = "Validate SoC configurations before generation, or sweep every CPU variant through generation, compilation, and simulation.\n\nExamples:\n  socgen check configs/cv32e40p.json\n  socgen sweep --table\n  socgen sweep --compile-only --compilers gcc,clang --compiler-prefixes riscv32-corev-,riscv32-unknown-"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load, build, and validate one configuration file.
    ///
    /// Exits 0 when valid, 1 when invalid, 2 on a fatal conflict.
    Check {
        /// JSON configuration file.
        config: PathBuf,
    },

    /// Run every CPU variant through generation, compilation, and simulation.
    Sweep(SweepArgs),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Check { config } => commands::check::run(&config),
        Commands::Sweep(args) => commands::sweep::run(args),
    };
    process::exit(code);
}

/// Installs the global subscriber, writing to stderr.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
