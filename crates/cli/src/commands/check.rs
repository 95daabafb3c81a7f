//! `socgen check`: validate one configuration file.

use std::fmt::Write as _;
use std::path::Path;

use socgen_core::common::AddrRange;
use socgen_core::soc::PeripheralDomain;
use socgen_core::{SocConfig, System};
use tracing::error;

use crate::error::CliError;

/// Exit status for a valid configuration.
pub const EXIT_VALID: i32 = 0;
/// Exit status for an invalid or unreadable configuration.
pub const EXIT_INVALID: i32 = 1;
/// Exit status for a fatal configuration conflict.
pub const EXIT_FATAL: i32 = 2;

/// Loads, builds, and validates `path`, printing the layout when valid.
///
/// # Returns
///
/// The process exit status.
pub fn run(path: &Path) -> i32 {
    match check(path) {
        Ok(Some(layout)) => {
            println!("{layout}");
            EXIT_VALID
        }
        Ok(None) => {
            error!("{} is not a valid configuration", path.display());
            EXIT_INVALID
        }
        Err(CliError::Fatal(err)) => {
            error!("{err}");
            EXIT_FATAL
        }
        Err(err) => {
            error!("{err}");
            EXIT_INVALID
        }
    }
}

/// Returns the printable layout of a valid configuration, `None` for an invalid one.
fn check(path: &Path) -> Result<Option<String>, CliError> {
    let mut system = SocConfig::from_path(path)?.into_system()?;
    system.build();
    Ok(system.validate()?.then(|| describe(&system)))
}

/// Renders the resolved configuration.
pub fn describe(system: &System) -> String {
    let mut text = format!("Bus: {}", system.bus_type());

    if let Some(cpu) = system.cpu() {
        let _ = write!(text, "\nCPU: {}", cpu.name());
        for (name, value) in cpu.rendered_params() {
            if !value.is_empty() {
                let _ = write!(text, "\n  {name} = {value}");
            }
        }
    }

    if let Some(memory) = system.memory_ss() {
        let _ = write!(text, "\nMemory: {:#X} bytes", memory.total_size());
        for region in memory.regions() {
            let window = region
                .range()
                .map_or_else(|| "unplaced".to_owned(), |range| range.to_string());
            let _ = write!(
                text,
                "\n  {:<12} {window}  {} bank(s){}",
                region.id(),
                region.banks(),
                if region.is_interleaved() {
                    ", interleaved"
                } else {
                    ""
                }
            );
        }
    }

    for (key, domain) in system.peripheral_domains() {
        let _ = write!(text, "\nDomain {key}: {}", domain.range());
        for peripheral in domain.peripherals() {
            let window = peripheral.range().map_or_else(
                || "unplaced".to_owned(),
                |range| {
                    AddrRange::new(
                        domain.start_address().saturating_add(range.start()),
                        range.length(),
                    )
                    .to_string()
                },
            );
            let _ = write!(text, "\n  {:<12} {window}", peripheral.name());
        }
    }
    text
}
