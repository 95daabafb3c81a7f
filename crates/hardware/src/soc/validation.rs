//! Validation findings and the report that collects them.
//!
//! Validation never stops at the first problem it can report. Each finding is a
//! [`Violation`] and is logged through `tracing` at the moment it is recorded, so the
//! diagnostics appear before any boolean result is handed back.

use std::fmt;

use tracing::{error, warn};

/// A single structural problem found by a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// No CPU was registered on the system.
    MissingCpu,
    /// No memory subsystem was registered on the system.
    MissingMemory,
    /// A RAM region has size zero.
    ZeroSizeRegion {
        /// Region identifier.
        id: String,
    },
    /// Two RAM regions share an identifier.
    DuplicateRegion {
        /// Region identifier.
        id: String,
    },
    /// A RAM region declares zero banks.
    ZeroBanks {
        /// Region identifier.
        id: String,
    },
    /// An interleaved region's bank count is not a power of two.
    InterleavedBankCount {
        /// Region identifier.
        id: String,
        /// Declared bank count.
        banks: u32,
    },
    /// An interleaved region's size does not split evenly across its banks.
    InterleavedBankSize {
        /// Region identifier.
        id: String,
        /// Region size in bytes.
        size: u64,
        /// Declared bank count.
        banks: u32,
    },
    /// A peripheral domain starts inside the range of an earlier one.
    DomainOverlap {
        /// Domain that starts too low.
        domain: String,
        /// Its start address.
        start: u64,
        /// Domain whose range reaches furthest so far.
        previous: String,
        /// End address reached so far.
        previous_end: u64,
    },
    /// The always-on domain starts below the reserved floor.
    BaseDomainFloor {
        /// Configured start address.
        start: u64,
        /// Lowest allowed start address.
        floor: u64,
    },
    /// A peripheral extends past the end of its domain.
    PeripheralOutOfRange {
        /// Domain name.
        domain: String,
        /// Peripheral name.
        peripheral: String,
        /// End offset of the peripheral.
        end: u64,
        /// Domain length.
        length: u64,
    },
    /// Two peripherals of one domain share offsets.
    PeripheralOverlap {
        /// Domain name.
        domain: String,
        /// Peripheral starting too low.
        peripheral: String,
        /// Peripheral it collides with.
        other: String,
    },
    /// Two peripherals of one domain share a name.
    DuplicatePeripheral {
        /// Domain name.
        domain: String,
        /// Repeated peripheral name.
        peripheral: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCpu => write!(f, "A CPU must be configured"),
            Self::MissingMemory => write!(f, "A memory subsystem must be configured"),
            Self::ZeroSizeRegion { id } => write!(f, "RAM region '{id}' has a size of zero"),
            Self::DuplicateRegion { id } => {
                write!(f, "RAM region identifier '{id}' is used more than once")
            }
            Self::ZeroBanks { id } => write!(f, "RAM region '{id}' must have at least one bank"),
            Self::InterleavedBankCount { id, banks } => write!(
                f,
                "Interleaved RAM region '{id}' has {banks} banks, the count must be a power of two"
            ),
            Self::InterleavedBankSize { id, size, banks } => write!(
                f,
                "Interleaved RAM region '{id}' of {size:#X} bytes cannot be split evenly across {banks} banks"
            ),
            Self::DomainOverlap {
                domain,
                start,
                previous,
                previous_end,
            } => write!(
                f,
                "The peripheral domain '{domain}' (starts at {start:#08X}) overflows over '{previous}' (ends at {previous_end:#08X})."
            ),
            Self::BaseDomainFloor { start, floor } => write!(
                f,
                "Always on peripheral start address must be greater than {floor:#X}, current address is {start:#08X}."
            ),
            Self::PeripheralOutOfRange {
                domain,
                peripheral,
                end,
                length,
            } => write!(
                f,
                "Peripheral '{peripheral}' ends at offset {end:#X}, past the {length:#X}-byte '{domain}' domain"
            ),
            Self::PeripheralOverlap {
                domain,
                peripheral,
                other,
            } => write!(
                f,
                "Peripheral '{peripheral}' overlaps '{other}' in the '{domain}' domain"
            ),
            Self::DuplicatePeripheral { domain, peripheral } => write!(
                f,
                "Peripheral '{peripheral}' is registered more than once in the '{domain}' domain"
            ),
        }
    }
}

/// Findings of one validation pass, in discovery order.
///
/// `violations` decide the outcome; `warnings` are reported but do not fail the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
    warnings: Vec<Violation>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and records a violation.
    pub fn record(&mut self, violation: Violation) {
        error!(target: "socgen::validate", "{violation}");
        self.violations.push(violation);
    }

    /// Logs and records a warning.
    pub fn warn(&mut self, warning: Violation) {
        warn!(target: "socgen::validate", "{warning}");
        self.warnings.push(warning);
    }

    /// Returns `true` when no violation was recorded.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Recorded violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Recorded warnings.
    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }
}
