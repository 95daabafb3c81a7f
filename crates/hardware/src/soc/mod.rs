//! System-on-Chip (SoC) Components.
//!
//! This module organizes the parts that make up a generated chip, including the bus
//! topology, the RAM subsystem, the peripheral domains, and the `System` root that
//! ties them together and validates the result.

/// System root: registration, build, and validation.
pub mod builder;

/// Base and user peripheral domains and their peripherals.
pub mod domains;

/// Bus topology and its interleaving compatibility.
pub mod interconnect;

/// RAM regions and layout.
pub mod memory;

/// Peripheral domain trait definition.
pub mod traits;

/// Validation findings and report.
pub mod validation;

pub use builder::System;
pub use domains::{BasePeripheralDomain, Peripheral, UserPeripheralDomain};
pub use interconnect::BusType;
pub use memory::{MemorySubsystem, RamRegion};
pub use traits::PeripheralDomain;
pub use validation::{ValidationReport, Violation};
