//! RISC-V microcontroller SoC configuration library.
//!
//! This crate builds and validates the configuration of a generated SoC before any
//! hardware description is emitted. It covers the following:
//! 1. **CPU:** Core families with typed, coerced parameters and render rules inherited
//!    through specialization.
//! 2. **Memory:** RAM regions, optional interleaved banking, and the derived layout.
//! 3. **Peripherals:** Address-ranged always-on and user domains.
//! 4. **SoC:** The `System` root with its build step and validate-everything pass.
//! 5. **Configuration:** JSON input converted into the object graph.

/// Common types and constants (address ranges, domain keys, errors).
pub mod common;
/// JSON configuration input and conversion into a `System`.
pub mod config;
/// CPU core families and parameters.
pub mod cpu;
/// System-on-chip (bus, memory, peripheral domains, system root, validation).
pub mod soc;

/// Root configuration type; deserialize with `SocConfig::from_json` or `SocConfig::from_path`.
pub use crate::config::SocConfig;
/// Configured CPU; construct with `Cpu::new` or `Cpu::from_name`.
pub use crate::cpu::Cpu;
/// Top-level system; construct with `System::new`.
pub use crate::soc::System;
