//! Common types and constants used throughout the configuration core.
//!
//! This module provides the building blocks shared by the CPU, memory, and peripheral
//! models. It includes:
//! 1. **Address Types:** The half-open `AddrRange` used for every reserved window.
//! 2. **Constants:** Address-map floors and the fixed domain registry keys.
//! 3. **Error Handling:** Construction errors and fatal configuration conflicts.

/// Address range type.
pub mod addr;

/// Address map and registry constants.
pub mod constants;

/// Error types for construction and fatal validation conflicts.
pub mod error;

pub use addr::AddrRange;
pub use constants::{BASE_DOMAIN_KEY, BASE_DOMAIN_MIN_START, RAM_BASE, USER_DOMAIN_KEY};
pub use error::{ConfigError, FatalConfigError};
