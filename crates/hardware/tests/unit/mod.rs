//! # Unit Tests
//!
//! Component-level tests for the configuration core, grouped by module.

/// Address ranges and error formatting.
pub mod common;

/// JSON configuration loading and conversion.
pub mod config;


/// Bus, memory, peripheral domains, and system validation.
pub mod soc;
