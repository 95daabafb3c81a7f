//! Address map and registry constants.
//!
//! Fixed values shared by the memory subsystem, the peripheral domains, and the
//! system validator.

/// Lowest start address allowed for the always-on (base) peripheral domain.
///
/// Everything below is reserved for the lower address space (boot ROM and RAM aliases).
pub const BASE_DOMAIN_MIN_START: u64 = 0x0001_0000;

/// Key under which the always-on peripheral domain is registered on a `System`.
pub const BASE_DOMAIN_KEY: &str = "base";

/// Key under which the user peripheral domain is registered on a `System`.
pub const USER_DOMAIN_KEY: &str = "user";

/// First address handed out by the memory subsystem layout.
pub const RAM_BASE: u64 = 0x0000_0000;
