//! Peripheral domain trait.
//!
//! This module defines the `PeripheralDomain` trait implemented by every address-ranged
//! group of peripherals. It provides:
//! 1. **Identification:** `name` and the reserved address window.
//! 2. **Contents:** The peripherals registered under the domain.
//! 3. **Lifecycle:** `build` to place peripherals, `violations` for the domain's own checks.
//! 4. **Capabilities:** Optional casts to the base (always-on) or user domain; a
//!    `System` registers a domain by whichever capability it offers.
//!
//! Implementors must be `Send + Sync` so a configured system can be handed to a worker.

use std::fmt;

use crate::common::AddrRange;
use crate::soc::domains::{BasePeripheralDomain, Peripheral, UserPeripheralDomain};
use crate::soc::validation::Violation;

/// An address window grouping memory-mapped peripherals.
pub trait PeripheralDomain: fmt::Debug + Send + Sync {
    /// Returns a short name for this domain (e.g., `"base"`, `"user"`).
    fn name(&self) -> &str;
    /// Returns the absolute start address of the domain.
    fn start_address(&self) -> u64;
    /// Returns the size of the domain in bytes.
    fn length(&self) -> u64;
    /// Returns the peripherals registered under this domain.
    fn peripherals(&self) -> &[Peripheral];
    /// Assigns offsets to peripherals that were registered without one.
    fn build(&mut self);
    /// Returns the domain's own consistency findings.
    fn violations(&self) -> Vec<Violation>;

    /// Returns the reserved window `[start, start + length)`.
    fn range(&self) -> AddrRange {
        AddrRange::new(self.start_address(), self.length())
    }

    /// Returns this domain as a base domain if it offers the always-on capability.
    fn as_base(&self) -> Option<&BasePeripheralDomain> {
        None
    }
    /// Returns this domain as a user domain if it offers the user capability.
    fn as_user(&self) -> Option<&UserPeripheralDomain> {
        None
    }
}
