//! Always-on (base) peripheral domain.
//!
//! Holds the peripherals that stay powered and clocked regardless of gating: SoC control,
//! boot ROM, power manager, always-on timers, pad control, and similar. Its start address
//! must sit at or above [`BASE_DOMAIN_MIN_START`](crate::common::BASE_DOMAIN_MIN_START);
//! the system validator enforces that floor.

use serde::Serialize;

use super::{DomainLayout, Peripheral};
use crate::common::{BASE_DOMAIN_KEY, ConfigError};
use crate::soc::traits::PeripheralDomain;
use crate::soc::validation::Violation;

/// The always-on peripheral domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasePeripheralDomain {
    layout: DomainLayout,
}

impl BasePeripheralDomain {
    /// Creates an empty base domain.
    ///
    /// # Arguments
    ///
    /// * `start` - Absolute start address.
    /// * `length` - Size in bytes; must be non-zero.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidDomainLength` for a zero length.
    pub fn new(start: u64, length: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            layout: DomainLayout::new(BASE_DOMAIN_KEY, start, length)?,
        })
    }

    /// Appends a peripheral.
    pub fn add_peripheral(&mut self, peripheral: Peripheral) {
        self.layout.add_peripheral(peripheral);
    }

    /// Builder-style variant of [`add_peripheral`](Self::add_peripheral).
    #[must_use]
    pub fn with_peripheral(mut self, peripheral: Peripheral) -> Self {
        self.add_peripheral(peripheral);
        self
    }
}

impl PeripheralDomain for BasePeripheralDomain {
    fn name(&self) -> &str {
        self.layout.name()
    }

    fn start_address(&self) -> u64 {
        self.layout.range().start()
    }

    fn length(&self) -> u64 {
        self.layout.range().length()
    }

    fn peripherals(&self) -> &[Peripheral] {
        self.layout.peripherals()
    }

    fn build(&mut self) {
        self.layout.build();
    }

    fn violations(&self) -> Vec<Violation> {
        self.layout.violations()
    }

    fn as_base(&self) -> Option<&BasePeripheralDomain> {
        Some(self)
    }
}
