//! User peripheral domain.
//!
//! Application-defined peripherals (SPI hosts, I2C, GPIO banks, accelerators) that may be
//! power-gated. No placement floor applies beyond the system-wide overlap check.

use serde::Serialize;

use super::{DomainLayout, Peripheral};
use crate::common::{ConfigError, USER_DOMAIN_KEY};
use crate::soc::traits::PeripheralDomain;
use crate::soc::validation::Violation;

/// The user peripheral domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPeripheralDomain {
    layout: DomainLayout,
}

impl UserPeripheralDomain {
    /// Creates an empty user domain.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidDomainLength` for a zero `length`.
    pub fn new(start: u64, length: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            layout: DomainLayout::new(USER_DOMAIN_KEY, start, length)?,
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

impl PeripheralDomain for UserPeripheralDomain {
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

    fn as_user(&self) -> Option<&UserPeripheralDomain> {
        Some(self)
    }
}
