//! Peripheral domains.
//!
//! This module contains the concrete domains a system accepts and the layout logic they
//! share. Every domain owns a list of peripherals addressed by offset from the domain
//! start; peripherals registered without an offset are placed by `build`.

/// Always-on peripheral domain.
pub mod base;

/// Application-defined peripheral domain.
pub mod user;

pub use base::BasePeripheralDomain;
pub use user::UserPeripheralDomain;

use std::collections::HashSet;

use serde::Serialize;

use crate::common::{AddrRange, ConfigError};
use crate::soc::validation::Violation;

/// A memory-mapped device inside a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Peripheral {
    name: String,
    length: u64,
    offset: Option<u64>,
}

impl Peripheral {
    /// Creates a peripheral to be placed by the domain's `build`.
    ///
    /// # Arguments
    ///
    /// * `name` - Device name, unique within its domain.
    /// * `length` - Size of its register window in bytes.
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
            offset: None,
        }
    }

    /// Creates a peripheral at a fixed offset from the domain start.
    pub fn at(name: impl Into<String>, offset: u64, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
            offset: Some(offset),
        }
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register window size in bytes.
    pub const fn length(&self) -> u64 {
        self.length
    }

    /// Offset from the domain start, once placed.
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Window relative to the domain start, once placed.
    pub fn range(&self) -> Option<AddrRange> {
        self.offset.map(|offset| AddrRange::new(offset, self.length))
    }
}

/// Address window plus peripherals; the state every concrete domain wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainLayout {
    name: String,
    range: AddrRange,
    peripherals: Vec<Peripheral>,
}

impl DomainLayout {
    /// Creates an empty layout.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidDomainLength` for a zero length.
    pub fn new(name: impl Into<String>, start: u64, length: u64) -> Result<Self, ConfigError> {
        let name = name.into();
        if length == 0 {
            return Err(ConfigError::InvalidDomainLength(name));
        }
        Ok(Self {
            name,
            range: AddrRange::new(start, length),
            peripherals: Vec::new(),
        })
    }

    /// Domain name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute window of the domain.
    pub const fn range(&self) -> AddrRange {
        self.range
    }

    /// Registered peripherals.
    pub fn peripherals(&self) -> &[Peripheral] {
        &self.peripherals
    }

    /// Appends a peripheral.
    pub fn add_peripheral(&mut self, peripheral: Peripheral) {
        self.peripherals.push(peripheral);
    }

    /// Places unplaced peripherals after the highest occupied offset.
    ///
    /// Each one is aligned to its length rounded up to a power of two, so register
    /// windows decode on natural boundaries. When the alignment cannot be represented
    /// the peripheral is placed at the cursor unaligned; it then lies past the domain
    /// end and is reported by [`violations`](Self::violations).
    pub fn build(&mut self) {
        let mut cursor = self
            .peripherals
            .iter()
            .filter_map(Peripheral::range)
            .map(|range| range.end())
            .max()
            .unwrap_or(0);

        for peripheral in self.peripherals.iter_mut().filter(|p| p.offset.is_none()) {
            let offset = peripheral
                .length
                .max(1)
                .checked_next_power_of_two()
                .and_then(|align| cursor.checked_next_multiple_of(align))
                .unwrap_or(cursor);
            peripheral.offset = Some(offset);
            cursor = offset.saturating_add(peripheral.length);
        }
    }

    /// Checks names, bounds, and overlaps of placed peripherals.
    pub fn violations(&self) -> Vec<Violation> {
        let mut found = Vec::new();

        let mut names = HashSet::new();
        for peripheral in &self.peripherals {
            if !names.insert(peripheral.name.as_str()) {
                found.push(Violation::DuplicatePeripheral {
                    domain: self.name.clone(),
                    peripheral: peripheral.name.clone(),
                });
            }
        }

        let mut placed: Vec<(&Peripheral, AddrRange)> = self
            .peripherals
            .iter()
            .filter_map(|p| p.range().map(|range| (p, range)))
            .collect();
        placed.sort_by_key(|(_, range)| range.start());

        let mut furthest: Option<(&Peripheral, u64)> = None;
        for (peripheral, range) in placed {
            if range.end() > self.range.length() {
                found.push(Violation::PeripheralOutOfRange {
                    domain: self.name.clone(),
                    peripheral: peripheral.name.clone(),
                    end: range.end(),
                    length: self.range.length(),
                });
            }
            if let Some((other, end)) = furthest {
                if range.start() < end {
                    found.push(Violation::PeripheralOverlap {
                        domain: self.name.clone(),
                        peripheral: peripheral.name.clone(),
                        other: other.name.clone(),
                    });
                }
            }
            if furthest.is_none_or(|(_, end)| range.end() > end) {
                furthest = Some((peripheral, range.end()));
            }
        }
        found
    }
}
