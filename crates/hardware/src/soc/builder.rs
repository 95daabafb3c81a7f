//! System-on-Chip configuration root and top-level `System` type.
//!
//! This module assembles the chip description and decides whether it may be generated.
//! It performs:
//! 1. **Registration:** Bus topology, CPU, memory subsystem, and peripheral domains
//!    (stored under the `"base"` / `"user"` keys by capability).
//! 2. **Build:** Finalizes the memory layout and every domain's peripheral placement.
//! 3. **Validation:** Presence checks, memory self-check, the bus/interleave conflict,
//!    domain overlap, and the always-on floor, in that order.

use std::collections::BTreeMap;

use tracing::{debug, error, info};

use crate::common::{
    AddrRange, BASE_DOMAIN_KEY, BASE_DOMAIN_MIN_START, ConfigError, FatalConfigError,
    USER_DOMAIN_KEY,
};
use crate::cpu::Cpu;
use crate::soc::domains::{BasePeripheralDomain, UserPeripheralDomain};
use crate::soc::interconnect::BusType;
use crate::soc::memory::MemorySubsystem;
use crate::soc::traits::PeripheralDomain;
use crate::soc::validation::{ValidationReport, Violation};

/// Configuration of one SoC: the object graph handed to the template renderer.
///
/// Mutated only through its setters, then `build()` and `validate()` once per
/// generation run. Independent runs use independent instances.
#[derive(Debug)]
pub struct System {
    bus_type: BusType,
    cpu: Option<Cpu>,
    memory_ss: Option<MemorySubsystem>,
    domains: BTreeMap<String, Box<dyn PeripheralDomain>>,
}

impl System {
    /// Creates a system with the given bus and nothing else registered.
    pub fn new(bus_type: BusType) -> Self {
        Self {
            bus_type,
            cpu: None,
            memory_ss: None,
            domains: BTreeMap::new(),
        }
    }

    /// Replaces the bus topology.
    pub fn set_bus_type(&mut self, bus_type: BusType) {
        self.bus_type = bus_type;
    }

    /// Configured bus topology.
    pub const fn bus_type(&self) -> BusType {
        self.bus_type
    }

    /// Registers the CPU, replacing any previous one.
    pub fn set_cpu(&mut self, cpu: Cpu) {
        self.cpu = Some(cpu);
    }

    /// Configured CPU.
    pub const fn cpu(&self) -> Option<&Cpu> {
        self.cpu.as_ref()
    }

    /// Registers the memory subsystem, replacing any previous one.
    pub fn set_memory_ss(&mut self, memory_ss: MemorySubsystem) {
        self.memory_ss = Some(memory_ss);
    }

    /// Configured memory subsystem.
    pub const fn memory_ss(&self) -> Option<&MemorySubsystem> {
        self.memory_ss.as_ref()
    }

    /// Registers a peripheral domain by capability.
    ///
    /// Base domains are stored under `"base"`, user domains under `"user"`; registering
    /// the same role twice replaces the earlier domain.
    ///
    /// # Returns
    ///
    /// `ConfigError::UnrecognizedDomainKind` if the domain offers neither capability.
    pub fn add_peripheral_domain(
        &mut self,
        domain: impl PeripheralDomain + 'static,
    ) -> Result<(), ConfigError> {
        let key = if domain.as_base().is_some() {
            BASE_DOMAIN_KEY
        } else if domain.as_user().is_some() {
            USER_DOMAIN_KEY
        } else {
            return Err(ConfigError::UnrecognizedDomainKind(domain.name().to_owned()));
        };
        debug!(key, range = %domain.range(), "registered peripheral domain");
        if self.domains.insert(key.to_owned(), Box::new(domain)).is_some() {
            info!(key, "replaced previously registered peripheral domain");
        }
        Ok(())
    }

    /// Returns the domain registered under `name`.
    pub fn peripheral_domain(&self, name: &str) -> Option<&dyn PeripheralDomain> {
        self.domains.get(name).map(|domain| &**domain)
    }

    /// Returns whether a domain is registered under `name`.
    pub fn has_peripheral_domain(&self, name: &str) -> bool {
        self.domains.contains_key(name)
    }

    /// Iterates over registered domains in key order.
    pub fn peripheral_domains(&self) -> impl Iterator<Item = (&str, &dyn PeripheralDomain)> {
        self.domains
            .iter()
            .map(|(name, domain)| (name.as_str(), &**domain))
    }

    /// The always-on domain, if registered.
    pub fn base_peripheral_domain(&self) -> Option<&BasePeripheralDomain> {
        self.peripheral_domain(BASE_DOMAIN_KEY)
            .and_then(|domain| domain.as_base())
    }

    /// The user domain, if registered.
    pub fn user_peripheral_domain(&self) -> Option<&UserPeripheralDomain> {
        self.peripheral_domain(USER_DOMAIN_KEY)
            .and_then(|domain| domain.as_user())
    }

    /// Returns whether the always-on domain is registered.
    pub fn are_base_peripherals_configured(&self) -> bool {
        self.has_peripheral_domain(BASE_DOMAIN_KEY)
    }

    /// Returns whether the user domain is registered.
    pub fn are_user_peripherals_configured(&self) -> bool {
        self.has_peripheral_domain(USER_DOMAIN_KEY)
    }

    /// Returns whether both the always-on and the user domain are registered.
    pub fn are_peripherals_configured(&self) -> bool {
        self.are_base_peripherals_configured() && self.are_user_peripherals_configured()
    }

    /// Finalizes the memory layout and every domain. Absent parts are skipped.
    pub fn build(&mut self) {
        if let Some(memory_ss) = self.memory_ss.as_mut() {
            memory_ss.build();
        }
        for domain in self.domains.values_mut() {
            domain.build();
        }
    }

    /// Runs every check and returns `true` when the configuration may be generated.
    ///
    /// Diagnostics are logged as they are found. See [`check`](Self::check).
    ///
    /// # Errors
    ///
    /// `FatalConfigError` when generation must stop altogether rather than merely fail.
    pub fn validate(&self) -> Result<bool, FatalConfigError> {
        self.check().map(|report| report.is_valid())
    }

    /// Runs every check and returns the full report.
    ///
    /// A missing CPU, a missing memory subsystem, or an inconsistent memory subsystem
    /// ends the pass early, since the later checks mean nothing without them.
    /// Overlapping domains and the always-on floor are all reported together.
    ///
    /// # Errors
    ///
    /// `FatalConfigError::InterleavedBusMismatch` when interleaved RAM is requested on
    /// a bus that cannot route it.
    pub fn check(&self) -> Result<ValidationReport, FatalConfigError> {
        let mut report = ValidationReport::new();

        if self.cpu.is_none() {
            report.record(Violation::MissingCpu);
            return Ok(report);
        }

        let Some(memory_ss) = self.memory_ss.as_ref() else {
            report.record(Violation::MissingMemory);
            return Ok(report);
        };

        let memory_violations = memory_ss.violations();
        if !memory_violations.is_empty() {
            for violation in memory_violations {
                report.record(violation);
            }
            return Ok(report);
        }

        if memory_ss.has_interleaved_ram() && !self.bus_type.supports_interleaved_memory() {
            let fatal = FatalConfigError::InterleavedBusMismatch {
                bus: self.bus_type,
                compatible: BusType::IL_COMPATIBLE,
            };
            error!(target: "socgen::validate", "{fatal}");
            return Err(fatal);
        }

        for domain in self.domains.values() {
            for warning in domain.violations() {
                report.warn(warning);
            }
        }

        self.check_domain_overlap(&mut report);
        self.check_base_floor(&mut report);

        Ok(report)
    }

    fn check_domain_overlap(&self, report: &mut ValidationReport) {
        let mut sorted: Vec<(&str, AddrRange)> = self
            .domains
            .iter()
            .map(|(name, domain)| (name.as_str(), domain.range()))
            .collect();
        sorted.sort_by_key(|(_, range)| range.start());

        let mut furthest: Option<(&str, u64)> = None;
        for (name, range) in sorted {
            if let Some((previous, previous_end)) = furthest {
                if range.start() < previous_end {
                    report.record(Violation::DomainOverlap {
                        domain: name.to_owned(),
                        start: range.start(),
                        previous: previous.to_owned(),
                        previous_end,
                    });
                }
            }
            if furthest.is_none_or(|(_, end)| range.end() > end) {
                furthest = Some((name, range.end()));
            }
        }
    }

    fn check_base_floor(&self, report: &mut ValidationReport) {
        if let Some(base) = self.base_peripheral_domain() {
            if base.start_address() < BASE_DOMAIN_MIN_START {
                report.record(Violation::BaseDomainFloor {
                    start: base.start_address(),
                    floor: BASE_DOMAIN_MIN_START,
                });
            }
        }
    }
}
