//! Configuration input for the SoC generator.
//!
//! This module defines the document a user writes to describe one chip. It provides:
//! 1. **Defaults:** Values applied when a field is omitted.
//! 2. **Structures:** Bus, CPU, memory, and peripheral sections mirroring the object graph.
//! 3. **Conversion:** `SocConfig::into_system`, which builds the `System` and surfaces
//!    every construction error (bad parameter, unknown CPU, zero-length domain).
//!
//! Configuration is supplied as JSON, either inline or from a file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;
use crate::cpu::{Cpu, RawValue};
use crate::soc::{
    BasePeripheralDomain, BusType, MemorySubsystem, Peripheral, RamRegion, System,
    UserPeripheralDomain,
};

/// Default configuration constants.
mod defaults {
    /// Banks per RAM region when not stated.
    pub const BANKS: u32 = 1;
}

/// Root configuration structure describing one SoC.
///
/// Every section except the bus is optional so that incomplete systems can still be
/// loaded and reported on by validation.
///
/// # Examples
///
/// ```
/// use socgen_core::config::SocConfig;
/// use socgen_core::soc::BusType;
///
/// let json = r#"{
///     "bus_type": "NtoM",
///     "cpu": { "name": "cv32e40px", "params": { "fpu": "1", "corev_x_if": true } },
///     "memory": { "regions": [ { "id": "ram0", "size": 32768, "banks": 2, "interleaved": true } ] },
///     "peripherals": {
///         "base": { "start": 131072, "length": 65536, "devices": [ { "name": "uart", "length": 4096 } ] },
///         "user": { "start": 196608, "length": 65536 }
///     }
/// }"#;
///
/// let config = SocConfig::from_json(json).unwrap();
/// assert_eq!(config.bus_type, BusType::NtoM);
///
/// let mut system = config.into_system().unwrap();
/// system.build();
/// assert!(system.validate().unwrap());
/// assert_eq!(system.cpu().unwrap().render("fpu"), "1");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocConfig {
    /// Bus topology
    #[serde(default)]
    pub bus_type: BusType,

    /// CPU core and its parameters
    #[serde(default)]
    pub cpu: Option<CpuConfig>,

    /// RAM regions
    #[serde(default)]
    pub memory: Option<MemoryConfig>,

    /// Peripheral domains
    #[serde(default)]
    pub peripherals: PeripheralsConfig,
}

/// CPU section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CpuConfig {
    /// Variant name (e.g. `cv32e40p`)
    pub name: String,

    /// Raw parameter values; `null` leaves a parameter undefined
    #[serde(default)]
    pub params: BTreeMap<String, Option<RawValue>>,
}

/// Memory section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// RAM regions in layout order
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
}

/// One RAM region.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionConfig {
    /// Unique identifier
    pub id: String,

    /// Size in bytes
    pub size: u64,

    /// Number of banks
    #[serde(default = "RegionConfig::default_banks")]
    pub banks: u32,

    /// Spread consecutive words across banks
    #[serde(default)]
    pub interleaved: bool,
}

impl RegionConfig {
    /// Returns the default bank count.
    const fn default_banks() -> u32 {
        defaults::BANKS
    }
}

/// Peripheral domains section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeripheralsConfig {
    /// Always-on domain
    #[serde(default)]
    pub base: Option<DomainConfig>,

    /// User domain
    #[serde(default)]
    pub user: Option<DomainConfig>,
}

/// One peripheral domain.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConfig {
    /// Absolute start address
    pub start: u64,

    /// Size in bytes
    pub length: u64,

    /// Peripherals registered in the domain
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

/// One peripheral.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Device name
    pub name: String,

    /// Register window size in bytes
    pub length: u64,

    /// Fixed offset from the domain start; placed automatically when omitted
    #[serde(default)]
    pub offset: Option<u64>,
}

impl DeviceConfig {
    fn into_peripheral(self) -> Peripheral {
        match self.offset {
            Some(offset) => Peripheral::at(self.name, offset, self.length),
            None => Peripheral::new(self.name, self.length),
        }
    }
}

impl SocConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// `ConfigError::Json` for malformed input or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` when the file cannot be read, otherwise as [`SocConfig::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Builds the configured `System`.
    ///
    /// Construction errors surface here; structural problems (overlaps, missing
    /// parts) are left for [`System::validate`].
    ///
    /// # Errors
    ///
    /// Unknown CPU names, bad CPU parameters, and zero-length domains.
    pub fn into_system(self) -> Result<System, ConfigError> {
        let mut system = System::new(self.bus_type);

        if let Some(cpu) = self.cpu {
            system.set_cpu(Cpu::from_name(&cpu.name, cpu.params)?);
        }

        if let Some(memory) = self.memory {
            let mut memory_ss = MemorySubsystem::new();
            for region in memory.regions {
                memory_ss.add_region(RamRegion::banked(
                    region.id,
                    region.size,
                    region.banks,
                    region.interleaved,
                ));
            }
            system.set_memory_ss(memory_ss);
        }

        if let Some(base) = self.peripherals.base {
            let mut domain = BasePeripheralDomain::new(base.start, base.length)?;
            for device in base.devices {
                domain.add_peripheral(device.into_peripheral());
            }
            system.add_peripheral_domain(domain)?;
        }

        if let Some(user) = self.peripherals.user {
            let mut domain = UserPeripheralDomain::new(user.start, user.length)?;
            for device in user.devices {
                domain.add_peripheral(device.into_peripheral());
            }
            system.add_peripheral_domain(domain)?;
        }

        Ok(system)
    }
}
