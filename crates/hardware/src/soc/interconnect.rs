//! System interconnect topology.
//!
//! This module defines the bus topologies the generator can emit. It provides:
//! 1. **Topology enum:** `BusType`, selected once per system.
//! 2. **Compatibility:** The fixed set of topologies able to route interleaved RAM banks.
//! 3. **Parsing:** Name-based lookup for configuration files and command lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bus topology connecting masters (CPU, debug, DMA) to slaves (RAM banks, peripherals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum BusType {
    /// One master at a time is granted access to any slave.
    ///
    /// Banks are reachable only through a single shared port, so address
    /// interleaving across banks cannot be expressed.
    #[default]
    #[serde(rename = "onetoM", alias = "OneToM", alias = "one_to_m")]
    OneToM,
    /// Crossbar: N masters reach M slaves concurrently.
    #[serde(rename = "NtoM", alias = "n_to_m")]
    NtoM,
}

impl BusType {
    /// Topologies that support interleaved memory banks.
    pub const IL_COMPATIBLE: &'static [Self] = &[Self::NtoM];

    /// Every topology, in declaration order.
    pub const ALL: &'static [Self] = &[Self::OneToM, Self::NtoM];

    /// Returns whether this topology can route interleaved RAM.
    pub fn supports_interleaved_memory(self) -> bool {
        Self::IL_COMPATIBLE.contains(&self)
    }

    /// Returns the canonical name used by configuration files and templates.
    pub const fn name(self) -> &'static str {
        match self {
            Self::OneToM => "onetoM",
            Self::NtoM => "NtoM",
        }
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BusType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|bus| bus.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown bus type '{s}' (expected onetoM or NtoM)"))
    }
}
