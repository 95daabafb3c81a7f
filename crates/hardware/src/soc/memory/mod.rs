//! On-chip RAM subsystem.
//!
//! This module describes the RAM the generator instantiates. It provides:
//! 1. **Regions:** Named RAM regions, each built from one or more banks.
//! 2. **Interleaving:** Regions may spread consecutive words across their banks; such
//!    regions require a crossbar bus (see [`BusType::IL_COMPATIBLE`](crate::soc::BusType::IL_COMPATIBLE)).
//! 3. **Layout:** `build` assigns every region its address window.
//! 4. **Self-check:** `validate` reports every inconsistent region, not just the first.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, error};

use crate::common::{AddrRange, RAM_BASE};
use crate::soc::validation::Violation;

/// A contiguous window of RAM made of `banks` equally sized banks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RamRegion {
    id: String,
    size: u64,
    banks: u32,
    interleaved: bool,
    start: Option<u64>,
}

impl RamRegion {
    /// Creates a single-bank, non-interleaved region.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique region identifier.
    /// * `size` - Size in bytes.
    pub fn new(id: impl Into<String>, size: u64) -> Self {
        Self::banked(id, size, 1, false)
    }

    /// Creates an interleaved region spread over `banks` banks.
    pub fn interleaved(id: impl Into<String>, size: u64, banks: u32) -> Self {
        Self::banked(id, size, banks, true)
    }

    /// Creates a region with an explicit bank count and interleave flag.
    pub fn banked(id: impl Into<String>, size: u64, banks: u32, interleaved: bool) -> Self {
        Self {
            id: id.into(),
            size,
            banks,
            interleaved,
            start: None,
        }
    }

    /// Region identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Size in bytes.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Number of banks.
    pub const fn banks(&self) -> u32 {
        self.banks
    }

    /// Whether consecutive words alternate between banks.
    pub const fn is_interleaved(&self) -> bool {
        self.interleaved
    }

    /// Address window, once the subsystem has been built.
    pub fn range(&self) -> Option<AddrRange> {
        self.start.map(|start| AddrRange::new(start, self.size))
    }
}

/// The RAM of one SoC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemorySubsystem {
    regions: Vec<RamRegion>,
}

impl MemorySubsystem {
    /// Creates an empty subsystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a region. Identifiers are checked by [`validate`](Self::validate).
    pub fn add_region(&mut self, region: RamRegion) {
        self.regions.push(region);
    }

    /// Appends a single-bank region; shorthand for [`RamRegion::new`] or
    /// [`RamRegion::interleaved`] with one bank.
    pub fn add_ram(&mut self, id: impl Into<String>, size: u64, interleaved: bool) {
        self.add_region(RamRegion::banked(id, size, 1, interleaved));
    }

    /// Registered regions, in insertion order.
    pub fn regions(&self) -> &[RamRegion] {
        &self.regions
    }

    /// Returns `true` if at least one region requests interleaving.
    pub fn has_interleaved_ram(&self) -> bool {
        self.regions.iter().any(RamRegion::is_interleaved)
    }

    /// Sum of all region sizes.
    pub fn total_size(&self) -> u64 {
        self.regions
            .iter()
            .fold(0u64, |acc, region| acc.saturating_add(region.size))
    }

    /// Computes the address layout.
    ///
    /// Contiguous regions are packed first from [`RAM_BASE`] in insertion order,
    /// interleaved regions follow. Rebuilding produces the same layout.
    pub fn build(&mut self) {
        let mut next = RAM_BASE;
        for interleaved in [false, true] {
            for region in self
                .regions
                .iter_mut()
                .filter(|region| region.interleaved == interleaved)
            {
                region.start = Some(next);
                next = next.saturating_add(region.size);
            }
        }
        debug!(
            regions = self.regions.len(),
            total = self.total_size(),
            "built memory layout"
        );
    }

    /// Collects every inconsistency among the declared regions.
    ///
    /// Does not require [`build`](Self::build) to have run.
    pub fn violations(&self) -> Vec<Violation> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();

        for region in &self.regions {
            if !seen.insert(region.id.as_str()) {
                found.push(Violation::DuplicateRegion {
                    id: region.id.clone(),
                });
            }
            if region.size == 0 {
                found.push(Violation::ZeroSizeRegion {
                    id: region.id.clone(),
                });
            }
            if region.banks == 0 {
                found.push(Violation::ZeroBanks {
                    id: region.id.clone(),
                });
            } else if region.interleaved {
                if !region.banks.is_power_of_two() {
                    found.push(Violation::InterleavedBankCount {
                        id: region.id.clone(),
                        banks: region.banks,
                    });
                } else if region.size % u64::from(region.banks) != 0 {
                    found.push(Violation::InterleavedBankSize {
                        id: region.id.clone(),
                        size: region.size,
                        banks: region.banks,
                    });
                }
            }
        }
        found
    }

    /// Checks the declared regions, logging one diagnostic per violation.
    ///
    /// Standalone entry point for callers holding only a subsystem.
    /// [`System::check`](crate::soc::System::check) reads [`violations`](Self::violations)
    /// directly so it can fold them into its report.
    ///
    /// # Returns
    ///
    /// `true` if the regions are consistent.
    pub fn validate(&self) -> bool {
        let found = self.violations();
        for violation in &found {
            error!(target: "socgen::validate", "{violation}");
        }
        found.is_empty()
    }
}
