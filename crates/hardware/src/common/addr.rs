//! Address range type.
//!
//! This module defines the half-open address range used everywhere an address window
//! is reserved. It provides the following:
//! 1. **Construction:** A start address and a length in bytes.
//! 2. **Geometry:** End address, containment, and overlap tests.
//! 3. **Display:** A hex rendering used in validation diagnostics.

use std::fmt;

use serde::Serialize;

/// A half-open address window `[start, start + length)`.
///
/// Used for peripheral domains (absolute addresses), peripherals (offsets inside
/// their domain), and RAM regions once the memory layout has been built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AddrRange {
    start: u64,
    length: u64,
}

impl AddrRange {
    /// Creates a new range.
    ///
    /// # Arguments
    ///
    /// * `start` - First address covered by the range.
    /// * `length` - Number of bytes covered.
    ///
    /// # Returns
    ///
    /// A new `AddrRange` covering `[start, start + length)`.
    #[inline]
    pub const fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }

    /// Returns the first address of the range.
    #[inline]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Returns the length of the range in bytes.
    #[inline]
    pub const fn length(&self) -> u64 {
        self.length
    }

    /// Returns the first address past the range.
    ///
    /// Saturates at `u64::MAX` so a window touching the top of the address space
    /// still compares correctly.
    #[inline]
    pub const fn end(&self) -> u64 {
        self.start.saturating_add(self.length)
    }

    /// Returns whether `addr` falls inside the range.
    pub const fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end()
    }

    /// Returns whether the two ranges share at least one address.
    ///
    /// Adjacent ranges (one ends exactly where the other starts) do not overlap.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#010X}, {:#010X})", self.start, self.end())
    }
}
