//! CPU cores and their tunable parameters.
//!
//! This module models the core selected for a generated SoC. It provides:
//! 1. **Parameters:** Raw input, coercion rules, checked values, and the per-CPU set.
//! 2. **Variants:** Static rule tables linked by specialization, with lookup that
//!    falls back to the base variant for anything not redeclared.
//! 3. **Families:** The built-in `cv32e20`, `cv32e40p`, `cv32e40x`, and `cv32e40px` cores.

/// Built-in core families.
pub mod families;

/// Parameter values, coercion, and storage.
pub mod param;

/// Variant definitions and configured CPUs.
pub mod variant;

pub use families::{CV32E20, CV32E40P, CV32E40PX, CV32E40X, VARIANTS};
pub use param::{ParamKind, ParamSpec, ParamValue, ParameterSet, RawValue};
pub use variant::{Cpu, VariantDef};

use crate::common::ConfigError;

/// Looks up a built-in variant by name (case-insensitive).
///
/// # Errors
///
/// `ConfigError::UnknownCpu` when no built-in variant has that name.
pub fn variant_by_name(name: &str) -> Result<&'static VariantDef, ConfigError> {
    VARIANTS
        .iter()
        .copied()
        .find(|def| def.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownCpu(name.to_owned()))
}

/// Names of the built-in variants.
pub fn variant_names() -> Vec<&'static str> {
    VARIANTS.iter().map(|def| def.name).collect()
}
