//! Built-in CPU core families.
//!
//! Parameter tables for the cores the generator can instantiate. `cv32e40px` is the
//! only specialization: it is `cv32e40p` plus the CORE-V eXtension interface switch.

use super::param::{ParamSpec, ParamValue};
use super::variant::VariantDef;

/// Multiplier implementations offered by `cv32e20`.
pub const RV32M_IMPLS: &[&str] = &["RV32MNone", "RV32MSlow", "RV32MFast", "RV32MSingleCycle"];

fn render_cve2_pkg(value: &ParamValue) -> String {
    format!("cve2_pkg::{}", value.render())
}

/// Two-stage, area-optimized core.
pub static CV32E20: VariantDef = VariantDef {
    name: "cv32e20",
    base: None,
    params: &[
        ParamSpec::flag("rv32e"),
        ParamSpec::choice("rv32m", RV32M_IMPLS).with_render(render_cve2_pkg),
    ],
};

/// Four-stage core with optional FPU and PULP extensions.
pub static CV32E40P: VariantDef = VariantDef {
    name: "cv32e40p",
    base: None,
    params: &[
        ParamSpec::flag("fpu"),
        ParamSpec::count("fpu_addmul_lat"),
        ParamSpec::count("fpu_others_lat"),
        ParamSpec::flag("zfinx"),
        ParamSpec::flag("corev_pulp"),
        ParamSpec::count("num_mhpmcounters"),
    ],
};

/// Four-stage core with the eXtension interface.
pub static CV32E40X: VariantDef = VariantDef {
    name: "cv32e40x",
    base: None,
    params: &[
        ParamSpec::flag("x_ext"),
        ParamSpec::count("num_mhpmcounters"),
    ],
};

/// `cv32e40p` with the CORE-V eXtension interface.
pub static CV32E40PX: VariantDef = VariantDef {
    name: "cv32e40px",
    base: Some(&CV32E40P),
    params: &[ParamSpec::flag("corev_x_if")],
};

/// Every built-in variant, in the order sweeps run them.
pub static VARIANTS: &[&VariantDef] = &[&CV32E40P, &CV32E40X, &CV32E20, &CV32E40PX];
