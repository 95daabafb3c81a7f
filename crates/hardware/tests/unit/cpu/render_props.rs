//! # Rendering Properties
//!
//! Property-based checks that coercion and rendering agree for any in-range input.

use proptest::prelude::*;
use socgen_core::cpu::{CV32E40P, CV32E40PX, Cpu, RawValue};

proptest! {
    #[test]
    fn counter_renders_as_decimal(n in 0u32..100_000) {
        let cpu = Cpu::new(&CV32E40P, [("num_mhpmcounters", RawValue::from(n))]).unwrap();
        prop_assert_eq!(cpu.render("num_mhpmcounters"), n.to_string());
    }

    #[test]
    fn negative_counter_is_rejected(n in i64::MIN..0) {
        prop_assert!(Cpu::new(&CV32E40P, [("num_mhpmcounters", RawValue::Int(n))]).is_err());
    }

    #[test]
    fn string_and_native_inputs_agree(n in 0u32..1_000_000) {
        let native = Cpu::new(&CV32E40PX, [("fpu_addmul_lat", RawValue::from(n))]).unwrap();
        let text = Cpu::new(&CV32E40PX, [("fpu_addmul_lat", RawValue::from(n.to_string()))]).unwrap();
        prop_assert_eq!(native.render("fpu_addmul_lat"), text.render("fpu_addmul_lat"));
    }

    #[test]
    fn flag_renders_as_bit(flag in any::<bool>()) {
        let cpu = Cpu::new(&CV32E40P, [("corev_pulp", RawValue::from(flag))]).unwrap();
        prop_assert_eq!(cpu.render("corev_pulp"), if flag { "1" } else { "0" });
    }
}
