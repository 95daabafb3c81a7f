//! # Parameter Coercion Tests
//!
//! Each `ParamKind` against the raw inputs configuration files actually contain.

use rstest::rstest;
use socgen_core::common::ConfigError;
use socgen_core::cpu::{ParamKind, ParamSpec, ParamValue, ParameterSet, RawValue};

// ══════════════════════════════════════════════════════════
// Booleans
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(RawValue::Bool(true), true)]
#[case(RawValue::Bool(false), false)]
#[case(RawValue::Int(1), true)]
#[case(RawValue::Int(0), false)]
#[case(RawValue::from("1"), true)]
#[case(RawValue::from("0"), false)]
#[case(RawValue::from("true"), true)]
#[case(RawValue::from("FALSE"), false)]
#[case(RawValue::from("True"), true)]
fn bool_accepts(#[case] raw: RawValue, #[case] expected: bool) {
    let value = ParamKind::Bool.coerce("fpu", &raw).unwrap();
    assert_eq!(value, ParamValue::Bool(expected));
}

#[rstest]
#[case(RawValue::Int(2))]
#[case(RawValue::Int(-1))]
#[case(RawValue::from("yes"))]
#[case(RawValue::from(""))]
#[case(RawValue::from("2"))]
fn bool_rejects(#[case] raw: RawValue) {
    let err = ParamKind::Bool.coerce("fpu", &raw).unwrap_err();
    match err {
        ConfigError::InvalidParameterValue { param, value, .. } => {
            assert_eq!(param, "fpu");
            assert_eq!(value, raw.to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ══════════════════════════════════════════════════════════
// Integers
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(RawValue::Int(0), 0)]
#[case(RawValue::Int(15), 15)]
#[case(RawValue::from("7"), 7)]
#[case(RawValue::from(" 12 "), 12)]
fn bounded_int_accepts(#[case] raw: RawValue, #[case] expected: u64) {
    let value = ParamKind::Int { max: Some(15) }
        .coerce("queue_depth", &raw)
        .unwrap();
    assert_eq!(value, ParamValue::Int(expected));
}

#[rstest]
#[case(RawValue::Int(16), "must be at most 15")]
#[case(RawValue::Int(-3), "must be a non-negative number")]
#[case(RawValue::from("-1"), "must be a non-negative number")]
#[case(RawValue::from("many"), "must be a number")]
#[case(RawValue::Bool(true), "must be a number")]
fn bounded_int_rejects(#[case] raw: RawValue, #[case] expected_reason: &str) {
    let err = ParamKind::Int { max: Some(15) }
        .coerce("queue_depth", &raw)
        .unwrap_err();
    match err {
        ConfigError::InvalidParameterValue { reason, .. } => assert_eq!(reason, expected_reason),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unbounded_int_accepts_large_values() {
    let value = ParamKind::Int { max: None }
        .coerce("fpu_addmul_lat", &RawValue::Int(1 << 40))
        .unwrap();
    assert_eq!(value.as_int(), Some(1 << 40));
}

// ══════════════════════════════════════════════════════════
// Strings
// ══════════════════════════════════════════════════════════

const IMPLS: &[&str] = &["RV32MNone", "RV32MFast"];

#[test]
fn choice_is_case_insensitive_and_canonicalized() {
    let value = ParamKind::Str { allowed: IMPLS }
        .coerce("rv32m", &RawValue::from("rv32mfast"))
        .unwrap();
    assert_eq!(value.as_str(), Some("RV32MFast"));
}

#[test]
fn choice_rejects_values_outside_the_list() {
    let err = ParamKind::Str { allowed: IMPLS }
        .coerce("rv32m", &RawValue::from("RV32MTurbo"))
        .unwrap_err();
    assert!(err.to_string().contains("must be one of RV32MNone, RV32MFast"));
}

#[test]
fn unrestricted_string_keeps_input_text() {
    let value = ParamKind::Str { allowed: &[] }
        .coerce("label", &RawValue::Int(5))
        .unwrap();
    assert_eq!(value, ParamValue::Str("5".to_owned()));
}

// ══════════════════════════════════════════════════════════
// ParameterSet
// ══════════════════════════════════════════════════════════

#[test]
fn undefined_is_distinct_from_false() {
    let spec = ParamSpec::flag("zfinx");
    let mut set = ParameterSet::new();
    assert!(!set.is_defined("zfinx"));

    set.set(&spec, Some(&RawValue::Bool(false))).unwrap();
    assert!(set.is_defined("zfinx"));
    assert_eq!(set.get("zfinx"), Some(&ParamValue::Bool(false)));

    set.set(&spec, None).unwrap();
    assert!(!set.is_defined("zfinx"));
    assert!(set.is_empty());
}

#[test]
fn failed_set_leaves_previous_value() {
    let spec = ParamSpec::bounded("queue_depth", 15);
    let mut set = ParameterSet::new();
    set.set(&spec, Some(&RawValue::Int(4))).unwrap();

    assert!(set.set(&spec, Some(&RawValue::Int(99))).is_err());
    assert_eq!(set.get("queue_depth"), Some(&ParamValue::Int(4)));
    assert_eq!(set.len(), 1);
}
