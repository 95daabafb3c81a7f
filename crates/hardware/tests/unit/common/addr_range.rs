//! # Address Range Tests
//!
//! Half-open interval arithmetic used by every layout check.

use socgen_core::common::AddrRange;

#[test]
fn end_is_exclusive() {
    let range = AddrRange::new(0x1_0000, 0x1000);
    assert_eq!(range.end(), 0x1_1000);
    assert!(range.contains(0x1_0000));
    assert!(range.contains(0x1_0FFF));
    assert!(!range.contains(0x1_1000));
}

#[test]
fn end_saturates_at_the_top_of_the_address_space() {
    let range = AddrRange::new(u64::MAX - 4, 16);
    assert_eq!(range.end(), u64::MAX);
}

#[test]
fn adjacent_ranges_do_not_overlap() {
    let low = AddrRange::new(0x1_0000, 0x1000);
    let high = AddrRange::new(0x1_1000, 0x1000);
    assert!(!low.overlaps(&high));
    assert!(!high.overlaps(&low));
}

#[test]
fn intersecting_ranges_overlap_both_ways() {
    let outer = AddrRange::new(0x2_0000, 0x1000);
    let inner = AddrRange::new(0x2_0800, 0x1000);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn display_uses_zero_padded_hex() {
    let range = AddrRange::new(0x2_0000, 0x1000);
    assert_eq!(range.to_string(), "[0x00020000, 0x00021000)");
}
