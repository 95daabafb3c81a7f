//! # System Validation Tests
//!
//! Covers domain registration by capability and every step of the validation pass:
//! presence checks, the memory self-check, the bus/interleave conflict, domain
//! overlap, and the always-on floor.

use pretty_assertions::assert_eq;
use socgen_core::common::{AddrRange, ConfigError, FatalConfigError};
use socgen_core::soc::{
    BasePeripheralDomain, BusType, MemorySubsystem, Peripheral, PeripheralDomain, RamRegion,
    UserPeripheralDomain, Violation,
};

use crate::common::builder::SystemBuilder;
use crate::common::init_tracing;

/// A domain offering neither the base nor the user capability.
#[derive(Debug)]
struct ScratchDomain;

impl PeripheralDomain for ScratchDomain {
    fn name(&self) -> &str {
        "scratch"
    }

    fn start_address(&self) -> u64 {
        0x4_0000
    }

    fn length(&self) -> u64 {
        0x1000
    }

    fn peripherals(&self) -> &[Peripheral] {
        &[]
    }

    fn build(&mut self) {}

    fn violations(&self) -> Vec<Violation> {
        Vec::new()
    }
}

// ══════════════════════════════════════════════════════════
// Registration
// ══════════════════════════════════════════════════════════

#[test]
fn domains_are_keyed_by_capability() {
    let system = SystemBuilder::valid().build();
    assert!(system.are_base_peripherals_configured());
    assert!(system.are_user_peripherals_configured());
    assert!(system.are_peripherals_configured());

    let keys: Vec<&str> = system.peripheral_domains().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["base", "user"]);
    assert_eq!(
        system.base_peripheral_domain().map(|base| base.start_address()),
        Some(0x2_0000)
    );
}

#[test]
fn unrecognized_domain_kind_is_rejected() {
    let mut system = SystemBuilder::empty().build();
    let err = system.add_peripheral_domain(ScratchDomain).unwrap_err();
    assert!(matches!(err, ConfigError::UnrecognizedDomainKind(name) if name == "scratch"));
    assert!(!system.has_peripheral_domain("scratch"));
}

#[test]
fn registering_a_role_twice_replaces_the_first() {
    let mut system = SystemBuilder::valid().build();
    system
        .add_peripheral_domain(BasePeripheralDomain::new(0x5_0000, 0x1000).unwrap())
        .unwrap();

    assert_eq!(system.peripheral_domains().count(), 2);
    assert_eq!(
        system.peripheral_domain("base").map(|base| base.range()),
        Some(AddrRange::new(0x5_0000, 0x1000))
    );
}

#[test]
fn user_domain_alone_is_not_fully_configured() {
    let mut system = SystemBuilder::empty().build();
    system
        .add_peripheral_domain(UserPeripheralDomain::new(0x3_0000, 0x1000).unwrap())
        .unwrap();
    assert!(!system.are_base_peripherals_configured());
    assert!(system.are_user_peripherals_configured());
    assert!(!system.are_peripherals_configured());
    assert!(system.user_peripheral_domain().is_some());
    assert!(system.base_peripheral_domain().is_none());
}

// ══════════════════════════════════════════════════════════
// Presence checks
// ══════════════════════════════════════════════════════════

#[test]
fn valid_system_passes_with_no_findings() {
    init_tracing();
    let mut system = SystemBuilder::valid().build();
    system.build();

    let report = system.check().unwrap();
    assert!(report.violations().is_empty());
    assert!(report.warnings().is_empty());
    assert_eq!(system.validate(), Ok(true));
}

#[test]
fn missing_cpu_stops_before_any_other_check() {
    init_tracing();
    let system = SystemBuilder::valid()
        .without_cpu()
        .without_memory()
        .base(0x2_0000, 0x1000)
        .user(0x2_0800, 0x1000)
        .build();

    let report = system.check().unwrap();
    assert_eq!(report.violations(), &[Violation::MissingCpu]);
    assert_eq!(system.validate(), Ok(false));
}

#[test]
fn missing_memory_is_reported() {
    let system = SystemBuilder::valid().without_memory().build();
    let report = system.check().unwrap();
    assert_eq!(report.violations(), &[Violation::MissingMemory]);
}

#[test]
fn inconsistent_memory_stops_before_the_bus_check() {
    let mut memory = MemorySubsystem::new();
    memory.add_region(RamRegion::interleaved("il0", 0x3000, 3));
    let system = SystemBuilder::valid().memory(memory).build();

    let report = system.check().unwrap();
    assert_eq!(
        report.violations(),
        &[Violation::InterleavedBankCount {
            id: "il0".to_owned(),
            banks: 3
        }]
    );
}

#[test]
fn system_without_domains_is_valid() {
    let system = SystemBuilder::valid().without_domains().build();
    assert!(!system.are_peripherals_configured());
    assert_eq!(system.validate(), Ok(true));
}

// ══════════════════════════════════════════════════════════
// Bus and interleaving
// ══════════════════════════════════════════════════════════

#[test]
fn interleaved_memory_on_single_master_bus_is_fatal() {
    init_tracing();
    let system = SystemBuilder::valid()
        .interleaved_memory()
        .bus(BusType::OneToM)
        .build();

    assert_eq!(
        system.validate(),
        Err(FatalConfigError::InterleavedBusMismatch {
            bus: BusType::OneToM,
            compatible: BusType::IL_COMPATIBLE,
        })
    );
}

#[test]
fn interleaved_memory_on_crossbar_is_valid() {
    let mut system = SystemBuilder::valid()
        .interleaved_memory()
        .bus(BusType::NtoM)
        .build();
    system.build();
    assert_eq!(system.validate(), Ok(true));
}

#[test]
fn switching_the_bus_after_construction_is_honoured() {
    let mut system = SystemBuilder::valid().interleaved_memory().build();
    assert!(system.validate().is_err());
    system.set_bus_type(BusType::NtoM);
    assert_eq!(system.bus_type(), BusType::NtoM);
    assert_eq!(system.validate(), Ok(true));
}

// ══════════════════════════════════════════════════════════
// Address map
// ══════════════════════════════════════════════════════════

#[test]
fn overlapping_domains_are_reported() {
    init_tracing();
    let system = SystemBuilder::valid()
        .base(0x2_0000, 0x1000)
        .user(0x2_0800, 0x1000)
        .build();

    let report = system.check().unwrap();
    assert_eq!(
        report.violations(),
        &[Violation::DomainOverlap {
            domain: "user".to_owned(),
            start: 0x2_0800,
            previous: "base".to_owned(),
            previous_end: 0x2_1000,
        }]
    );
    assert_eq!(
        report.violations()[0].to_string(),
        "The peripheral domain 'user' (starts at 0x020800) overflows over 'base' (ends at 0x021000)."
    );
}

#[test]
fn adjacent_domains_do_not_overlap() {
    let system = SystemBuilder::valid()
        .base(0x1_0000, 0x1000)
        .user(0x1_1000, 0x1000)
        .build();
    assert_eq!(system.validate(), Ok(true));
}

#[test]
fn overlap_is_detected_regardless_of_registration_order() {
    let system = SystemBuilder::valid()
        .base(0x3_0000, 0x1_0000)
        .user(0x2_0000, 0x1_8000)
        .build();

    let report = system.check().unwrap();
    assert_eq!(
        report.violations(),
        &[Violation::DomainOverlap {
            domain: "base".to_owned(),
            start: 0x3_0000,
            previous: "user".to_owned(),
            previous_end: 0x3_8000,
        }]
    );
}

#[test]
fn base_domain_below_floor_is_reported() {
    let system = SystemBuilder::valid()
        .base(0xFFFF, 0x1000)
        .user(0x3_0000, 0x1000)
        .build();

    let report = system.check().unwrap();
    assert_eq!(
        report.violations(),
        &[Violation::BaseDomainFloor {
            start: 0xFFFF,
            floor: 0x1_0000,
        }]
    );
}

#[test]
fn base_domain_at_floor_is_accepted() {
    let system = SystemBuilder::valid()
        .base(0x1_0000, 0x1000)
        .user(0x3_0000, 0x1000)
        .build();
    assert_eq!(system.validate(), Ok(true));
}

#[test]
fn overlap_and_floor_are_reported_together() {
    let system = SystemBuilder::valid()
        .base(0x8000, 0x1_0000)
        .user(0x1_0000, 0x1000)
        .build();

    let report = system.check().unwrap();
    assert_eq!(report.violations().len(), 2);
    assert!(matches!(report.violations()[0], Violation::DomainOverlap { .. }));
    assert!(matches!(report.violations()[1], Violation::BaseDomainFloor { .. }));
}

// ══════════════════════════════════════════════════════════
// Domain self-check
// ══════════════════════════════════════════════════════════

#[test]
fn domain_findings_are_warnings_only() {
    let mut system = SystemBuilder::valid().build();
    system
        .add_peripheral_domain(
            BasePeripheralDomain::new(0x2_0000, 0x1000)
                .unwrap()
                .with_peripheral(Peripheral::at("big", 0, 0x2000)),
        )
        .unwrap();

    let report = system.check().unwrap();
    assert!(report.is_valid());
    assert_eq!(report.warnings().len(), 1);
    assert!(matches!(
        report.warnings()[0],
        Violation::PeripheralOutOfRange { .. }
    ));
}

#[test]
fn system_moves_into_a_worker_thread() {
    let system = SystemBuilder::valid().build();
    let valid = std::thread::spawn(move || {
        let mut system = system;
        system.build();
        system.validate().unwrap()
    })
    .join()
    .unwrap();
    assert!(valid);
}
