//! # Configuration Loading Tests
//!
//! JSON parsing, defaults, and conversion into a validated `System`.

use std::io::Write;

use pretty_assertions::assert_eq;
use socgen_core::common::ConfigError;
use socgen_core::config::SocConfig;
use socgen_core::soc::{BusType, PeripheralDomain};

const FULL: &str = r#"{
    "bus_type": "NtoM",
    "cpu": { "name": "cv32e40p", "params": { "fpu": true, "num_mhpmcounters": "4", "zfinx": null } },
    "memory": {
        "regions": [
            { "id": "ram0", "size": 32768 },
            { "id": "il0", "size": 65536, "banks": 4, "interleaved": true }
        ]
    },
    "peripherals": {
        "base": {
            "start": 131072,
            "length": 65536,
            "devices": [
                { "name": "soc_ctrl", "length": 4096 },
                { "name": "bootrom", "length": 4096, "offset": 8192 }
            ]
        },
        "user": { "start": 196608, "length": 65536, "devices": [ { "name": "gpio", "length": 256 } ] }
    }
}"#;

#[test]
fn full_document_builds_a_valid_system() {
    let config = SocConfig::from_json(FULL).unwrap();
    assert_eq!(config.bus_type, BusType::NtoM);

    let mut system = config.into_system().unwrap();
    system.build();
    assert_eq!(system.validate(), Ok(true));

    let cpu = system.cpu().unwrap();
    assert_eq!(cpu.name(), "cv32e40p");
    assert_eq!(cpu.render("fpu"), "1");
    assert_eq!(cpu.render("num_mhpmcounters"), "4");
    assert!(!cpu.is_defined("zfinx"));

    let memory = system.memory_ss().unwrap();
    assert_eq!(memory.regions().len(), 2);
    assert!(memory.has_interleaved_ram());

    let base = system.base_peripheral_domain().unwrap();
    let placed: Vec<(&str, Option<u64>)> = base
        .peripherals()
        .iter()
        .map(|p| (p.name(), p.offset()))
        .collect();
    assert_eq!(
        placed,
        vec![("soc_ctrl", Some(0x3000)), ("bootrom", Some(0x2000))]
    );
}

#[test]
fn empty_document_defaults_to_single_master_bus() {
    let config = SocConfig::from_json("{}").unwrap();
    assert_eq!(config.bus_type, BusType::OneToM);
    assert!(config.cpu.is_none());

    let system = config.into_system().unwrap();
    assert_eq!(system.validate(), Ok(false));
}

#[test]
fn region_banks_default_to_one() {
    let config =
        SocConfig::from_json(r#"{ "memory": { "regions": [ { "id": "ram0", "size": 4096 } ] } }"#)
            .unwrap();
    let region = &config.memory.unwrap().regions[0];
    assert_eq!(region.banks, 1);
    assert!(!region.interleaved);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SocConfig::from_json(r#"{ "bus": "NtoM" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn unknown_cpu_surfaces_at_conversion() {
    let config = SocConfig::from_json(r#"{ "cpu": { "name": "ibex" } }"#).unwrap();
    let err = config.into_system().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownCpu(name) if name == "ibex"));
}

#[test]
fn bad_parameter_surfaces_at_conversion() {
    let config =
        SocConfig::from_json(r#"{ "cpu": { "name": "cv32e40x", "params": { "x_ext": "maybe" } } }"#)
            .unwrap();
    let err = config.into_system().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidParameterValue { ref param, .. } if param == "x_ext"));
}

#[test]
fn zero_length_domain_surfaces_at_conversion() {
    let config = SocConfig::from_json(
        r#"{ "peripherals": { "user": { "start": 196608, "length": 0 } } }"#,
    )
    .unwrap();
    let err = config.into_system().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDomainLength(_)));
}

#[test]
fn interleaved_memory_on_default_bus_is_fatal() {
    let config = SocConfig::from_json(
        r#"{
            "cpu": { "name": "cv32e20" },
            "memory": { "regions": [ { "id": "il0", "size": 8192, "banks": 2, "interleaved": true } ] }
        }"#,
    )
    .unwrap();
    let system = config.into_system().unwrap();
    assert!(system.validate().is_err());
}

#[test]
fn from_path_reads_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FULL.as_bytes()).unwrap();

    let config = SocConfig::from_path(file.path()).unwrap();
    assert_eq!(config.cpu.map(|cpu| cpu.name), Some("cv32e40p".to_owned()));
}

#[test]
fn from_path_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    let err = SocConfig::from_path(&missing).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}
