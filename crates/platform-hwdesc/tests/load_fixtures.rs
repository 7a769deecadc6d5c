//! End-to-end load tests against the on-disk fixture subsystem.
//!
//! The fixture describes one bus, three devices and a three-entry init
//! list, plus every optional domain. Loading it and reading every typed
//! table back through the indexed getters must reproduce each field
//! exactly as declared.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use platform_hwdesc::types::{
    FanControlType, FanDirection, FanSpeed, LedTypeValue, ModuleSignals,
};
use platform_hwdesc::{Direction, HwDesc, HwDescError};

const SUBSYSTEM: &str = "base";

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Loads every domain of the fixture subsystem.
fn load_all() -> HwDesc {
    let mut store = HwDesc::new();
    store
        .add_subsystem(SUBSYSTEM, fixture_dir())
        .expect("add_subsystem failed");
    store.load_devices(SUBSYSTEM).expect("devices load failed");
    store.load_thermal(SUBSYSTEM).expect("thermal load failed");
    store.load_ports(SUBSYSTEM).expect("ports load failed");
    store.load_fans(SUBSYSTEM).expect("fans load failed");
    store.load_psus(SUBSYSTEM).expect("power load failed");
    store.load_leds(SUBSYSTEM).expect("leds load failed");
    store.load_fru(SUBSYSTEM).expect("fru load failed");
    store
}

#[test]
fn add_subsystem_twice_fails_and_keeps_first() {
    let mut store = HwDesc::new();
    store.add_subsystem(SUBSYSTEM, fixture_dir()).unwrap();
    store.load_devices(SUBSYSTEM).unwrap();

    let err = store.add_subsystem(SUBSYSTEM, fixture_dir()).unwrap_err();
    assert!(matches!(err, HwDescError::DuplicateSubsystem { .. }));

    // First subsystem's data is unchanged.
    assert_eq!(store.find_device(SUBSYSTEM, "cpld").unwrap().address, 0x33);
    assert_eq!(store.init_ops(SUBSYSTEM).unwrap().len(), 3);
}

#[test]
fn add_subsystem_with_missing_manifest_fails() {
    let mut store = HwDesc::new();
    let err = store.add_subsystem("bad", "no/such/dir").unwrap_err();
    assert!(matches!(err, HwDescError::FileRead { .. }));
}

#[test]
fn manifest_associations_are_queryable() {
    let store = load_all();

    assert_eq!(
        store.subsystem_info(SUBSYSTEM).unwrap(),
        "Fixture switch base subsystem"
    );
    let devices = store.find_file(SUBSYSTEM, "devices").unwrap();
    assert_eq!(devices.name, "devices");
    assert_eq!(devices.filename, "devices.yaml");
    assert!(store.find_file(SUBSYSTEM, "nonexistent").is_none());
}

#[test]
fn devices_domain_round_trip() {
    let store = load_all();

    let bus = store.find_bus(SUBSYSTEM, "bus0").unwrap();
    assert_eq!(bus.name, "bus0");
    assert_eq!(bus.devname, "/dev/i2c-0");
    assert!(!bus.smbus);

    let cpld = store.find_device(SUBSYSTEM, "cpld").unwrap();
    assert_eq!(cpld.bus, "bus0");
    assert_eq!(cpld.dev_type, "cpld");
    assert_eq!(cpld.address, 0x33);
    assert!(cpld.pre.is_empty());
    assert!(cpld.post.is_empty());

    let eeprom = store.find_device(SUBSYSTEM, "eeprom1").unwrap();
    assert_eq!(eeprom.address, 0x50);
    assert_eq!(eeprom.pre.len(), 1);
    assert_eq!(eeprom.pre[0].device, "mux1");
    assert_eq!(eeprom.pre[0].register, None);
    assert_eq!(eeprom.pre[0].data, vec![0x08]);
    assert_eq!(eeprom.post.len(), 1);
    assert_eq!(eeprom.post[0].data, vec![0x00]);

    let init = store.init_ops(SUBSYSTEM).unwrap();
    assert_eq!(init.len(), 3);
    assert_eq!(init[0].device, "cpld");
    assert_eq!(init[0].register, Some(0x02));
    assert_eq!(init[0].data, vec![0x01]);
    assert_eq!(init[0].direction, Direction::Write);
    assert_eq!(init[1].device, "mux1");
    assert_eq!(init[1].register, None);
    assert!(!init[1].negative_polarity);
    assert_eq!(init[2].register, Some(0x05));
    assert!(init[2].negative_polarity);

    assert!(store.find_device(SUBSYSTEM, "nonexistent").is_none());
}

#[test]
fn thermal_domain_round_trip() {
    let store = load_all();

    let thermal = store.thermal_info(SUBSYSTEM).unwrap();
    assert_eq!(thermal.polling_period, 5000);
    assert!(thermal.auto_shutdown);

    assert_eq!(store.sensor_count(SUBSYSTEM), Some(2));
    let s1 = store.sensor(SUBSYSTEM, 0).unwrap();
    assert_eq!(s1.number, 1);
    assert_eq!(s1.location, "Faceplate side of switch chip");
    assert_eq!(s1.device, "tmp75_1");
    assert_eq!(s1.sensor_type, "lm75");
    assert_eq!(s1.alarm_thresholds.emergency_on, 85.0);
    assert_eq!(s1.alarm_thresholds.low_crit, 40.0);
    assert_eq!(s1.fan_thresholds.max_on, 68.0);
    assert_eq!(s1.fan_thresholds.medium_off, 48.0);

    let s2 = store.sensor(SUBSYSTEM, 1).unwrap();
    assert_eq!(s2.number, 2);
    assert_eq!(s2.alarm_thresholds.min, 40.0);

    assert!(store.sensor(SUBSYSTEM, 2).is_none());
}

#[test]
fn ports_domain_round_trip() {
    let store = load_all();

    let info = store.port_info(SUBSYSTEM).unwrap();
    assert_eq!(info.number_ports, 2);
    assert_eq!(info.max_port_speed, 100_000);
    assert_eq!(info.max_transmission_unit, 9216);
    assert_eq!(info.max_lag_count, 64);
    assert_eq!(info.max_lag_member_count, 8);
    assert!(info.l3_port_requires_internal_vlan);

    assert_eq!(store.port_count(SUBSYSTEM), Some(2));

    let p1 = store.port(SUBSYSTEM, 0).unwrap();
    assert_eq!(p1.name, "port1");
    assert!(p1.pluggable);
    assert_eq!(p1.connector, "SFP_PLUS");
    assert_eq!(p1.max_speed, 10_000);
    assert_eq!(p1.speeds, vec![1000, 10_000]);
    assert_eq!(p1.device, 0);
    assert_eq!(p1.device_port, 1);
    assert_eq!(p1.capabilities, vec!["enable", "autoneg"]);
    assert!(p1.subports.is_empty());
    assert_eq!(p1.supported_modules, vec!["SFP_SX", "SFP_LX"]);
    assert_eq!(p1.module_eeprom.as_deref(), Some("port1_eeprom"));
    assert_eq!(p1.parent_port, None);
    assert_eq!(p1.subport_number, 0);

    let ModuleSignals::Sfp(signals) = &p1.module_signals else {
        panic!("port1 must carry SFP signals");
    };
    let tx_disable = signals.tx_disable.as_ref().unwrap();
    assert_eq!(tx_disable.device, "cpld");
    assert_eq!(tx_disable.register, 0x10);
    assert_eq!(tx_disable.register_size, 1);
    assert_eq!(tx_disable.bit_mask, 0x01);
    assert!(!tx_disable.negative_polarity);
    assert!(signals.mod_present.as_ref().unwrap().negative_polarity);
    assert!(signals.interrupt.is_none());

    let p2 = store.port(SUBSYSTEM, 1).unwrap();
    assert_eq!(p2.subports.len(), 4);
    let ModuleSignals::Qsfp28(signals) = &p2.module_signals else {
        panic!("port2 must carry QSFP28 signals");
    };
    let reset = signals.reset.as_ref().unwrap();
    assert_eq!(reset.register_size, 2);
    assert_eq!(reset.bit_mask, 0x0100);
    assert!(signals.interrupt_mask.is_some());
}

#[test]
fn fans_domain_round_trip() {
    let store = load_all();

    let info = store.fan_info(SUBSYSTEM).unwrap();
    assert_eq!(info.number_fan_frus, 2);
    assert_eq!(info.control_type, FanControlType::Single);
    assert_eq!(info.speed_min, FanSpeed::Normal);
    assert_eq!(info.direction, FanDirection::FrontToBack);
    assert_eq!(info.speed_settings.slow, 0x19);
    assert_eq!(info.speed_settings.max, 0x64);
    assert_eq!(info.direction_values.f2b, 0x00);
    assert_eq!(info.direction_values.b2f, 0x01);
    // Not declared in the fixture, so the defaults apply.
    assert_eq!(info.direction_control_values.f2b, 0x0);
    assert_eq!(info.direction_control_values.b2f, 0x1);
    assert!(info.direction_control.is_none());
    assert_eq!(info.speed_multiplier, 150);
    assert_eq!(info.led_values.off, 0x00);
    assert_eq!(info.led_values.good, 0x01);
    assert_eq!(info.led_values.fault, 0x02);
    let speed_control = info.speed_control.as_ref().unwrap();
    assert_eq!(speed_control.register, 0x30);
    assert_eq!(speed_control.bit_mask, 0xFF);

    assert_eq!(store.fan_fru_count(SUBSYSTEM), Some(2));
    let fru1 = store.fan_fru(SUBSYSTEM, 0).unwrap();
    assert_eq!(fru1.number, 1);
    assert_eq!(fru1.fans.len(), 2);
    assert_eq!(fru1.fans[0].name, "fan1a");
    assert_eq!(fru1.fans[0].fault.bit_mask, 0x01);
    assert_eq!(fru1.fans[1].speed.register, 0x36);
    assert_eq!(fru1.leds.bit_mask, 0x03);
    assert_eq!(fru1.direction_detect.register, 0x33);

    let fru2 = store.fan_fru(SUBSYSTEM, 1).unwrap();
    assert_eq!(fru2.fans.len(), 1);
    assert_eq!(fru2.fans[0].name, "fan2a");
}

#[test]
fn power_domain_round_trip() {
    let store = load_all();

    let info = store.psu_info(SUBSYSTEM).unwrap();
    assert_eq!(info.number_psus, 2);
    assert_eq!(info.polling_period, 10_000);

    assert_eq!(store.psu_count(SUBSYSTEM), Some(2));
    let psu1 = store.psu(SUBSYSTEM, 0).unwrap();
    assert_eq!(psu1.number, 1);
    let present = psu1.present.as_ref().unwrap();
    assert_eq!(present.register, 0x40);
    assert!(present.negative_polarity);
    assert!(psu1.input_ok.is_some());
    assert!(psu1.output_ok.is_some());

    let psu2 = store.psu(SUBSYSTEM, 1).unwrap();
    assert!(psu2.output_ok.is_none());
}

#[test]
fn leds_domain_round_trip() {
    let store = load_all();

    let info = store.led_info(SUBSYSTEM).unwrap();
    assert_eq!(info.number_leds, 1);
    assert_eq!(info.number_types, 1);

    assert_eq!(store.led_type_count(SUBSYSTEM), Some(1));
    let led_type = store.led_type(SUBSYSTEM, 0).unwrap();
    assert_eq!(led_type.led_type, "loc");
    assert_eq!(led_type.value, LedTypeValue::Loc);
    assert_eq!(led_type.settings.off, 0x00);
    assert_eq!(led_type.settings.on, 0x01);
    assert_eq!(led_type.settings.flashing, 0x02);

    assert_eq!(store.led_count(SUBSYSTEM), Some(1));
    let led = store.led(SUBSYSTEM, 0).unwrap();
    assert_eq!(led.name, "loc_led");
    assert_eq!(led.led_type, "loc");
    assert_eq!(led.access.register, 0x50);
    assert_eq!(led.access.bit_mask, 0x03);
}

#[test]
fn fru_domain_round_trip() {
    let store = load_all();

    let fru = store.fru_info(SUBSYSTEM).unwrap();
    assert_eq!(fru.country_code, "US");
    assert_eq!(fru.device_version, 2);
    assert_eq!(fru.diag_version, "1.0.0");
    assert_eq!(fru.label_revision, "A0");
    assert_eq!(fru.base_mac_address, "48:0f:cf:00:00:01");
    assert_eq!(fru.manufacture_date, "2015-09-01");
    assert_eq!(fru.manufacturer, "Edgecore");
    assert_eq!(fru.num_macs, 74);
    assert_eq!(fru.onie_version, "2015.05");
    assert_eq!(fru.part_number, "AS5712-54X");
    assert_eq!(fru.platform_name, "x86_64-accton_as5712_54x-r0");
    assert_eq!(fru.product_name, "AS5712-54X");
    assert_eq!(fru.serial_number, "571254X1523001");
    assert_eq!(fru.service_tag, "NONE");
    assert_eq!(fru.vendor, "Edgecore");
}

/// Writes a manifest plus one domain file into a temp dir.
fn temp_subsystem(domain: &str, filename: &str, content: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let manifest = format!(
        "subsystem_info: Temp subsystem\nfiles:\n  - name: {domain}\n    filename: {filename}\n"
    );
    fs::write(dir.path().join("manifest.yaml"), manifest).unwrap();
    fs::write(dir.path().join(filename), content).unwrap();
    dir
}

#[test]
fn malformed_domain_file_fails_and_leaves_table_default() {
    let dir = temp_subsystem("thermal", "thermal.yaml", "thermal_info: [unclosed\n");
    let mut store = HwDesc::new();
    store.add_subsystem("tmp", dir.path()).unwrap();

    let err = store.load_thermal("tmp").unwrap_err();
    assert!(matches!(err, HwDescError::Malformed { .. }));
    assert_eq!(store.sensor_count("tmp"), Some(0));
    assert_eq!(store.thermal_info("tmp").unwrap().polling_period, 0);
}

#[test]
fn schema_invalid_domain_file_fails_and_leaves_table_default() {
    // Well-formed YAML, but sensors entries are missing required fields.
    let dir = temp_subsystem(
        "thermal",
        "thermal.yaml",
        "thermal_info:\n  polling_period: 100\n  auto_shutdown: false\nsensors:\n  - number: 1\n",
    );
    let mut store = HwDesc::new();
    store.add_subsystem("tmp", dir.path()).unwrap();

    let err = store.load_thermal("tmp").unwrap_err();
    assert!(matches!(err, HwDescError::Decode { .. }));
    // The staged decode failed, so nothing was committed.
    assert_eq!(store.thermal_info("tmp").unwrap().polling_period, 0);
}

#[test]
fn undeclared_domain_is_not_an_error() {
    let dir = temp_subsystem("devices", "devices.yaml", "devices: []\ninit: []\nbuses: []\n");
    let mut store = HwDesc::new();
    store.add_subsystem("tmp", dir.path()).unwrap();

    store.load_thermal("tmp").unwrap();
    store.load_ports("tmp").unwrap();
    store.load_fans("tmp").unwrap();
    store.load_psus("tmp").unwrap();
    store.load_leds("tmp").unwrap();
    assert_eq!(store.sensor_count("tmp"), Some(0));

    // The fru record is mandatory, unlike the other domains.
    let err = store.load_fru("tmp").unwrap_err();
    assert!(matches!(err, HwDescError::MissingFile { .. }));
}

#[test]
fn device_with_unknown_bus_fails_load() {
    let content = "\
devices:
  - name: widget
    bus: busX
    dev_type: cpld
    address: '0x20'
init: []
buses:
  - name: bus0
    dev_name: /dev/i2c-0
    smbus: true
";
    let dir = temp_subsystem("devices", "devices.yaml", content);
    let mut store = HwDesc::new();
    store.add_subsystem("tmp", dir.path()).unwrap();

    let err = store.load_devices("tmp").unwrap_err();
    assert!(matches!(err, HwDescError::Decode { .. }));
    assert!(store.find_device("tmp", "widget").is_none());
    assert!(store.find_bus("tmp", "bus0").is_none());
}

#[test]
fn loaders_reject_unknown_subsystem() {
    let mut store = HwDesc::new();
    assert!(matches!(
        store.load_devices("ghost"),
        Err(HwDescError::UnknownSubsystem { .. })
    ));
}
