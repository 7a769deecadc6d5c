//! The hardware description store.
//!
//! A [`HwDesc`] is an explicit context value owned by the caller; there is
//! no process-global state. It holds one record per subsystem, built during
//! the load phase and queried read-only afterwards. Load one subsystem at a
//! time from a single thread; once loading is done the store can be shared
//! freely across readers, since nothing mutates it post-load.
//!
//! Lookup accessors never mutate state: an unknown subsystem name or an
//! out-of-range index yields `None` rather than an error.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::info;

use crate::error::{HwDescError, HwDescResult};
use crate::loader;
use crate::types::{
    Bus, Device, FanFru, FanInfo, FileRef, FruInfo, I2cOp, Led, LedInfo, LedType, Port, PortInfo,
    Psu, PsuInfo, Sensor, ThermalInfo,
};

/// All loaded state for one subsystem.
///
/// Domain tables start empty/default and are only replaced wholesale when
/// their domain load completes, so a failed load leaves the prior state.
#[derive(Debug, Default)]
pub(crate) struct Subsystem {
    /// Directory holding this subsystem's description files.
    pub(crate) dir: PathBuf,
    /// Free-text info string from the manifest.
    pub(crate) info: String,
    /// Logical file-role name to file association.
    pub(crate) files: HashMap<String, FileRef>,

    pub(crate) buses: HashMap<String, Bus>,
    pub(crate) devices: HashMap<String, Device>,
    pub(crate) init_ops: Vec<I2cOp>,

    pub(crate) thermal: ThermalInfo,
    pub(crate) sensors: Vec<Sensor>,

    pub(crate) port_info: PortInfo,
    pub(crate) ports: Vec<Port>,

    pub(crate) fan_info: FanInfo,
    pub(crate) fan_frus: Vec<FanFru>,

    pub(crate) psu_info: PsuInfo,
    pub(crate) psus: Vec<Psu>,

    pub(crate) led_info: LedInfo,
    pub(crate) led_types: Vec<LedType>,
    pub(crate) leds: Vec<Led>,

    pub(crate) fru: Option<FruInfo>,
}

/// Typed, queryable store of the hardware description, keyed by subsystem.
#[derive(Debug, Default)]
pub struct HwDesc {
    subsystems: HashMap<String, Subsystem>,
}

impl HwDesc {
    /// Creates an empty store with zero subsystems.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subsystem(&self, name: &str) -> Option<&Subsystem> {
        self.subsystems.get(name)
    }

    pub(crate) fn subsystem_mut(&mut self, name: &str) -> HwDescResult<&mut Subsystem> {
        self.subsystems
            .get_mut(name)
            .ok_or_else(|| HwDescError::unknown_subsystem(name))
    }

    /// Registers a subsystem and loads its base description (the manifest)
    /// from `dir`.
    ///
    /// Fails if the name is already registered (existing state is left
    /// untouched) or if the manifest is missing or malformed. A manifest
    /// failure leaves the subsystem registered with empty tables, so the
    /// store stays in a well-defined state.
    pub fn add_subsystem(&mut self, name: &str, dir: impl Into<PathBuf>) -> HwDescResult<()> {
        if self.subsystems.contains_key(name) {
            return Err(HwDescError::duplicate_subsystem(name));
        }

        let sub = Subsystem {
            dir: dir.into(),
            ..Subsystem::default()
        };
        self.subsystems.insert(name.to_string(), sub);

        loader::load_manifest(self.subsystem_mut(name)?)?;
        info!(subsystem = name, "added subsystem");
        Ok(())
    }

    /// Names of all registered subsystems.
    pub fn subsystem_names(&self) -> Vec<&str> {
        self.subsystems.keys().map(String::as_str).collect()
    }

    /// Free-text info string from the subsystem manifest.
    pub fn subsystem_info(&self, subsystem: &str) -> Option<&str> {
        self.subsystem(subsystem).map(|s| s.info.as_str())
    }

    /// Loads the devices domain: buses, devices and the global init list.
    ///
    /// Absence of a devices file in the manifest is not an error; the
    /// tables stay empty.
    pub fn load_devices(&mut self, subsystem: &str) -> HwDescResult<()> {
        loader::load_devices(self.subsystem_mut(subsystem)?)
    }

    /// Loads the thermal domain: thermal summary and sensor table.
    pub fn load_thermal(&mut self, subsystem: &str) -> HwDescResult<()> {
        loader::load_thermal(self.subsystem_mut(subsystem)?)
    }

    /// Loads the ports domain: port summary and port table.
    pub fn load_ports(&mut self, subsystem: &str) -> HwDescResult<()> {
        loader::load_ports(self.subsystem_mut(subsystem)?)
    }

    /// Loads the fans domain: fan summary and fan FRU table.
    pub fn load_fans(&mut self, subsystem: &str) -> HwDescResult<()> {
        loader::load_fans(self.subsystem_mut(subsystem)?)
    }

    /// Loads the power domain: PSU summary and PSU table.
    pub fn load_psus(&mut self, subsystem: &str) -> HwDescResult<()> {
        loader::load_psus(self.subsystem_mut(subsystem)?)
    }

    /// Loads the LEDs domain: LED summary, LED types and LED table.
    pub fn load_leds(&mut self, subsystem: &str) -> HwDescResult<()> {
        loader::load_leds(self.subsystem_mut(subsystem)?)
    }

    /// Loads the FRU identity record. Unlike the other domains the FRU
    /// file is mandatory: a manifest without it fails the load.
    pub fn load_fru(&mut self, subsystem: &str) -> HwDescResult<()> {
        loader::load_fru(self.subsystem_mut(subsystem)?)
    }

    /// Registers an extra device into a loaded subsystem.
    ///
    /// Fails on an unknown subsystem or a duplicate device name.
    pub fn add_device(&mut self, subsystem: &str, device: Device) -> HwDescResult<()> {
        let sub = self.subsystem_mut(subsystem)?;
        if sub.devices.contains_key(&device.name) {
            return Err(HwDescError::DuplicateDevice {
                subsystem: subsystem.to_string(),
                device: device.name,
            });
        }
        sub.devices.insert(device.name.clone(), device);
        Ok(())
    }

    /// Looks up a device by name.
    pub fn find_device(&self, subsystem: &str, name: &str) -> Option<&Device> {
        self.subsystem(subsystem)?.devices.get(name)
    }

    /// Looks up a bus by name.
    pub fn find_bus(&self, subsystem: &str, name: &str) -> Option<&Bus> {
        self.subsystem(subsystem)?.buses.get(name)
    }

    /// Looks up a file association by logical role name.
    pub fn find_file(&self, subsystem: &str, role: &str) -> Option<&FileRef> {
        self.subsystem(subsystem)?.files.get(role)
    }

    /// The subsystem's global init operation list, in declaration order.
    pub fn init_ops(&self, subsystem: &str) -> Option<&[I2cOp]> {
        self.subsystem(subsystem).map(|s| s.init_ops.as_slice())
    }

    /// Thermal summary for a subsystem.
    pub fn thermal_info(&self, subsystem: &str) -> Option<&ThermalInfo> {
        self.subsystem(subsystem).map(|s| &s.thermal)
    }

    /// Sensor at `idx`, 0-based.
    pub fn sensor(&self, subsystem: &str, idx: usize) -> Option<&Sensor> {
        self.subsystem(subsystem)?.sensors.get(idx)
    }

    /// Number of sensors in a subsystem.
    pub fn sensor_count(&self, subsystem: &str) -> Option<usize> {
        self.subsystem(subsystem).map(|s| s.sensors.len())
    }

    /// Port summary for a subsystem.
    pub fn port_info(&self, subsystem: &str) -> Option<&PortInfo> {
        self.subsystem(subsystem).map(|s| &s.port_info)
    }

    /// Port at `idx`, 0-based.
    pub fn port(&self, subsystem: &str, idx: usize) -> Option<&Port> {
        self.subsystem(subsystem)?.ports.get(idx)
    }

    /// Number of ports in a subsystem.
    pub fn port_count(&self, subsystem: &str) -> Option<usize> {
        self.subsystem(subsystem).map(|s| s.ports.len())
    }

    /// Fan summary for a subsystem.
    pub fn fan_info(&self, subsystem: &str) -> Option<&FanInfo> {
        self.subsystem(subsystem).map(|s| &s.fan_info)
    }

    /// Fan FRU at `idx`, 0-based.
    pub fn fan_fru(&self, subsystem: &str, idx: usize) -> Option<&FanFru> {
        self.subsystem(subsystem)?.fan_frus.get(idx)
    }

    /// Number of fan FRUs in a subsystem.
    pub fn fan_fru_count(&self, subsystem: &str) -> Option<usize> {
        self.subsystem(subsystem).map(|s| s.fan_frus.len())
    }

    /// PSU summary for a subsystem.
    pub fn psu_info(&self, subsystem: &str) -> Option<&PsuInfo> {
        self.subsystem(subsystem).map(|s| &s.psu_info)
    }

    /// PSU at `idx`, 0-based.
    pub fn psu(&self, subsystem: &str, idx: usize) -> Option<&Psu> {
        self.subsystem(subsystem)?.psus.get(idx)
    }

    /// Number of PSUs in a subsystem.
    pub fn psu_count(&self, subsystem: &str) -> Option<usize> {
        self.subsystem(subsystem).map(|s| s.psus.len())
    }

    /// LED summary for a subsystem.
    pub fn led_info(&self, subsystem: &str) -> Option<&LedInfo> {
        self.subsystem(subsystem).map(|s| &s.led_info)
    }

    /// LED at `idx`, 0-based.
    pub fn led(&self, subsystem: &str, idx: usize) -> Option<&Led> {
        self.subsystem(subsystem)?.leds.get(idx)
    }

    /// Number of LEDs in a subsystem.
    pub fn led_count(&self, subsystem: &str) -> Option<usize> {
        self.subsystem(subsystem).map(|s| s.leds.len())
    }

    /// LED type at `idx`, 0-based.
    pub fn led_type(&self, subsystem: &str, idx: usize) -> Option<&LedType> {
        self.subsystem(subsystem)?.led_types.get(idx)
    }

    /// Number of LED types in a subsystem.
    pub fn led_type_count(&self, subsystem: &str) -> Option<usize> {
        self.subsystem(subsystem).map(|s| s.led_types.len())
    }

    /// FRU identity record, present once `load_fru` has succeeded.
    pub fn fru_info(&self, subsystem: &str) -> Option<&FruInfo> {
        self.subsystem(subsystem)?.fru.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Device;

    #[test]
    fn test_unknown_subsystem_lookups_return_none() {
        let store = HwDesc::new();
        assert!(store.find_device("nope", "dev").is_none());
        assert!(store.find_bus("nope", "bus").is_none());
        assert!(store.sensor_count("nope").is_none());
        assert!(store.fru_info("nope").is_none());
    }

    #[test]
    fn test_add_device_requires_subsystem() {
        let mut store = HwDesc::new();
        let dev = Device {
            name: "cpld".to_string(),
            bus: "bus0".to_string(),
            dev_type: "cpld".to_string(),
            address: 0x33,
            pre: Vec::new(),
            post: Vec::new(),
        };
        assert!(matches!(
            store.add_device("nope", dev),
            Err(HwDescError::UnknownSubsystem { .. })
        ));
    }
}
