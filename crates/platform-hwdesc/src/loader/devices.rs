//! Devices domain: buses, devices and the global init operation list.
//!
//! All three sections live in the one devices file. The whole decode is
//! staged before anything is committed, and every device's bus reference
//! is checked against the bus table from the same document.

use std::collections::HashMap;

use serde_yaml::Value;
use tracing::info;

use super::ops;
use crate::error::{HwDescError, HwDescResult};
use crate::node;
use crate::roles;
use crate::store::Subsystem;
use crate::types::{Bus, Device, I2cOp};

/// Decodes an optional companion-operation list. An absent list and an
/// empty list behave identically everywhere downstream.
fn decode_op_list(node: &Value, key: &str) -> HwDescResult<Vec<I2cOp>> {
    match node::opt(node, key) {
        Some(v) => ops::decode_ops(
            v.as_sequence()
                .ok_or_else(|| HwDescError::decode(key, "expected a sequence"))?,
        ),
        None => Ok(Vec::new()),
    }
}

fn decode_device(node: &Value) -> HwDescResult<Device> {
    let pre = decode_op_list(node, "pre")?;
    let post = decode_op_list(node, "post")?;

    Ok(Device {
        name: node::str_field(node, "name")?,
        bus: node::str_field(node, "bus")?,
        dev_type: node::str_field(node, "dev_type")?,
        address: node::u16_field(node, "address")?,
        pre,
        post,
    })
}

fn decode_bus(node: &Value) -> HwDescResult<Bus> {
    Ok(Bus {
        name: node::str_field(node, "name")?,
        devname: node::str_field(node, "dev_name")?,
        smbus: node::bool_field(node, "smbus")?,
    })
}

pub(crate) fn load(sub: &mut Subsystem) -> HwDescResult<()> {
    let Some(doc) = super::domain_document(sub, roles::DEVICES)? else {
        return Ok(());
    };

    let mut devices = HashMap::new();
    for item in node::seq_field(&doc, "devices")? {
        let device = decode_device(item)?;
        if devices.contains_key(&device.name) {
            return Err(HwDescError::decode(
                "devices",
                format!("duplicate device name '{}'", device.name),
            ));
        }
        devices.insert(device.name.clone(), device);
    }

    let init_ops = ops::decode_ops(node::seq_field(&doc, "init")?)?;

    let mut buses = HashMap::new();
    for item in node::seq_field(&doc, "buses")? {
        let bus = decode_bus(item)?;
        if buses.contains_key(&bus.name) {
            return Err(HwDescError::decode(
                "buses",
                format!("duplicate bus name '{}'", bus.name),
            ));
        }
        buses.insert(bus.name.clone(), bus);
    }

    for device in devices.values() {
        if !buses.contains_key(&device.bus) {
            return Err(HwDescError::decode(
                "devices",
                format!(
                    "device '{}' references unknown bus '{}'",
                    device.name, device.bus
                ),
            ));
        }
    }

    info!(
        devices = devices.len(),
        buses = buses.len(),
        init_ops = init_ops.len(),
        "loaded devices domain"
    );
    sub.devices = devices;
    sub.buses = buses;
    sub.init_ops = init_ops;
    Ok(())
}
