//! Thermal domain: thermal summary and the sensor table.

use serde_yaml::Value;
use tracing::info;

use crate::error::HwDescResult;
use crate::node;
use crate::roles;
use crate::store::Subsystem;
use crate::types::{AlarmThresholds, FanThresholds, Sensor, ThermalInfo};

fn decode_alarm_thresholds(node: &Value) -> HwDescResult<AlarmThresholds> {
    Ok(AlarmThresholds {
        emergency_on: node::f32_field(node, "emergency_on")?,
        emergency_off: node::f32_field(node, "emergency_off")?,
        critical_on: node::f32_field(node, "critical_on")?,
        critical_off: node::f32_field(node, "critical_off")?,
        max_on: node::f32_field(node, "max_on")?,
        max_off: node::f32_field(node, "max_off")?,
        min: node::f32_field(node, "min")?,
        low_crit: node::f32_field(node, "low_crit")?,
    })
}

fn decode_fan_thresholds(node: &Value) -> HwDescResult<FanThresholds> {
    Ok(FanThresholds {
        max_on: node::f32_field(node, "max_on")?,
        max_off: node::f32_field(node, "max_off")?,
        fast_on: node::f32_field(node, "fast_on")?,
        fast_off: node::f32_field(node, "fast_off")?,
        medium_on: node::f32_field(node, "medium_on")?,
        medium_off: node::f32_field(node, "medium_off")?,
    })
}

fn decode_sensor(node: &Value) -> HwDescResult<Sensor> {
    Ok(Sensor {
        number: node::u32_field(node, "number")?,
        location: node::str_field(node, "location")?,
        device: node::str_field(node, "device")?,
        sensor_type: node::str_field(node, "sensor_type")?,
        alarm_thresholds: decode_alarm_thresholds(node::req(node, "alarm_thresholds")?)?,
        fan_thresholds: decode_fan_thresholds(node::req(node, "fan_thresholds")?)?,
    })
}

pub(crate) fn load(sub: &mut Subsystem) -> HwDescResult<()> {
    let Some(doc) = super::domain_document(sub, roles::THERMAL)? else {
        return Ok(());
    };

    let info_node = node::req(&doc, "thermal_info")?;
    let thermal = ThermalInfo {
        polling_period: node::u32_field(info_node, "polling_period")?,
        auto_shutdown: node::bool_field(info_node, "auto_shutdown")?,
    };

    let sensors = node::seq_field(&doc, "sensors")?
        .iter()
        .map(decode_sensor)
        .collect::<HwDescResult<Vec<_>>>()?;

    info!(sensors = sensors.len(), "loaded thermal domain");
    sub.thermal = thermal;
    sub.sensors = sensors;
    Ok(())
}
