//! Fans domain: fan summary/control description and the fan FRU table.

use serde_yaml::Value;
use tracing::info;

use super::ops;
use crate::error::{HwDescError, HwDescResult};
use crate::node;
use crate::roles;
use crate::store::Subsystem;
use crate::types::{
    DirectionValues, Fan, FanControlType, FanDirection, FanFru, FanInfo, FanLedValues, FanSpeed,
    SpeedSettings,
};

fn decode_control_type(node: &Value, key: &str) -> HwDescResult<FanControlType> {
    match node::str_field(node, key)?.as_str() {
        "SINGLE" => Ok(FanControlType::Single),
        "PER_FAN" => Ok(FanControlType::PerFan),
        other => Err(HwDescError::decode(
            key,
            format!("'{other}' is not a fan control type"),
        )),
    }
}

fn decode_speed(node: &Value, key: &str) -> HwDescResult<FanSpeed> {
    match node::str_field(node, key)?.as_str() {
        "SLOW" => Ok(FanSpeed::Slow),
        "NORMAL" => Ok(FanSpeed::Normal),
        "MEDIUM" => Ok(FanSpeed::Medium),
        "FAST" => Ok(FanSpeed::Fast),
        "MAX" => Ok(FanSpeed::Max),
        other => Err(HwDescError::decode(
            key,
            format!("'{other}' is not a fan speed"),
        )),
    }
}

fn decode_direction(node: &Value, key: &str) -> HwDescResult<FanDirection> {
    match node::str_field(node, key)?.as_str() {
        "F2B" => Ok(FanDirection::FrontToBack),
        "B2F" => Ok(FanDirection::BackToFront),
        "FIXED" => Ok(FanDirection::Fixed),
        "SETTABLE" => Ok(FanDirection::Settable),
        other => Err(HwDescError::decode(
            key,
            format!("'{other}' is not a fan direction"),
        )),
    }
}

fn decode_speed_settings(node: &Value) -> HwDescResult<SpeedSettings> {
    Ok(SpeedSettings {
        slow: node::u8_field(node, "SLOW")?,
        normal: node::u8_field(node, "NORMAL")?,
        medium: node::u8_field(node, "MEDIUM")?,
        fast: node::u8_field(node, "FAST")?,
        max: node::u8_field(node, "MAX")?,
    })
}

fn decode_direction_values(node: &Value) -> HwDescResult<DirectionValues> {
    Ok(DirectionValues {
        f2b: node::u8_field(node, "F2B")?,
        b2f: node::u8_field(node, "B2F")?,
    })
}

fn decode_led_values(node: &Value) -> HwDescResult<FanLedValues> {
    Ok(FanLedValues {
        off: node::u8_field(node, "OFF")?,
        good: node::u8_field(node, "GOOD")?,
        fault: node::u8_field(node, "FAULT")?,
    })
}

fn decode_fan_info(node: &Value) -> HwDescResult<FanInfo> {
    // Direction control values default to F2B=0/B2F=1 unless declared.
    let direction_control_values = match node::opt(node, "fan_direction_control_values") {
        Some(v) => decode_direction_values(v)?,
        None => DirectionValues { f2b: 0x0, b2f: 0x1 },
    };

    Ok(FanInfo {
        number_fan_frus: node::u32_field(node, "number_fan_frus")?,
        control_type: decode_control_type(node, "fan_speed_control_type")?,
        speed_control: Some(ops::req_bit_op(node, "fan_speed_control")?),
        speed_min: decode_speed(node, "fan_speed_min")?,
        speed_settings: decode_speed_settings(node::req(node, "fan_speed_settings")?)?,
        direction: decode_direction(node, "fan_direction")?,
        direction_control: ops::opt_bit_op(node, "fan_direction_control")?,
        direction_values: decode_direction_values(node::req(node, "fan_direction_values")?)?,
        direction_control_values,
        speed_multiplier: node::u32_field(node, "fan_speed_multiplier")?,
        led_values: decode_led_values(node::req(node, "fan_led_values")?)?,
    })
}

fn decode_fan(node: &Value) -> HwDescResult<Fan> {
    Ok(Fan {
        name: node::str_field(node, "name")?,
        fault: ops::req_bit_op(node, "fault")?,
        speed: ops::req_bit_op(node, "speed")?,
    })
}

fn decode_fan_fru(node: &Value) -> HwDescResult<FanFru> {
    Ok(FanFru {
        number: node::u32_field(node, "number")?,
        leds: ops::req_bit_op(node, "fan_leds")?,
        direction_detect: ops::req_bit_op(node, "fan_direction_detect")?,
        fans: node::seq_field(node, "fans")?
            .iter()
            .map(decode_fan)
            .collect::<HwDescResult<Vec<_>>>()?,
    })
}

pub(crate) fn load(sub: &mut Subsystem) -> HwDescResult<()> {
    let Some(doc) = super::domain_document(sub, roles::FANS)? else {
        return Ok(());
    };

    let fan_info = decode_fan_info(node::req(&doc, "fan_info")?)?;
    let fan_frus = node::seq_field(&doc, "fan_frus")?
        .iter()
        .map(decode_fan_fru)
        .collect::<HwDescResult<Vec<_>>>()?;

    info!(fan_frus = fan_frus.len(), "loaded fans domain");
    sub.fan_info = fan_info;
    sub.fan_frus = fan_frus;
    Ok(())
}
