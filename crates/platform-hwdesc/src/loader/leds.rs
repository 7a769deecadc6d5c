//! LEDs domain: LED summary, LED types and the LED table.

use serde_yaml::Value;
use tracing::info;

use super::ops;
use crate::error::HwDescResult;
use crate::node;
use crate::roles;
use crate::store::Subsystem;
use crate::types::{Led, LedInfo, LedType, LedTypeSettings, LedTypeValue};

fn decode_led_type(node: &Value) -> HwDescResult<LedType> {
    let led_type = node::str_field(node, "type")?;
    // Unrecognized type strings decode to Unknown rather than failing.
    let value = if led_type == "loc" {
        LedTypeValue::Loc
    } else {
        LedTypeValue::Unknown
    };

    let settings_node = node::req(node, "settings")?;
    Ok(LedType {
        led_type,
        value,
        settings: LedTypeSettings {
            off: node::u8_field(settings_node, "OFF")?,
            on: node::u8_field(settings_node, "ON")?,
            flashing: node::u8_field(settings_node, "FLASHING")?,
        },
    })
}

fn decode_led(node: &Value) -> HwDescResult<Led> {
    Ok(Led {
        name: node::str_field(node, "name")?,
        led_type: node::str_field(node, "led_type")?,
        access: ops::req_bit_op(node, "led_access")?,
    })
}

pub(crate) fn load(sub: &mut Subsystem) -> HwDescResult<()> {
    let Some(doc) = super::domain_document(sub, roles::LEDS)? else {
        return Ok(());
    };

    let info_node = node::req(&doc, "led_info")?;
    let led_info = LedInfo {
        number_leds: node::u32_field(info_node, "number_leds")?,
        number_types: node::u32_field(info_node, "number_types")?,
    };

    let led_types = node::seq_field(&doc, "led_types")?
        .iter()
        .map(decode_led_type)
        .collect::<HwDescResult<Vec<_>>>()?;

    let leds = node::seq_field(&doc, "leds")?
        .iter()
        .map(decode_led)
        .collect::<HwDescResult<Vec<_>>>()?;

    info!(
        leds = leds.len(),
        led_types = led_types.len(),
        "loaded leds domain"
    );
    sub.led_info = led_info;
    sub.led_types = led_types;
    sub.leds = leds;
    Ok(())
}
