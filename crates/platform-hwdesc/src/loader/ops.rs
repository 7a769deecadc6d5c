//! Shared decoding for byte-level and bit-level operation descriptors.

use serde_yaml::Value;

use crate::error::HwDescResult;
use crate::node;
use crate::types::{Direction, I2cBitOp, I2cOp};

/// Register literal meaning "no register, raw block transfer".
const NO_REGISTER: &str = "NONE";

fn polarity(node: &Value) -> HwDescResult<bool> {
    match node::opt_str_field(node, "polarity")? {
        Some(s) => Ok(s == "negative"),
        None => Ok(false),
    }
}

/// Decodes a byte-operation node. Description-declared operations are
/// always writes; reads are composed programmatically by callers.
pub(super) fn decode_op(node: &Value) -> HwDescResult<I2cOp> {
    let device = node::str_field(node, "device")?;

    let register_node = node::req(node, "register")?;
    let register = match register_node {
        Value::String(s) if s == NO_REGISTER => None,
        other => Some(node::u8_value(other, "register")?),
    };

    Ok(I2cOp {
        direction: Direction::Write,
        device,
        register,
        data: node::byte_list(node, "data")?,
        negative_polarity: polarity(node)?,
    })
}

/// Decodes a sequence of byte-operation nodes in declaration order.
pub(super) fn decode_ops(items: &[Value]) -> HwDescResult<Vec<I2cOp>> {
    items.iter().map(decode_op).collect()
}

/// Decodes a bit-operation node. The register width is derived from the
/// bit-mask literal and must come out as 1, 2 or 4 bytes.
pub(super) fn decode_bit_op(node: &Value) -> HwDescResult<I2cBitOp> {
    let device = node::str_field(node, "device")?;
    let register = node::u8_field(node, "register")?;
    let (bit_mask, register_size) = node::mask_literal(node::req(node, "bitmask")?, "bitmask")?;

    Ok(I2cBitOp {
        device,
        register,
        register_size,
        bit_mask,
        negative_polarity: polarity(node)?,
    })
}

/// Decodes an optional bit-operation field.
pub(super) fn opt_bit_op(node: &Value, key: &str) -> HwDescResult<Option<I2cBitOp>> {
    match node::opt(node, key) {
        Some(v) => decode_bit_op(v).map(Some),
        None => Ok(None),
    }
}

/// Decodes a required bit-operation field.
pub(super) fn req_bit_op(node: &Value, key: &str) -> HwDescResult<I2cBitOp> {
    decode_bit_op(node::req(node, key)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_decode_op_with_register() {
        let op = decode_op(&yaml(
            "{device: mux1, register: '0x74', data: ['0x08']}",
        ))
        .unwrap();
        assert_eq!(op.device, "mux1");
        assert_eq!(op.register, Some(0x74));
        assert_eq!(op.data, vec![0x08]);
        assert_eq!(op.direction, Direction::Write);
        assert!(!op.negative_polarity);
    }

    #[test]
    fn test_decode_op_without_register() {
        let op = decode_op(&yaml("{device: eeprom1, register: NONE, data: ['0x00', '0x10']}"))
            .unwrap();
        assert_eq!(op.register, None);
        assert_eq!(op.byte_count(), 2);
    }

    #[test]
    fn test_decode_op_negative_polarity() {
        let op = decode_op(&yaml(
            "{device: cpld, register: '0x02', data: ['0x01'], polarity: negative}",
        ))
        .unwrap();
        assert!(op.negative_polarity);
    }

    #[test]
    fn test_decode_bit_op_widths() {
        let op = decode_bit_op(&yaml(
            "{device: cpld, register: '0x09', bitmask: '0x0400'}",
        ))
        .unwrap();
        assert_eq!(op.register, 0x09);
        assert_eq!(op.register_size, 2);
        assert_eq!(op.bit_mask, 0x0400);
    }

    #[test]
    fn test_decode_bit_op_rejects_bad_mask() {
        assert!(decode_bit_op(&yaml("{device: cpld, register: '0x09', bitmask: '0x4'}")).is_err());
    }
}
