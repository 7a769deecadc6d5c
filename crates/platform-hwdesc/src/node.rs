//! Accessors over the generic description tree.
//!
//! The textual parser hands the loaders a tree of named nodes, sequences
//! and scalars (`serde_yaml::Value`). These helpers perform the mechanical
//! extraction into typed values, reporting schema mismatches as
//! [`HwDescError::Decode`] so callers treat them exactly like malformed
//! input.
//!
//! Numeric scalars follow the description convention of `strtoul` with
//! base 0: a `0x` prefix selects hex, a leading `0` selects octal,
//! anything else is decimal.

use serde_yaml::Value;

use crate::error::{HwDescError, HwDescResult};

/// Looks up a required key in a mapping node.
pub(crate) fn req<'a>(node: &'a Value, key: &str) -> HwDescResult<&'a Value> {
    node.get(key)
        .ok_or_else(|| HwDescError::decode(key, "required key is missing"))
}

/// Looks up an optional key in a mapping node.
pub(crate) fn opt<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key)
}

fn scalar_str(value: &Value, field: &str) -> HwDescResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(HwDescError::decode(field, "expected a scalar")),
    }
}

fn scalar_u64(value: &Value, field: &str) -> HwDescResult<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| HwDescError::decode(field, "expected an unsigned integer")),
        Value::String(s) => parse_u64_base0(s)
            .ok_or_else(|| HwDescError::decode(field, format!("'{s}' is not an integer"))),
        _ => Err(HwDescError::decode(field, "expected an integer scalar")),
    }
}

/// Parses an integer literal with `strtoul` base-0 semantics.
pub(crate) fn parse_u64_base0(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else if s.len() > 1 && s.starts_with('0') {
        u64::from_str_radix(&s[1..], 8).ok()
    } else {
        s.parse().ok()
    }
}

/// Extracts a required string field.
pub(crate) fn str_field(node: &Value, key: &str) -> HwDescResult<String> {
    scalar_str(req(node, key)?, key)
}

/// Extracts an optional string field.
pub(crate) fn opt_str_field(node: &Value, key: &str) -> HwDescResult<Option<String>> {
    match opt(node, key) {
        Some(v) => Ok(Some(scalar_str(v, key)?)),
        None => Ok(None),
    }
}

/// Extracts a required u32 field.
pub(crate) fn u32_field(node: &Value, key: &str) -> HwDescResult<u32> {
    let v = scalar_u64(req(node, key)?, key)?;
    u32::try_from(v).map_err(|_| HwDescError::decode(key, format!("{v} out of range for u32")))
}

/// Extracts an optional u32 field, defaulting when absent.
pub(crate) fn opt_u32_field(node: &Value, key: &str, default: u32) -> HwDescResult<u32> {
    match opt(node, key) {
        Some(v) => {
            let v = scalar_u64(v, key)?;
            u32::try_from(v)
                .map_err(|_| HwDescError::decode(key, format!("{v} out of range for u32")))
        }
        None => Ok(default),
    }
}

/// Extracts a required u16 field.
pub(crate) fn u16_field(node: &Value, key: &str) -> HwDescResult<u16> {
    let v = scalar_u64(req(node, key)?, key)?;
    u16::try_from(v).map_err(|_| HwDescError::decode(key, format!("{v} out of range for u16")))
}

/// Extracts a required u8 field.
pub(crate) fn u8_field(node: &Value, key: &str) -> HwDescResult<u8> {
    u8_value(req(node, key)?, key)
}

/// Extracts a u8 from a scalar node.
pub(crate) fn u8_value(value: &Value, field: &str) -> HwDescResult<u8> {
    let v = scalar_u64(value, field)?;
    u8::try_from(v).map_err(|_| HwDescError::decode(field, format!("{v} out of range for u8")))
}

/// Extracts a required f32 field.
pub(crate) fn f32_field(node: &Value, key: &str) -> HwDescResult<f32> {
    match req(node, key)? {
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0) as f32),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| HwDescError::decode(key, format!("'{s}' is not a number"))),
        _ => Err(HwDescError::decode(key, "expected a numeric scalar")),
    }
}

/// Extracts a required bool field.
pub(crate) fn bool_field(node: &Value, key: &str) -> HwDescResult<bool> {
    match req(node, key)? {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => Ok(true),
            "false" | "no" | "off" => Ok(false),
            _ => Err(HwDescError::decode(key, format!("'{s}' is not a boolean"))),
        },
        _ => Err(HwDescError::decode(key, "expected a boolean scalar")),
    }
}

/// Extracts a required sequence field.
pub(crate) fn seq_field<'a>(node: &'a Value, key: &str) -> HwDescResult<&'a Vec<Value>> {
    match req(node, key)? {
        Value::Sequence(items) => Ok(items),
        _ => Err(HwDescError::decode(key, "expected a sequence")),
    }
}

/// Extracts a required sequence of strings.
pub(crate) fn str_list(node: &Value, key: &str) -> HwDescResult<Vec<String>> {
    seq_field(node, key)?
        .iter()
        .map(|v| scalar_str(v, key))
        .collect()
}

/// Extracts a required sequence of u32 values.
pub(crate) fn u32_list(node: &Value, key: &str) -> HwDescResult<Vec<u32>> {
    seq_field(node, key)?
        .iter()
        .map(|v| {
            let v = scalar_u64(v, key)?;
            u32::try_from(v)
                .map_err(|_| HwDescError::decode(key, format!("{v} out of range for u32")))
        })
        .collect()
}

/// Extracts a required sequence of byte literals.
pub(crate) fn byte_list(node: &Value, key: &str) -> HwDescResult<Vec<u8>> {
    seq_field(node, key)?
        .iter()
        .map(|v| u8_value(v, key))
        .collect()
}

/// Decodes a hexadecimal bit-mask literal into the mask value and the
/// register width it implies: `0xNN` is 1 byte, `0xNNNN` is 2, `0xNNNNNNNN`
/// is 4. The literal must be a quoted string in the description; any other
/// digit count fails the load.
pub(crate) fn mask_literal(value: &Value, field: &str) -> HwDescResult<(u32, u8)> {
    let Value::String(s) = value else {
        return Err(HwDescError::decode(
            field,
            "bit mask must be a quoted hex literal",
        ));
    };
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| HwDescError::decode(field, format!("'{s}' has no 0x prefix")))?;
    let width = match digits.len() {
        2 => 1,
        4 => 2,
        8 => 4,
        n => {
            return Err(HwDescError::decode(
                field,
                format!("{n} hex digits do not map to a 1/2/4-byte register"),
            ))
        }
    };
    let mask = u32::from_str_radix(digits, 16)
        .map_err(|_| HwDescError::decode(field, format!("'{s}' is not a hex literal")))?;
    Ok((mask, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_parse_base0() {
        assert_eq!(parse_u64_base0("0x10"), Some(16));
        assert_eq!(parse_u64_base0("010"), Some(8));
        assert_eq!(parse_u64_base0("10"), Some(10));
        assert_eq!(parse_u64_base0("junk"), None);
    }

    #[test]
    fn test_str_field_accepts_numeric_scalar() {
        let node = yaml("version: 3");
        assert_eq!(str_field(&node, "version").unwrap(), "3");
    }

    #[test]
    fn test_missing_required_key() {
        let node = yaml("name: a");
        assert!(matches!(
            u32_field(&node, "address"),
            Err(HwDescError::Decode { .. })
        ));
    }

    #[test]
    fn test_mask_literal_widths() {
        assert_eq!(mask_literal(&yaml("'0x04'"), "m").unwrap(), (0x04, 1));
        assert_eq!(mask_literal(&yaml("'0x0800'"), "m").unwrap(), (0x0800, 2));
        assert_eq!(
            mask_literal(&yaml("'0x00010000'"), "m").unwrap(),
            (0x0001_0000, 4)
        );
    }

    #[test]
    fn test_mask_literal_rejects_odd_widths() {
        assert!(mask_literal(&yaml("'0x123'"), "m").is_err());
        assert!(mask_literal(&yaml("'0xAABBCC'"), "m").is_err());
        assert!(mask_literal(&yaml("4"), "m").is_err());
    }

    #[test]
    fn test_byte_list() {
        let node = yaml("data: ['0x01', '0xFF', 3]");
        assert_eq!(byte_list(&node, "data").unwrap(), vec![1, 0xFF, 3]);
    }
}
