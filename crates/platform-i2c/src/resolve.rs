//! Pre/post dependency chain resolution.
//!
//! A device's `pre` and `post` operation lists name companion devices
//! (typically muxes or enable CPLDs) that must be operated on around the
//! primary access. Those companions can carry chains of their own;
//! chain-following reads only the first entry's target to pick the next
//! hop, since every operation in a given list targets the same device.
//!
//! The walk is iterative with a visited set: a revisited device means the
//! description wires chains circularly, which is reported as
//! [`I2cError::DependencyCycle`] instead of recursing forever.

use std::collections::HashSet;

use platform_hwdesc::{Device, HwDesc, I2cOp};

use crate::error::{I2cError, I2cResult};

fn next_hop<'a>(
    store: &'a HwDesc,
    subsystem: &str,
    name: &str,
) -> I2cResult<&'a Device> {
    store
        .find_device(subsystem, name)
        .ok_or_else(|| I2cError::unknown_device(subsystem, name))
}

/// Resolves the ordered operations that must run before accessing
/// `device`: the outermost dependency's operations come first, the
/// device's own `pre` operations last.
pub(crate) fn pre_chain(
    store: &HwDesc,
    subsystem: &str,
    device: &Device,
) -> I2cResult<Vec<I2cOp>> {
    let mut chain: Vec<&Device> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    let mut current = device;
    while !current.pre.is_empty() {
        if !visited.insert(&current.name) {
            return Err(I2cError::DependencyCycle {
                device: current.name.clone(),
            });
        }
        chain.push(current);
        current = next_hop(store, subsystem, &current.pre[0].device)?;
    }

    Ok(chain
        .iter()
        .rev()
        .flat_map(|dev| dev.pre.iter().cloned())
        .collect())
}

/// Resolves the ordered operations that must run after accessing
/// `device`: the device's own `post` operations come first, unwinding
/// outward to the outermost dependency.
pub(crate) fn post_chain(
    store: &HwDesc,
    subsystem: &str,
    device: &Device,
) -> I2cResult<Vec<I2cOp>> {
    let mut ops: Vec<I2cOp> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    let mut current = device;
    while !current.post.is_empty() {
        if !visited.insert(&current.name) {
            return Err(I2cError::DependencyCycle {
                device: current.name.clone(),
            });
        }
        ops.extend(current.post.iter().cloned());
        current = next_hop(store, subsystem, &current.post[0].device)?;
    }

    Ok(ops)
}
