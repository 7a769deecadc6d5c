//! Transaction execution.
//!
//! Takes a composed, single-bus operation list and runs it against the
//! bus's device node. Block-transfer-capable buses get one batched
//! transaction call, all-or-nothing at the transport level and retried
//! only when a signal interrupts it. Capability-limited buses get an
//! exclusively locked, best-effort sequential loop of single-register
//! accesses: a failed operation does not abort the rest, and the status
//! reported is the error of the most recently failed operation.
//!
//! Read operations fill the caller's buffers in place.

use std::io;

use tracing::{debug, warn};

use platform_hwdesc::{Bus, Device, Direction, HwDesc, I2cOp};

use crate::compose::{self, TransactionPlan};
use crate::error::{I2cError, I2cResult};
use crate::transport::{BusPort, LinuxI2c, Transport, TransferMsg};

/// Executes `ops` against `device` using the real Linux transport.
///
/// The composed transaction is the resolved pre-chain, `ops`, then the
/// resolved post-chain; see the crate docs for the rules this enforces.
pub fn execute(
    store: &HwDesc,
    subsystem: &str,
    device: &Device,
    ops: &mut [I2cOp],
) -> I2cResult<()> {
    execute_with(&LinuxI2c, store, subsystem, device, ops)
}

/// [`execute`] with the `0`-or-errno integer status contract.
pub fn execute_status(
    store: &HwDesc,
    subsystem: &str,
    device: &Device,
    ops: &mut [I2cOp],
) -> i32 {
    match execute(store, subsystem, device, ops) {
        Ok(()) => 0,
        Err(err) => err.raw_os_error(),
    }
}

/// Executes `ops` against `device` over the given transport.
pub fn execute_with(
    transport: &dyn Transport,
    store: &HwDesc,
    subsystem: &str,
    device: &Device,
    ops: &mut [I2cOp],
) -> I2cResult<()> {
    let TransactionPlan {
        mut pre,
        mut post,
        bus,
        addresses,
    } = compose::compose(store, subsystem, device, ops)?;

    let bus = store
        .find_bus(subsystem, &bus)
        .ok_or_else(|| I2cError::unknown_bus(subsystem, &bus))?;

    let mut port = transport.open(bus).map_err(|source| I2cError::Open {
        devname: bus.devname.clone(),
        source,
    })?;

    let mut all: Vec<&mut I2cOp> = pre
        .iter_mut()
        .chain(ops.iter_mut())
        .chain(post.iter_mut())
        .collect();
    debug!(
        subsystem,
        device = %device.name,
        bus = %bus.name,
        ops = all.len(),
        "executing transaction"
    );

    if bus.smbus {
        run_sequential(port.as_mut(), &mut all, &addresses)
    } else {
        run_batched(port.as_mut(), bus, &mut all, &addresses)
    }
}

/// Block-capable path: every composed operation becomes one message of a
/// single batched transfer.
fn run_batched(
    port: &mut dyn BusPort,
    bus: &Bus,
    all: &mut [&mut I2cOp],
    addresses: &[u16],
) -> I2cResult<()> {
    let mut msgs: Vec<TransferMsg<'_>> = all
        .iter_mut()
        .zip(addresses)
        .map(|(op, &addr)| TransferMsg {
            addr,
            read: op.direction == Direction::Read,
            buf: op.data.as_mut_slice(),
        })
        .collect();

    loop {
        match port.transfer(&mut msgs) {
            Ok(()) => return Ok(()),
            // Retried only when a signal interrupted the call.
            Err(e) if e.raw_os_error() == Some(libc::EINTR) => continue,
            Err(source) => {
                return Err(I2cError::Transfer {
                    devname: bus.devname.clone(),
                    source,
                })
            }
        }
    }
}

/// Capability-limited path: lock the node, then process every operation
/// in order regardless of individual failures. The error returned is from
/// the most recently failed operation.
fn run_sequential(
    port: &mut dyn BusPort,
    all: &mut [&mut I2cOp],
    addresses: &[u16],
) -> I2cResult<()> {
    if let Err(e) = port.lock_exclusive() {
        warn!(error = %e, "failed to lock bus node");
    }

    let mut last_err: Option<I2cError> = None;
    for (op, &addr) in all.iter_mut().zip(addresses) {
        if let Err(source) = port.set_target(addr) {
            warn!(device = %op.device, error = %source, "failed to select bus address");
            last_err = Some(I2cError::register_access(&op.device, source));
            continue;
        }

        // Raw transfers carry no register; the register-oriented path
        // addresses register 0 in that case.
        let register = op.register.unwrap_or(0);
        let result = match op.direction {
            Direction::Write => match op.data.len() {
                1 => port.write_byte(register, op.data[0]),
                2 => port.write_word(register, u16::from_ne_bytes([op.data[0], op.data[1]])),
                byte_count => {
                    last_err = Some(I2cError::UnsupportedAccess {
                        device: op.device.clone(),
                        byte_count,
                    });
                    continue;
                }
            },
            Direction::Read => match op.data.len() {
                1 => port.read_byte(register).map(|v| op.data[0] = v),
                2 => port
                    .read_word(register)
                    .map(|v| op.data.copy_from_slice(&v.to_ne_bytes())),
                _ => read_consecutive(port, register, &mut op.data),
            },
        };

        if let Err(source) = result {
            warn!(device = %op.device, error = %source, "register access failed");
            last_err = Some(I2cError::register_access(&op.device, source));
        }
    }

    if let Err(e) = port.unlock() {
        warn!(error = %e, "failed to release bus lock");
    }

    match last_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Arbitrary-length reads on a register-oriented bus are performed as
/// consecutive single-byte register reads starting at `register`.
fn read_consecutive(port: &mut dyn BusPort, register: u8, buf: &mut [u8]) -> io::Result<()> {
    for (offset, slot) in buf.iter_mut().enumerate() {
        *slot = port.read_byte(register.wrapping_add(offset as u8))?;
    }
    Ok(())
}

/// Dispatches a subsystem's init sequence with the real Linux transport.
pub fn init_devices(store: &HwDesc, subsystem: &str) -> I2cResult<usize> {
    init_devices_with(&LinuxI2c, store, subsystem)
}

/// Dispatches each operation of the subsystem's init sequence as its own
/// single-operation transaction, in declaration order.
///
/// A failed operation is logged and does not abort the remaining ones.
/// Returns the number of operations dispatched.
pub fn init_devices_with(
    transport: &dyn Transport,
    store: &HwDesc,
    subsystem: &str,
) -> I2cResult<usize> {
    let init_ops = store
        .init_ops(subsystem)
        .ok_or_else(|| I2cError::unknown_subsystem(subsystem))?;

    let mut dispatched = 0;
    for op in init_ops {
        dispatched += 1;
        let Some(device) = store.find_device(subsystem, &op.device) else {
            warn!(device = %op.device, "init operation targets unknown device");
            continue;
        };
        let mut ops = [op.clone()];
        if let Err(e) = execute_with(transport, store, subsystem, device, &mut ops) {
            warn!(device = %op.device, error = %e, "init operation failed");
        }
    }

    Ok(dispatched)
}
