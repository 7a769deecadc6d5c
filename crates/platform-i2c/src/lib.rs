//! I2C transaction composition and execution for switch platform
//! management.
//!
//! This crate executes register-level bus transactions against the typed
//! hardware model in `platform-hwdesc`:
//!
//! - [`execute`]: composes and runs one logical transaction against a
//!   device
//! - [`init_devices`]: dispatches a subsystem's init sequence
//! - [`transport`]: the bus transport boundary and its Linux
//!   implementation
//! - [`error`]: composition and transport error types
//!
//! # Transaction composition
//!
//! A transaction against device `D` is the ordered list
//! `[pre-chain(D), caller ops.., post-chain(D)]`. The pre-chain is found
//! by recursively resolving the device named in `D`'s first pre
//! operation — outermost dependency first (enable path, then enable mux,
//! then access) — and the post-chain mirrors it, undoing the nearest
//! effect first. Every operation in the composed list must target a
//! device on the same physical bus; anything else fails before hardware
//! is touched.
//!
//! # Execution paths
//!
//! A block-transfer-capable bus executes the whole list as one batched
//! kernel call: all-or-nothing, retried only on signal interruption, no
//! application-level locking. A capability-limited bus is locked with an
//! exclusive advisory lock and walked one register access at a time,
//! best-effort: later operations still run after a failure and the most
//! recent failure is the one reported. Within one transaction operations
//! always execute in composed order.
//!
//! # Example
//!
//! ```ignore
//! use platform_hwdesc::{HwDesc, I2cOp};
//! use platform_i2c::execute;
//!
//! let mut store = HwDesc::new();
//! store.add_subsystem("base", "/etc/platform/base")?;
//! store.load_devices("base")?;
//!
//! let eeprom = store.find_device("base", "port1_eeprom").unwrap();
//! let mut ops = [I2cOp::read("port1_eeprom", Some(0x00), 128)];
//! execute(&store, "base", eeprom, &mut ops)?;
//! // ops[0].data now holds the EEPROM contents.
//! ```

pub mod error;
mod compose;
mod exec;
mod resolve;
pub mod transport;

// Re-export commonly used items at crate root
pub use error::{I2cError, I2cResult};
pub use exec::{execute, execute_status, execute_with, init_devices, init_devices_with};
pub use transport::{BusPort, LinuxI2c, Transport, TransferMsg};
