//! Typed hardware description store for switch platform management.
//!
//! This crate loads a structured description of a switch chassis's
//! hardware (buses, addressable devices, sensors, ports, fans, power
//! supplies, LEDs, FRU identity) into a typed, queryable in-memory store,
//! partitioned by subsystem:
//!
//! - [`types`]: passive descriptor value types
//! - [`HwDesc`]: the store itself — subsystem registration, domain
//!   loaders, read accessors
//! - [`roles`]: logical file-role names used in the subsystem manifest
//! - [`error`]: error types for load and lookup failures
//!
//! # Load phase
//!
//! Each subsystem has a directory containing a mandatory `manifest.yaml`
//! (a free-text info string plus file-role → filename associations) and
//! the domain description files it references. Loading is explicit and
//! per-domain:
//!
//! 1. [`HwDesc::add_subsystem`] registers the subsystem and loads its
//!    manifest
//! 2. [`HwDesc::load_devices`] and friends populate each domain's tables
//!
//! A domain whose role is absent from the manifest is simply skipped; a
//! present-but-invalid file fails that load and leaves the domain's
//! tables in their prior state. The FRU record is mandatory.
//!
//! After the load phase the store is read-only and safe to share across
//! any number of concurrent readers.
//!
//! # Example
//!
//! ```ignore
//! use platform_hwdesc::HwDesc;
//!
//! let mut store = HwDesc::new();
//! store.add_subsystem("base", "/etc/platform/base")?;
//! store.load_devices("base")?;
//! store.load_ports("base")?;
//!
//! let eeprom = store.find_device("base", "port1_eeprom");
//! ```

pub mod error;
mod loader;
mod node;
pub mod roles;
mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{HwDescError, HwDescResult};
pub use store::HwDesc;
pub use types::{
    Bus, Device, Direction, FileRef, I2cBitOp, I2cOp, ModuleSignals, Port, PortInfo, Sensor,
    ThermalInfo,
};
