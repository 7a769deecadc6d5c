//! Error types for transaction composition and execution.
//!
//! Composition errors are reported before any hardware access happens.
//! Transport errors wrap the underlying OS error; [`I2cError::raw_os_error`]
//! recovers the errno-style code for callers keeping the integer status
//! contract.

use std::io;
use thiserror::Error;

/// Result type alias for transaction operations.
pub type I2cResult<T> = Result<T, I2cError>;

/// Errors that can occur while composing or executing a transaction.
#[derive(Debug, Error)]
pub enum I2cError {
    /// The named subsystem has not been loaded.
    #[error("Subsystem '{subsystem}' not found")]
    UnknownSubsystem {
        /// The subsystem name.
        subsystem: String,
    },

    /// An operation targets a device that is not in the description.
    #[error("Device '{device}' not found in subsystem '{subsystem}'")]
    UnknownDevice {
        /// The subsystem name.
        subsystem: String,
        /// The device name that failed to resolve.
        device: String,
    },

    /// A device references a bus that is not in the description.
    #[error("Bus '{bus}' not found in subsystem '{subsystem}'")]
    UnknownBus {
        /// The subsystem name.
        subsystem: String,
        /// The bus name that failed to resolve.
        bus: String,
    },

    /// The caller supplied no primary operations.
    #[error("Transaction has no operations")]
    EmptyOps,

    /// The composed operation list spans more than one physical bus.
    #[error("Composed operations span buses '{expected}' and '{found}'")]
    BusMismatch {
        /// Bus of the first composed operation.
        expected: String,
        /// The differing bus that was encountered.
        found: String,
    },

    /// Pre/post chain following revisited a device.
    #[error("Dependency cycle through device '{device}'")]
    DependencyCycle {
        /// The device at which the cycle was detected.
        device: String,
    },

    /// The bus device node could not be opened.
    #[error("Failed to open bus device '{devname}': {source}")]
    Open {
        /// Device node path.
        devname: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The batched block transfer failed; the whole batch is aborted.
    #[error("Batched transfer failed on '{devname}': {source}")]
    Transfer {
        /// Device node path.
        devname: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A single register access failed on the capability-limited path.
    #[error("Register access failed on device '{device}': {source}")]
    RegisterAccess {
        /// The device name.
        device: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A write size the register-oriented path cannot express.
    #[error("Unsupported {byte_count}-byte write to device '{device}'")]
    UnsupportedAccess {
        /// The device name.
        device: String,
        /// The requested write size.
        byte_count: usize,
    },
}

impl I2cError {
    /// Creates an unknown subsystem error.
    pub fn unknown_subsystem(subsystem: impl Into<String>) -> Self {
        Self::UnknownSubsystem {
            subsystem: subsystem.into(),
        }
    }

    /// Creates an unknown device error.
    pub fn unknown_device(subsystem: impl Into<String>, device: impl Into<String>) -> Self {
        Self::UnknownDevice {
            subsystem: subsystem.into(),
            device: device.into(),
        }
    }

    /// Creates an unknown bus error.
    pub fn unknown_bus(subsystem: impl Into<String>, bus: impl Into<String>) -> Self {
        Self::UnknownBus {
            subsystem: subsystem.into(),
            bus: bus.into(),
        }
    }

    /// Creates a register access error.
    pub fn register_access(device: impl Into<String>, source: io::Error) -> Self {
        Self::RegisterAccess {
            device: device.into(),
            source,
        }
    }

    /// The errno-style code for this error.
    ///
    /// Transport errors surface the underlying OS code; composition and
    /// lookup failures map to `EINVAL` and a detected dependency cycle to
    /// `ELOOP`.
    pub fn raw_os_error(&self) -> i32 {
        match self {
            Self::Open { source, .. }
            | Self::Transfer { source, .. }
            | Self::RegisterAccess { source, .. } => {
                source.raw_os_error().unwrap_or(libc::EIO)
            }
            Self::DependencyCycle { .. } => libc::ELOOP,
            _ => libc::EINVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = I2cError::unknown_device("base", "mux9");
        assert_eq!(err.to_string(), "Device 'mux9' not found in subsystem 'base'");
    }

    #[test]
    fn test_raw_os_error_passthrough() {
        let err = I2cError::register_access("cpld", io::Error::from_raw_os_error(libc::ENXIO));
        assert_eq!(err.raw_os_error(), libc::ENXIO);
    }

    #[test]
    fn test_raw_os_error_composition() {
        assert_eq!(I2cError::EmptyOps.raw_os_error(), libc::EINVAL);
        let cycle = I2cError::DependencyCycle {
            device: "mux1".to_string(),
        };
        assert_eq!(cycle.raw_os_error(), libc::ELOOP);
    }
}
