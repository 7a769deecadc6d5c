//! Error types for hardware description loading and lookup.
//!
//! All errors implement `std::error::Error` via `thiserror`. Load failures
//! never abort the process: a failed domain load leaves that domain's table
//! in its prior (default) state and the caller decides how to proceed.

use std::io;
use thiserror::Error;

/// Result type alias for hardware description operations.
pub type HwDescResult<T> = Result<T, HwDescError>;

/// Errors that can occur while loading or querying a hardware description.
#[derive(Debug, Error)]
pub enum HwDescError {
    /// The named subsystem has not been added to this store.
    #[error("Subsystem '{subsystem}' not found")]
    UnknownSubsystem {
        /// The subsystem name.
        subsystem: String,
    },

    /// A subsystem with this name already exists in the store.
    #[error("Subsystem '{subsystem}' already exists")]
    DuplicateSubsystem {
        /// The subsystem name.
        subsystem: String,
    },

    /// A device with this name already exists in the subsystem.
    #[error("Device '{device}' already exists in subsystem '{subsystem}'")]
    DuplicateDevice {
        /// The subsystem name.
        subsystem: String,
        /// The device name.
        device: String,
    },

    /// A description file could not be opened or read.
    #[error("Failed to read description file '{path}': {source}")]
    FileRead {
        /// Path of the file that failed.
        path: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A description file is not well-formed YAML.
    #[error("Malformed description file '{path}': {message}")]
    Malformed {
        /// Path of the file that failed.
        path: String,
        /// Parser error message.
        message: String,
    },

    /// A description node does not match the expected schema.
    #[error("Invalid value for '{field}': {message}")]
    Decode {
        /// The field that failed to decode.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// A mandatory file role is missing from the subsystem manifest.
    #[error("Required file role '{role}' missing from manifest")]
    MissingFile {
        /// The logical file-role name.
        role: String,
    },
}

impl HwDescError {
    /// Creates an unknown subsystem error.
    pub fn unknown_subsystem(subsystem: impl Into<String>) -> Self {
        Self::UnknownSubsystem {
            subsystem: subsystem.into(),
        }
    }

    /// Creates a duplicate subsystem error.
    pub fn duplicate_subsystem(subsystem: impl Into<String>) -> Self {
        Self::DuplicateSubsystem {
            subsystem: subsystem.into(),
        }
    }

    /// Creates a decode error for a schema-invalid node.
    pub fn decode(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a missing file-role error.
    pub fn missing_file(role: impl Into<String>) -> Self {
        Self::MissingFile { role: role.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HwDescError::unknown_subsystem("base");
        assert_eq!(err.to_string(), "Subsystem 'base' not found");
    }

    #[test]
    fn test_decode_error() {
        let err = HwDescError::decode("bitmask", "not a hex literal");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'bitmask': not a hex literal"
        );
    }

    #[test]
    fn test_duplicate_device() {
        let err = HwDescError::DuplicateDevice {
            subsystem: "base".to_string(),
            device: "mux1".to_string(),
        };
        assert!(err.to_string().contains("mux1"));
        assert!(err.to_string().contains("base"));
    }
}
