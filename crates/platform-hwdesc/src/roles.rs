//! Logical file-role names used in the subsystem manifest.
//!
//! The manifest maps each role to the filename of a domain description in
//! the subsystem directory.

/// Fixed filename of the manifest itself.
pub const MANIFEST_FILENAME: &str = "manifest.yaml";

/// Role for the devices file (buses + devices + init list).
pub const DEVICES: &str = "devices";

/// Role for the thermal file (thermal summary + sensors).
pub const THERMAL: &str = "thermal";

/// Role for the ports file (port summary + ports).
pub const PORTS: &str = "ports";

/// Role for the fans file (fan summary + fan FRUs).
pub const FANS: &str = "fans";

/// Role for the power file (PSU summary + PSUs).
pub const POWER: &str = "power";

/// Role for the LEDs file (LED summary + types + LEDs).
pub const LEDS: &str = "leds";

/// Role for the FRU identity file.
pub const FRU: &str = "fru";

/// Connector type strings declared by ports.
pub mod connectors {
    /// SFP+ style connector.
    pub const SFP_PLUS: &str = "SFP_PLUS";

    /// QSFP+ style connector.
    pub const QSFP_PLUS: &str = "QSFP_PLUS";

    /// QSFP28 style connector.
    pub const QSFP28: &str = "QSFP28";
}
