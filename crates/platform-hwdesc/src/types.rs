//! Typed descriptors for the switch hardware model.
//!
//! These are passive value types populated once by the domain loaders and
//! immutable afterwards. They carry no behavior beyond small convenience
//! accessors; interpretation of sensor values, fan policy and LED policy
//! lives in the callers.

/// Direction of a byte-level bus operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Read from the device into the operation's buffer.
    Read,
    /// Write the operation's buffer to the device.
    Write,
}

/// A byte-level bus operation against a named device.
///
/// For writes, `data` holds the bytes to send; for reads it is the
/// destination buffer and its length is the number of bytes to read.
/// `register` is `None` for raw block transfers that do not address a
/// register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cOp {
    /// Transfer direction.
    pub direction: Direction,
    /// Name of the device this operation targets.
    pub device: String,
    /// Register address, or `None` for a raw transfer.
    pub register: Option<u8>,
    /// Write payload or read destination; length is the byte count.
    pub data: Vec<u8>,
    /// Boolean sense is inverted for consumers interpreting this value.
    pub negative_polarity: bool,
}

impl I2cOp {
    /// Creates a write operation.
    pub fn write(device: impl Into<String>, register: Option<u8>, data: Vec<u8>) -> Self {
        Self {
            direction: Direction::Write,
            device: device.into(),
            register,
            data,
            negative_polarity: false,
        }
    }

    /// Creates a read operation with a zeroed destination buffer.
    pub fn read(device: impl Into<String>, register: Option<u8>, byte_count: usize) -> Self {
        Self {
            direction: Direction::Read,
            device: device.into(),
            register,
            data: vec![0; byte_count],
            negative_polarity: false,
        }
    }

    /// Number of bytes transferred by this operation.
    pub fn byte_count(&self) -> usize {
        self.data.len()
    }
}

/// A bit-level register operation attaching hardware semantics to a single
/// register (module presence, fan fault, LED state and the like).
///
/// `register_size` is 1, 2 or 4 bytes, derived at load time from the length
/// of the hexadecimal bit-mask literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cBitOp {
    /// Name of the device this operation targets.
    pub device: String,
    /// Register address.
    pub register: u8,
    /// Register width in bytes: 1, 2 or 4.
    pub register_size: u8,
    /// Bit mask selecting the signal within the register.
    pub bit_mask: u32,
    /// Boolean sense is inverted for consumers interpreting this signal.
    pub negative_polarity: bool,
}

/// A physical bus within a subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    /// Name identifier for the bus.
    pub name: String,
    /// Device node used to access the bus, e.g. `/dev/i2c-0`.
    pub devname: String,
    /// True for a capability-limited register-oriented bus that needs
    /// per-register access and explicit mutual exclusion; false for a
    /// block-transfer-capable bus.
    pub smbus: bool,
}

/// An addressable device on a bus.
///
/// `pre` and `post` are ordered companion operations that must run around
/// any access to this device. Each entry names its own target device, which
/// is typically a different device (e.g. a mux) whose own chains are then
/// resolved in turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Name identifier, unique within the subsystem.
    pub name: String,
    /// Name of the bus this device is on.
    pub bus: String,
    /// Device type tag, e.g. "eeprom".
    pub dev_type: String,
    /// Numeric address on the bus.
    pub address: u16,
    /// Operations to run before accessing this device.
    pub pre: Vec<I2cOp>,
    /// Operations to run after accessing this device.
    pub post: Vec<I2cOp>,
}

/// Logical file-role to filename association from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Logical role name, e.g. "devices".
    pub name: String,
    /// Filename relative to the subsystem directory.
    pub filename: String,
}

/// Temperature thresholds driving alarm levels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlarmThresholds {
    pub emergency_on: f32,
    pub emergency_off: f32,
    pub critical_on: f32,
    pub critical_off: f32,
    pub max_on: f32,
    pub max_off: f32,
    pub min: f32,
    pub low_crit: f32,
}

/// Temperature thresholds driving fan speed selection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FanThresholds {
    pub max_on: f32,
    pub max_off: f32,
    pub fast_on: f32,
    pub fast_off: f32,
    pub medium_on: f32,
    pub medium_off: f32,
}

/// A temperature sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    /// Sensor identifier number.
    pub number: u32,
    /// Location description.
    pub location: String,
    /// Device name used to read the sensor.
    pub device: String,
    /// Sensor type string.
    pub sensor_type: String,
    pub alarm_thresholds: AlarmThresholds,
    pub fan_thresholds: FanThresholds,
}

/// Thermal summary for a subsystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThermalInfo {
    /// Polling period in milliseconds.
    pub polling_period: u32,
    /// True if the platform auto-shuts-down at the emergency level.
    pub auto_shutdown: bool,
}

/// Port summary for a subsystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortInfo {
    pub number_ports: u32,
    /// Max port speed in Mb/s.
    pub max_port_speed: u32,
    pub max_transmission_unit: u32,
    pub max_lag_count: u32,
    pub max_lag_member_count: u32,
    pub l3_port_requires_internal_vlan: bool,
}

/// Module signals for SFP+ style connectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfpSignals {
    pub tx_disable: Option<I2cBitOp>,
    pub tx_fault: Option<I2cBitOp>,
    pub rx_loss: Option<I2cBitOp>,
    pub mod_present: Option<I2cBitOp>,
    pub interrupt: Option<I2cBitOp>,
}

/// Module signals for QSFP+ style connectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QsfpSignals {
    pub reset: Option<I2cBitOp>,
    pub mod_present: Option<I2cBitOp>,
    /// Interrupt status: 0 generates an interrupt when present, 1 does not.
    pub int_status: Option<I2cBitOp>,
    /// Low power mode: 0 high power, 1 low power.
    pub lp_mode: Option<I2cBitOp>,
    pub interrupt: Option<I2cBitOp>,
}

/// Module signals for QSFP28 style connectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qsfp28Signals {
    pub reset: Option<I2cBitOp>,
    pub mod_present: Option<I2cBitOp>,
    pub interrupt: Option<I2cBitOp>,
    pub interrupt_mask: Option<I2cBitOp>,
}

/// Module signals variant selected by the port's declared connector type.
///
/// Unknown connector types carry no signals; they are not a load failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModuleSignals {
    Sfp(SfpSignals),
    Qsfp(QsfpSignals),
    Qsfp28(Qsfp28Signals),
    #[default]
    Unknown,
}

/// A front-panel port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Name identifier for the port.
    pub name: String,
    /// True if the port supports pluggable modules.
    pub pluggable: bool,
    /// Connector type string, e.g. "SFP_PLUS".
    pub connector: String,
    /// Max speed in Mb/s.
    pub max_speed: u32,
    /// Supported speeds in Mb/s.
    pub speeds: Vec<u32>,
    /// Identifier of the switch ASIC this port is connected to.
    pub device: u32,
    /// Port identifier on that switch ASIC.
    pub device_port: u32,
    /// Subport names if the port is splittable.
    pub subports: Vec<String>,
    /// Port capability strings.
    pub capabilities: Vec<String>,
    /// Supported module type strings.
    pub supported_modules: Vec<String>,
    /// Device name for the module EEPROM; pluggable ports only.
    pub module_eeprom: Option<String>,
    /// Parent port name if this port is a subport.
    pub parent_port: Option<String>,
    /// Signals for the plugged module, keyed by connector type.
    pub module_signals: ModuleSignals,
    /// Sub identifier of a subport.
    pub subport_number: u32,
}

/// Whether fan commands apply to the whole FRU or to individual fans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FanControlType {
    #[default]
    Single,
    PerFan,
}

/// Settable fan speed levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FanSpeed {
    Slow,
    #[default]
    Normal,
    Medium,
    Fast,
    Max,
}

/// Fan airflow direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FanDirection {
    #[default]
    FrontToBack,
    BackToFront,
    Fixed,
    Settable,
}

/// Register values for each settable fan speed level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedSettings {
    pub slow: u8,
    pub normal: u8,
    pub medium: u8,
    pub fast: u8,
    pub max: u8,
}

/// Register values for each airflow direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionValues {
    pub f2b: u8,
    pub b2f: u8,
}

/// Register values for the fan LED states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanLedValues {
    pub off: u8,
    pub good: u8,
    pub fault: u8,
}

/// Fan summary and control description for a subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanInfo {
    /// Number of fan FRUs (not individual fans).
    pub number_fan_frus: u32,
    pub control_type: FanControlType,
    /// Operation to set the fan speed.
    pub speed_control: Option<I2cBitOp>,
    /// Minimum allowed fan speed.
    pub speed_min: FanSpeed,
    pub speed_settings: SpeedSettings,
    /// Airflow direction for the subsystem.
    pub direction: FanDirection,
    /// Operation to set the airflow direction, when settable.
    pub direction_control: Option<I2cBitOp>,
    /// Values read back from direction detection.
    pub direction_values: DirectionValues,
    /// Values written for direction control.
    pub direction_control_values: DirectionValues,
    /// Multiplier converting speed register units to RPM.
    pub speed_multiplier: u32,
    pub led_values: FanLedValues,
}

/// A single fan within a fan FRU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fan {
    /// Name identifier for the fan.
    pub name: String,
    /// Operation reading the fan fault signal.
    pub fault: I2cBitOp,
    /// Operation reading the fan speed.
    pub speed: I2cBitOp,
}

/// A fan field-replaceable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanFru {
    /// FRU identifier number.
    pub number: u32,
    /// Fans in this FRU.
    pub fans: Vec<Fan>,
    /// Operation accessing the FRU's LEDs.
    pub leds: I2cBitOp,
    /// Operation detecting the FRU's airflow direction.
    pub direction_detect: I2cBitOp,
}

/// Power summary for a subsystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PsuInfo {
    pub number_psus: u32,
    /// Polling period in milliseconds.
    pub polling_period: u32,
}

/// A power supply unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Psu {
    /// PSU identifier number.
    pub number: u32,
    pub present: Option<I2cBitOp>,
    pub input_ok: Option<I2cBitOp>,
    pub output_ok: Option<I2cBitOp>,
}

/// LED summary for a subsystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedInfo {
    pub number_leds: u32,
    pub number_types: u32,
}

/// Semantic value of an LED type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LedTypeValue {
    /// "loc" locator LED.
    Loc,
    #[default]
    Unknown,
}

/// Register values for each LED state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedTypeSettings {
    pub off: u8,
    pub on: u8,
    pub flashing: u8,
}

/// An LED type shared by one or more LEDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedType {
    /// Name identifier for the type.
    pub led_type: String,
    /// Decoded semantic value for the type.
    pub value: LedTypeValue,
    pub settings: LedTypeSettings,
}

/// A front-panel LED.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Led {
    /// Name identifier for the LED.
    pub name: String,
    /// Name of this LED's type.
    pub led_type: String,
    /// Operation accessing the LED state register.
    pub access: I2cBitOp,
}

/// FRU identity record for a subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FruInfo {
    pub country_code: String,
    pub device_version: u8,
    pub diag_version: String,
    pub label_revision: String,
    pub base_mac_address: String,
    pub manufacture_date: String,
    pub manufacturer: String,
    pub num_macs: u32,
    pub onie_version: String,
    pub part_number: String,
    pub platform_name: String,
    pub product_name: String,
    pub serial_number: String,
    pub service_tag: String,
    pub vendor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_op_zeroes_buffer() {
        let op = I2cOp::read("eeprom1", Some(0x10), 4);
        assert_eq!(op.direction, Direction::Read);
        assert_eq!(op.byte_count(), 4);
        assert_eq!(op.data, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_write_op_byte_count() {
        let op = I2cOp::write("cpld", Some(0x02), vec![0xAA, 0x55]);
        assert_eq!(op.direction, Direction::Write);
        assert_eq!(op.byte_count(), 2);
    }

    #[test]
    fn test_module_signals_default_is_unknown() {
        assert_eq!(ModuleSignals::default(), ModuleSignals::Unknown);
    }
}
