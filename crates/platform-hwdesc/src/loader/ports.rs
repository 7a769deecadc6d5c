//! Ports domain: port summary and the port table.
//!
//! Module signals are decoded into the variant matching the port's
//! declared connector type. An unknown connector type is not a failure;
//! the port simply carries no module signals.

use serde_yaml::Value;
use tracing::info;

use super::ops;
use crate::error::HwDescResult;
use crate::node;
use crate::roles::{self, connectors};
use crate::store::Subsystem;
use crate::types::{ModuleSignals, Port, PortInfo, Qsfp28Signals, QsfpSignals, SfpSignals};

fn decode_port_info(node: &Value) -> HwDescResult<PortInfo> {
    Ok(PortInfo {
        number_ports: node::u32_field(node, "number_ports")?,
        max_port_speed: node::u32_field(node, "max_port_speed")?,
        max_transmission_unit: node::u32_field(node, "max_transmission_unit")?,
        max_lag_count: node::u32_field(node, "max_lag_count")?,
        max_lag_member_count: node::u32_field(node, "max_lag_member_count")?,
        l3_port_requires_internal_vlan: node::bool_field(node, "L3_port_requires_internal_VLAN")?,
    })
}

fn decode_module_signals(node: &Value, connector: &str) -> HwDescResult<ModuleSignals> {
    match connector {
        connectors::SFP_PLUS => Ok(ModuleSignals::Sfp(SfpSignals {
            tx_disable: ops::opt_bit_op(node, "sfpp_tx_disable")?,
            tx_fault: ops::opt_bit_op(node, "sfpp_tx_fault")?,
            rx_loss: ops::opt_bit_op(node, "sfpp_rx_loss")?,
            mod_present: ops::opt_bit_op(node, "sfpp_mod_present")?,
            interrupt: ops::opt_bit_op(node, "sfpp_interrupt")?,
        })),
        connectors::QSFP_PLUS => Ok(ModuleSignals::Qsfp(QsfpSignals {
            reset: ops::opt_bit_op(node, "qsfpp_reset")?,
            mod_present: ops::opt_bit_op(node, "qsfpp_mod_present")?,
            int_status: ops::opt_bit_op(node, "qsfpp_int")?,
            lp_mode: ops::opt_bit_op(node, "qsfpp_lp_mode")?,
            interrupt: ops::opt_bit_op(node, "qsfpp_interrupt")?,
        })),
        connectors::QSFP28 => Ok(ModuleSignals::Qsfp28(Qsfp28Signals {
            reset: ops::opt_bit_op(node, "qsfp28p_reset")?,
            mod_present: ops::opt_bit_op(node, "qsfp28p_mod_present")?,
            interrupt: ops::opt_bit_op(node, "qsfp28p_interrupt")?,
            interrupt_mask: ops::opt_bit_op(node, "qsfp28p_interrupt_mask")?,
        })),
        _ => Ok(ModuleSignals::Unknown),
    }
}

fn decode_port(node: &Value) -> HwDescResult<Port> {
    let pluggable = node::bool_field(node, "pluggable")?;
    let connector = node::str_field(node, "connector")?;

    let (module_eeprom, module_signals) = if pluggable {
        let eeprom = node::str_field(node, "module_eeprom")?;
        let signals = match connector.as_str() {
            connectors::SFP_PLUS | connectors::QSFP_PLUS | connectors::QSFP28 => {
                decode_module_signals(node::req(node, "module_signals")?, &connector)?
            }
            _ => ModuleSignals::Unknown,
        };
        (Some(eeprom), signals)
    } else {
        (None, ModuleSignals::Unknown)
    };

    Ok(Port {
        name: node::str_field(node, "name")?,
        pluggable,
        connector,
        max_speed: node::u32_field(node, "max_speed")?,
        speeds: node::u32_list(node, "speeds")?,
        device: node::u32_field(node, "switch_device")?,
        device_port: node::u32_field(node, "switch_device_port")?,
        subports: node::str_list(node, "subports")?,
        capabilities: node::str_list(node, "capabilities")?,
        supported_modules: node::str_list(node, "supported_modules")?,
        module_eeprom,
        parent_port: node::opt_str_field(node, "parent_port")?,
        module_signals,
        subport_number: node::opt_u32_field(node, "subport_number", 0)?,
    })
}

pub(crate) fn load(sub: &mut Subsystem) -> HwDescResult<()> {
    let Some(doc) = super::domain_document(sub, roles::PORTS)? else {
        return Ok(());
    };

    let port_info = decode_port_info(node::req(&doc, "port_info")?)?;
    let ports = node::seq_field(&doc, "ports")?
        .iter()
        .map(decode_port)
        .collect::<HwDescResult<Vec<_>>>()?;

    info!(ports = ports.len(), "loaded ports domain");
    sub.port_info = port_info;
    sub.ports = ports;
    Ok(())
}
