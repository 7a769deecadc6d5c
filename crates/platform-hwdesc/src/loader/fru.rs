//! FRU domain: the chassis identity record.
//!
//! The FRU file is mandatory: a manifest that does not declare it fails
//! the load, unlike the optional domains.

use tracing::info;

use crate::error::{HwDescError, HwDescResult};
use crate::node;
use crate::roles;
use crate::store::Subsystem;
use crate::types::FruInfo;

pub(crate) fn load(sub: &mut Subsystem) -> HwDescResult<()> {
    let Some(doc) = super::domain_document(sub, roles::FRU)? else {
        return Err(HwDescError::missing_file(roles::FRU));
    };

    let fru_node = node::req(&doc, "fru_info")?;
    let fru = FruInfo {
        country_code: node::str_field(fru_node, "country_code")?,
        device_version: node::u8_field(fru_node, "device_version")?,
        diag_version: node::str_field(fru_node, "diag_version")?,
        label_revision: node::str_field(fru_node, "label_revision")?,
        base_mac_address: node::str_field(fru_node, "mac_base")?,
        manufacture_date: node::str_field(fru_node, "manufacture_date")?,
        manufacturer: node::str_field(fru_node, "manufacturer")?,
        num_macs: node::u32_field(fru_node, "num_mac")?,
        onie_version: node::str_field(fru_node, "onie_version")?,
        part_number: node::str_field(fru_node, "part_number")?,
        platform_name: node::str_field(fru_node, "platform_name")?,
        product_name: node::str_field(fru_node, "product_name")?,
        serial_number: node::str_field(fru_node, "serial_number")?,
        service_tag: node::str_field(fru_node, "service_tag")?,
        vendor: node::str_field(fru_node, "vendor")?,
    };

    info!(product = %fru.product_name, "loaded fru record");
    sub.fru = Some(fru);
    Ok(())
}
