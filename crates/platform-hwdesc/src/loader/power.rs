//! Power domain: PSU summary and the PSU table.

use serde_yaml::Value;
use tracing::info;

use super::ops;
use crate::error::HwDescResult;
use crate::node;
use crate::roles;
use crate::store::Subsystem;
use crate::types::{Psu, PsuInfo};

fn decode_psu(node: &Value) -> HwDescResult<Psu> {
    Ok(Psu {
        number: node::u32_field(node, "number")?,
        present: ops::opt_bit_op(node, "psu_present")?,
        input_ok: ops::opt_bit_op(node, "psu_input_ok")?,
        output_ok: ops::opt_bit_op(node, "psu_output_ok")?,
    })
}

pub(crate) fn load(sub: &mut Subsystem) -> HwDescResult<()> {
    let Some(doc) = super::domain_document(sub, roles::POWER)? else {
        return Ok(());
    };

    let info_node = node::req(&doc, "power_info")?;
    let psu_info = PsuInfo {
        number_psus: node::u32_field(info_node, "number_psus")?,
        polling_period: node::u32_field(info_node, "polling_period")?,
    };

    let psus = node::seq_field(&doc, "psus")?
        .iter()
        .map(decode_psu)
        .collect::<HwDescResult<Vec<_>>>()?;

    info!(psus = psus.len(), "loaded power domain");
    sub.psu_info = psu_info;
    sub.psus = psus;
    Ok(())
}
