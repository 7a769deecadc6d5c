//! Domain loaders.
//!
//! Each loader maps one description file from the generic tree into the
//! typed tables of a [`Subsystem`](crate::store::Subsystem). Loaders stage
//! a full decode first and only then commit to the subsystem, so a failure
//! leaves the domain's tables exactly as they were.
//!
//! A domain whose file role is absent from the manifest is optional: the
//! load succeeds and the tables stay empty. The manifest itself and the
//! FRU record are mandatory.

mod devices;
mod fans;
mod fru;
mod leds;
mod ops;
mod ports;
mod power;
mod thermal;

pub(crate) use devices::load as load_devices;
pub(crate) use fans::load as load_fans;
pub(crate) use fru::load as load_fru;
pub(crate) use leds::load as load_leds;
pub(crate) use ports::load as load_ports;
pub(crate) use power::load as load_psus;
pub(crate) use thermal::load as load_thermal;

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{HwDescError, HwDescResult};
use crate::node;
use crate::roles;
use crate::store::Subsystem;
use crate::types::FileRef;

/// Reads and parses one description file into the generic tree.
fn read_document(path: &Path) -> HwDescResult<Value> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| HwDescError::FileRead {
        path: display.clone(),
        source,
    })?;
    serde_yaml::from_reader(file).map_err(|e| HwDescError::Malformed {
        path: display,
        message: e.to_string(),
    })
}

/// Resolves a domain's file role through the manifest and parses it.
///
/// `Ok(None)` means the role is not declared for this subsystem, which is
/// not an error.
fn domain_document(sub: &Subsystem, role: &str) -> HwDescResult<Option<Value>> {
    let Some(file) = sub.files.get(role) else {
        debug!(role, "file role not declared, skipping domain");
        return Ok(None);
    };
    read_document(&sub.dir.join(&file.filename)).map(Some)
}

/// Loads the base description (manifest) for a subsystem: the free-text
/// info string and the file-role associations.
pub(crate) fn load_manifest(sub: &mut Subsystem) -> HwDescResult<()> {
    let doc = read_document(&sub.dir.join(roles::MANIFEST_FILENAME))?;

    let info = node::str_field(&doc, "subsystem_info")?;
    let mut files = HashMap::new();
    for item in node::seq_field(&doc, "files")? {
        let file = FileRef {
            name: node::str_field(item, "name")?,
            filename: node::str_field(item, "filename")?,
        };
        files.insert(file.name.clone(), file);
    }

    debug!(files = files.len(), "loaded manifest");
    sub.info = info;
    sub.files = files;
    Ok(())
}
