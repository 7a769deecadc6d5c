//! Transaction composition.
//!
//! Builds the final ordered operation list for one logical transaction:
//! resolved pre-chain, then the caller's primary operations, then the
//! resolved post-chain. Every operation's target device must live on the
//! same physical bus; a mismatch fails the whole transaction before any
//! hardware access. Chains that cross a subsystem boundary (and would
//! legitimately change buses there) are not supported.

use platform_hwdesc::{Device, HwDesc, I2cOp};

use crate::error::{I2cError, I2cResult};
use crate::resolve;

/// A validated transaction plan.
///
/// The final operation order is `pre`, then the caller's operations, then
/// `post`; `addresses` holds the target bus address for each composed
/// operation in that same order.
pub(crate) struct TransactionPlan {
    pub(crate) pre: Vec<I2cOp>,
    pub(crate) post: Vec<I2cOp>,
    /// Name of the single bus every composed operation targets.
    pub(crate) bus: String,
    pub(crate) addresses: Vec<u16>,
}

/// Resolves dependency chains and validates bus homogeneity.
pub(crate) fn compose(
    store: &HwDesc,
    subsystem: &str,
    device: &Device,
    caller_ops: &[I2cOp],
) -> I2cResult<TransactionPlan> {
    if caller_ops.is_empty() {
        return Err(I2cError::EmptyOps);
    }

    let pre = resolve::pre_chain(store, subsystem, device)?;
    let post = resolve::post_chain(store, subsystem, device)?;

    let mut bus: Option<&str> = None;
    let mut addresses = Vec::with_capacity(pre.len() + caller_ops.len() + post.len());
    for op in pre.iter().chain(caller_ops).chain(post.iter()) {
        let target = store
            .find_device(subsystem, &op.device)
            .ok_or_else(|| I2cError::unknown_device(subsystem, &op.device))?;
        match bus {
            None => bus = Some(&target.bus),
            Some(expected) if expected != target.bus => {
                return Err(I2cError::BusMismatch {
                    expected: expected.to_string(),
                    found: target.bus.clone(),
                });
            }
            Some(_) => {}
        }
        addresses.push(target.address);
    }
    let bus = bus.ok_or(I2cError::EmptyOps)?.to_string();

    Ok(TransactionPlan {
        pre,
        post,
        bus,
        addresses,
    })
}
