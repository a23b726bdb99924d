//!
//! Output consolidation: merges outputs of the same asset paying the same
//! owner terms.
//!

use crate::imports::*;

/// Two outputs can be merged when they carry the same asset and are either
/// both plain transfers to equal owners or both stakeable with an equal lock
/// and equal owners.
pub fn can_combine(a: &TransactionOutput, b: &TransactionOutput) -> bool {
    if a.asset_id != b.asset_id {
        return false;
    }
    match (&a.output, &b.output) {
        (Output::Transfer(a), Output::Transfer(b)) => a.owners == b.owners,
        (Output::StakeableLock(a), Output::StakeableLock(b)) => {
            a.locktime == b.locktime && a.transfer_output.owners == b.transfer_output.owners
        }
        _ => false,
    }
}

/// Merges combinable outputs in a single left to right pass. Each merged
/// output takes the place of its first occurrence.
pub fn consolidate_outputs(outputs: Vec<TransactionOutput>) -> Result<Vec<TransactionOutput>> {
    let mut consolidated: Vec<TransactionOutput> = Vec::with_capacity(outputs.len());
    for output in outputs {
        match consolidated.iter_mut().find(|existing| can_combine(existing, &output)) {
            Some(existing) => {
                let amount = existing.amount_mut().ok_or_else(|| Error::structural("merged output carries no amount"))?;
                *amount = amount.checked_add(output.amount()).ok_or_else(|| Error::overflow("consolidated output amount"))?;
            }
            None => consolidated.push(output),
        }
    }
    Ok(consolidated)
}
