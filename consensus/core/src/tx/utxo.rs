use super::{Amount, AssetId, Output, OutputOwners, TransactionOutpoint};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An unspent output as presented by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoEntry {
    pub outpoint: TransactionOutpoint,
    pub asset_id: AssetId,
    pub output: Output,
}

impl UtxoEntry {
    pub fn new(outpoint: TransactionOutpoint, asset_id: AssetId, output: Output) -> Self {
        Self { outpoint, asset_id, output }
    }

    #[inline(always)]
    pub fn amount(&self) -> Option<Amount> {
        self.output.amount()
    }

    /// Owners of the spendable transfer output (looking through stakeable locks).
    #[inline(always)]
    pub fn owners(&self) -> Option<&OutputOwners> {
        self.output.owners()
    }
}
